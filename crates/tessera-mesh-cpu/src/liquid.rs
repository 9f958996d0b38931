use tessera_geom::Vec3;
use tessera_meta::TintKind;
use tessera_models::{Face, UvTile};
use tessera_world::BlockPos;

use crate::face_table::face_corners;
use crate::mesh_build::{MeshBuild, STANDARD_WINDING};
use crate::view::{BlockView, Fluid};

const INSET_LO: f32 = 0.001;
const INSET_HI: f32 = 0.999;
// Back faces reuse the quad's vertices with the opposite winding
const BACK_WINDING: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Surface height of the fluid cell at `p`, in block units.
///
/// Cells of another kind sit at 1/9. A source under more of the same fluid fills
/// the block; a bare source stands at 8/9; flowing cells drop with their level.
pub fn fluid_height(view: &BlockView<'_>, p: BlockPos, fluid: Fluid) -> f32 {
    let Some(s) = view.sample(p) else {
        return 1.0 / 9.0;
    };
    if s.fluid() != Some(fluid) {
        return 1.0 / 9.0;
    }
    let level = s.fluid_level();
    if level == 0 {
        let above = view.sample(p.offset(0, 1, 0));
        if above.is_some_and(|a| a.fluid() == Some(fluid)) {
            return 1.0;
        }
        return 8.0 / 9.0;
    }
    let depth = if level >= 8 { 8 } else { 7 - level };
    (depth as f32 + 1.0) / 9.0
}

/// Corner heights indexed by `z * 2 + x` over the block's top face.
pub fn corner_heights(view: &BlockView<'_>, p: BlockPos, fluid: Fluid) -> [f32; 4] {
    let mut h = [0.0f32; 9];
    for dz in -1..=1 {
        for dx in -1..=1 {
            h[((dz + 1) * 3 + dx + 1) as usize] = fluid_height(view, p.offset(dx, 0, dz), fluid);
        }
    }
    let max4 = |a: usize, b: usize, c: usize, d: usize| h[a].max(h[b]).max(h[c].max(h[d]));
    [
        max4(0, 1, 3, 4),
        max4(1, 2, 4, 5),
        max4(3, 4, 6, 7),
        max4(4, 5, 7, 8),
    ]
}

/// Emits the double-sided liquid surface of the cell at `p`. Returns the quads written.
pub(crate) fn render_liquid(
    view: &BlockView<'_>,
    p: BlockPos,
    local: Vec3,
    fluid: Fluid,
    tile: UvTile,
    biome: u16,
    out: &mut MeshBuild,
) -> u32 {
    let heights = corner_heights(view, p, fluid);
    let water_tint = match fluid {
        Fluid::Water => Some(view.meta.biome_tint(TintKind::Water, biome)),
        Fluid::Lava => None,
    };
    let mut quads = 0;
    for face in Face::ALL {
        let [dx, dy, dz] = face.delta();
        let is_up = dy == 1;
        // Unloaded neighbors leave the face visible
        if let Some(nb) = view.sample(p.offset(dx, dy, dz)) {
            if nb.fluid() == Some(fluid) {
                continue;
            }
            if (nb.is_full_cube() && !is_up)
                || nb.material() == Some("plant")
                || nb.waterlogged()
            {
                continue;
            }
        }
        let color = match water_tint {
            Some(t) => {
                let m = if dx != 0 {
                    0.6
                } else if dz != 0 {
                    0.8
                } else {
                    1.0
                };
                [t[0] * m, t[1] * m, t[2] * m]
            }
            None => [1.0; 3],
        };
        let normal = face.normal();
        let base = out.vertex_count() as u32;
        for c in &face_corners(face).corners {
            let height = heights[c.pos[2] as usize * 2 + c.pos[0] as usize];
            let inset = |on: u8| if on == 1 { INSET_HI } else { INSET_LO };
            let y = if c.pos[1] == 1 { height - 0.001 } else { INSET_LO };
            let pos = Vec3::new(inset(c.pos[0]), y, inset(c.pos[2])) + local;
            let v_scale = if c.pos[1] == 1 { 1.0 } else { height };
            let uv = [
                tile.u + c.uv[0] as f32 * tile.su,
                tile.v + c.uv[1] as f32 * tile.sv * v_scale,
            ];
            out.push_vertex(pos, normal, uv, color);
        }
        out.push_quad_indices(base, &STANDARD_WINDING);
        out.push_quad_indices(base, &BACK_WINDING);
        quads += 1;
    }
    quads
}
