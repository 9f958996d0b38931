use tessera_geom::Vec3;
use tessera_models::{Element, ElementFace, Face, ResolvedVariant};
use tessera_world::BlockPos;

use crate::error::MeshError;
use crate::face_table::{face_corners, face_uv};
use crate::mesh_build::{FLIPPED_WINDING, MeshBuild, STANDARD_WINDING};
use crate::shading::{ao_brightness, corner_ao, light_curve, mul_rgb, tint};
use crate::view::{BlockView, Sample};

const CENTER: Vec3 = Vec3::splat(0.5);

/// Per-block inputs shared by every element of the block.
pub(crate) struct BlockCtx<'a> {
    pub view: BlockView<'a>,
    pub pos: BlockPos,
    pub local: Vec3,
    pub here: Sample<'a>,
    pub biome: u16,
    pub ambient_occlusion: bool,
    pub cull_unloaded: bool,
}

impl BlockCtx<'_> {
    #[inline]
    fn at(&self, d: [i32; 3]) -> BlockPos {
        self.pos.offset(d[0], d[1], d[2])
    }

    /// Whether a face whose cullface points along `d` is hidden by its neighbor.
    fn culled(&self, d: [i32; 3]) -> bool {
        match self.view.sample(self.at(d)) {
            None => self.cull_unloaded,
            Some(nb) => {
                let glass = self.here.name().contains("glass");
                (glass && nb.name() == self.here.name()) || nb.is_solid_cube()
            }
        }
    }
}

/// Emits every visible face of one placed model. Returns the number of quads written.
pub(crate) fn render_variant(
    ctx: &BlockCtx<'_>,
    variant: &ResolvedVariant,
    out: &mut MeshBuild,
) -> Result<u32, MeshError> {
    let do_ao = ctx.ambient_occlusion && variant.model.ambient_occlusion;
    let mut quads = 0;
    for element in &variant.model.elements {
        for face in Face::ALL {
            let Some(ef) = element.face(face) else {
                continue;
            };
            if let Some(cf) = ef.cullface {
                if ctx.culled(variant.rotation.mul_dir(cf.delta())) {
                    continue;
                }
            }
            emit_face(ctx, variant, element, face, ef, do_ao && element.shade, out)?;
            quads += 1;
        }
    }
    Ok(quads)
}

fn emit_face(
    ctx: &BlockCtx<'_>,
    variant: &ResolvedVariant,
    element: &Element,
    face: Face,
    ef: &ElementFace,
    do_ao: bool,
    out: &mut MeshBuild,
) -> Result<(), MeshError> {
    let global = &variant.rotation;
    let dir = global.mul_dir(face.delta());
    let light = light_curve(ctx.view.world.light_at(ctx.at(dir)));
    let base_color = match ef.tint_index {
        Some(_) => tint(ctx.view.meta, ctx.here.name(), ctx.here.info, ctx.biome),
        None => [1.0; 3],
    };
    let mut normal = face.normal();
    if let Some(r) = &element.rotation {
        normal = r.matrix.mul_vec(normal);
    }
    let normal = global.mul_vec(normal).normalized();

    let (sn, cs) = match ef.rotation {
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        _ => (0.0, 1.0),
    };
    // uv-locked placements take texels from where the corner lands, not from the model face
    let locked = if variant.uvlock && variant.is_rotated() {
        Face::from_delta(dir)
    } else {
        None
    };
    let fc = face_corners(face);
    let mut ao = [3u8; 4];
    let base = out.vertex_count() as u32;
    for (i, corner) in fc.corners.iter().enumerate() {
        let pick = |axis: usize, lo: f32, hi: f32| if corner.pos[axis] == 1 { hi } else { lo };
        let mut p = Vec3::new(
            pick(0, element.from.x, element.to.x),
            pick(1, element.from.y, element.to.y),
            pick(2, element.from.z, element.to.z),
        );
        if let Some(r) = &element.rotation {
            p = r.apply(p);
        }
        if variant.is_rotated() {
            p = global.rotate_about(p, CENTER);
        }
        let q = p;
        let p = q + ctx.local;
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(MeshError::Degenerate {
                state: ctx.here.state,
                pos: ctx.pos,
            });
        }

        let (fs, ft, tile) = match locked {
            Some(world_face) => {
                let (s, t) = face_uv(world_face, q);
                (s, t, ef.atlas)
            }
            None => (corner.uv[0] as f32, corner.uv[1] as f32, ef.tile),
        };
        // Texture rotation turns the face-local coordinate about the tile center
        let (s0, t0) = (fs - 0.5, ft - 0.5);
        let s = s0 * cs + t0 * sn + 0.5;
        let t = -s0 * sn + t0 * cs + 0.5;
        let uv = tile.at(s, t);

        let mut shade = 1.0;
        if do_ao {
            let d = corner.pos.map(|c| c as i32 * 2 - 1);
            let side1 = [d[0] * fc.mask1[0], d[1] * fc.mask1[1], d[2] * fc.mask1[2]];
            let side2 = [d[0] * fc.mask2[0], d[1] * fc.mask2[1], d[2] * fc.mask2[2]];
            let s1 = ctx.view.occludes(ctx.at(global.mul_dir(side1)));
            let s2 = ctx.view.occludes(ctx.at(global.mul_dir(side2)));
            let cn = ctx.view.occludes(ctx.at(global.mul_dir(d)));
            ao[i] = corner_ao(s1, s2, cn);
            shade = ao_brightness(ao[i]);
        }
        out.push_vertex(p, normal, uv, mul_rgb(base_color, light * shade));
    }
    let ao_sum = |a: usize, b: usize| ao[a] as u32 + ao[b] as u32;
    if do_ao && ao_sum(0, 3) >= ao_sum(1, 2) {
        out.push_quad_indices(base, &FLIPPED_WINDING);
    } else {
        out.push_quad_indices(base, &STANDARD_WINDING);
    }
    Ok(())
}
