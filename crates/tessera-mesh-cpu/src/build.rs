use std::time::Instant;

use tessera_geom::Vec3;
use tessera_meta::{AIR_STATE, Metadata};
use tessera_models::{ModelResolver, UvTile};
use tessera_world::{SectionKey, WorldMirror};

use crate::element::{BlockCtx, render_variant};
use crate::error::{MeshError, Result};
use crate::greedy::merge_up_faces;
use crate::liquid::render_liquid;
use crate::mesh_build::{BuildStats, MeshBuild, SectionGeometry};
use crate::view::{BlockView, Fluid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshOptions {
    pub ambient_occlusion: bool,
    pub greedy_merge: bool,
    /// Hide faces that look into columns this worker has not loaded.
    pub cull_unloaded_neighbors: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            ambient_occlusion: true,
            greedy_merge: false,
            cull_unloaded_neighbors: false,
        }
    }
}

/// Builds the geometry of one 16x16x16 section from the worker's mirror.
///
/// Vertex positions are section-local (0..16 on each axis). A loaded column
/// without the requested section yields empty geometry; an unloaded column is
/// an error so callers can tell the two apart.
pub fn build_section(
    key: SectionKey,
    world: &WorldMirror,
    meta: &Metadata,
    resolver: &mut ModelResolver,
    opts: &MeshOptions,
) -> Result<SectionGeometry> {
    let t0 = Instant::now();
    if !world.has_column(key.x, key.z) {
        return Err(MeshError::ColumnNotLoaded(key));
    }
    let Some(section) = world.section(key) else {
        return Ok(SectionGeometry::default());
    };
    let view = BlockView::new(world, meta);
    let mut opaque = MeshBuild::default();
    let mut transparent = MeshBuild::default();
    let mut stats = BuildStats::default();
    let mut water_tile: Option<UvTile> = None;
    let origin = key.origin();

    for ly in 0..16 {
        for lz in 0..16 {
            for lx in 0..16 {
                let state = section.get(lx, ly, lz);
                if state == AIR_STATE {
                    continue;
                }
                let here = view.decode(state);
                if here.is_air() {
                    continue;
                }
                stats.blocks += 1;
                let pos = origin.offset(lx as i32, ly as i32, lz as i32);
                let local = Vec3::new(lx as f32, ly as f32, lz as f32);
                let biome = world.biome_at(pos).unwrap_or(0);
                let resolution = resolver.resolve_state(meta, state);

                if let Some(fluid) = here.liquid() {
                    let tile = resolution
                        .first()
                        .and_then(|v| v.model.primary_tile())
                        .unwrap_or_default();
                    stats.liquid_quads +=
                        render_liquid(&view, pos, local, fluid, tile, biome, &mut transparent);
                    continue;
                }

                let ctx = BlockCtx {
                    view,
                    pos,
                    local,
                    here,
                    biome,
                    ambient_occlusion: opts.ambient_occlusion,
                    cull_unloaded: opts.cull_unloaded_neighbors,
                };
                for variant in resolution.iter() {
                    stats.quads += render_variant(&ctx, variant, &mut opaque)?;
                }

                if here.waterlogged() {
                    let tile = *water_tile.get_or_insert_with(|| water_surface_tile(meta, resolver));
                    stats.liquid_quads += render_liquid(
                        &view,
                        pos,
                        local,
                        Fluid::Water,
                        tile,
                        biome,
                        &mut transparent,
                    );
                }
            }
        }
    }

    if opts.greedy_merge {
        let before = opaque.triangle_count();
        opaque = merge_up_faces(&opaque);
        stats.merged_away = (before.saturating_sub(opaque.triangle_count()) / 2) as u32;
    }
    stats.micros = t0.elapsed().as_micros() as u64;
    log::debug!(
        target: "mesh",
        "section {} blocks={} quads={} liquid_quads={} merged_away={}",
        key,
        stats.blocks,
        stats.quads,
        stats.liquid_quads,
        stats.merged_away
    );
    log::debug!(target: "perf", "ms={:.3} mesher_section key={}", stats.micros as f64 / 1000.0, key);
    Ok(SectionGeometry {
        opaque: opaque.into_buffers(),
        transparent: transparent.into_buffers(),
        stats,
    })
}

fn water_surface_tile(meta: &Metadata, resolver: &mut ModelResolver) -> UvTile {
    meta.block_by_name("water")
        .map(|b| b.min_state_id)
        .and_then(|s| {
            resolver
                .resolve_state(meta, s)
                .first()
                .and_then(|v| v.model.primary_tile())
        })
        .unwrap_or_default()
}
