use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use tessera_mesh_cpu::{MeshOptions, build_section};
use tessera_world::{SectionKey, WorldMirror};

#[path = "../tests/common/mod.rs"]
mod common;
use common::*;

fn terrain(x: usize, y: usize, z: usize) -> u32 {
    let h = 4 + (x * 7 + z * 13) % 6;
    match y {
        _ if y < h => STONE,
        _ if y == h => GRASS,
        _ if y <= 7 => water(0),
        _ => AIR,
    }
}

fn world() -> WorldMirror {
    let mut w = WorldMirror::new();
    for cx in -1..=1 {
        for cz in -1..=1 {
            w.add_column(cx * 16, cz * 16, &column(terrain));
        }
    }
    w
}

fn bench_build_section(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_section");
    let w = world();
    let meta = meta();
    let mut resolver = resolver();
    let key = SectionKey::from_origin(0, 0, 0);
    for (name, opts) in [
        ("terrain_ao", MeshOptions::default()),
        (
            "terrain_ao_greedy",
            MeshOptions {
                greedy_merge: true,
                ..Default::default()
            },
        ),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let out = build_section(key, &w, &meta, &mut resolver, &opts);
                black_box(out).ok();
            })
        });
    }
    group.finish();
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_build_section
}
criterion_main!(benches);
