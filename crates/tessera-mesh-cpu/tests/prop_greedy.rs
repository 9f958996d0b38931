use proptest::prelude::*;
use tessera_geom::Vec3;
use tessera_mesh_cpu::{FLIPPED_WINDING, MeshBuild, STANDARD_WINDING, merge_up_faces};

const SHADES: [[f32; 3]; 2] = [[1.0, 1.0, 1.0], [0.8, 0.8, 0.8]];

fn up_quad(mb: &mut MeshBuild, x: usize, z: usize, color: [f32; 3], flipped: bool) {
    let base = mb.vertex_count() as u32;
    for (dx, dz) in [(0.0, 1.0), (1.0, 1.0), (0.0, 0.0), (1.0, 0.0)] {
        mb.push_vertex(
            Vec3::new(x as f32 + dx, 4.0, z as f32 + dz),
            Vec3::UP,
            [dx * 0.0625, dz * 0.0625],
            color,
        );
    }
    mb.push_quad_indices(base, if flipped { &FLIPPED_WINDING } else { &STANDARD_WINDING });
}

fn side_quad(mb: &mut MeshBuild, x: usize, z: usize) {
    let base = mb.vertex_count() as u32;
    let n = Vec3::new(1.0, 0.0, 0.0);
    for (dy, dz) in [(1.0, 0.0), (1.0, 1.0), (0.0, 0.0), (0.0, 1.0)] {
        mb.push_vertex(Vec3::new(x as f32 + 1.0, 3.0 + dy, z as f32 + dz), n, [dz, dy], [0.6; 3]);
    }
    mb.push_quad_indices(base, &STANDARD_WINDING);
}

/// Per cell: 0 = empty, 1..=2 = up face with that shade, 3 = up face plus a side face.
fn grid() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=3, 256)
}

fn mesh_of(cells: &[u8], flip_every: usize) -> MeshBuild {
    let mut mb = MeshBuild::default();
    for (i, &c) in cells.iter().enumerate() {
        let (x, z) = (i % 16, i / 16);
        match c {
            1 | 2 => up_quad(&mut mb, x, z, SHADES[c as usize - 1], i % flip_every == 0),
            3 => {
                up_quad(&mut mb, x, z, SHADES[0], false);
                side_quad(&mut mb, x, z);
            }
            _ => {}
        }
    }
    mb
}

fn up_area(mb: &MeshBuild) -> f32 {
    (0..mb.vertex_count() / 4)
        .filter(|q| mb.normal(q * 4) == [0.0, 1.0, 0.0])
        .map(|q| {
            let p: Vec<[f32; 3]> = (0..4).map(|v| mb.position(q * 4 + v)).collect();
            let span = |a: usize| {
                let lo = p.iter().map(|v| v[a]).fold(f32::MAX, f32::min);
                let hi = p.iter().map(|v| v[a]).fold(f32::MIN, f32::max);
                hi - lo
            };
            span(0) * span(2)
        })
        .sum()
}

fn covers(mb: &MeshBuild, x: usize, z: usize) -> usize {
    let (cx, cz) = (x as f32 + 0.5, z as f32 + 0.5);
    (0..mb.vertex_count() / 4)
        .filter(|q| mb.normal(q * 4) == [0.0, 1.0, 0.0])
        .filter(|q| {
            let p: Vec<[f32; 3]> = (0..4).map(|v| mb.position(q * 4 + v)).collect();
            let inside = |a: usize, c: f32| {
                p.iter().any(|v| v[a] < c) && p.iter().any(|v| v[a] > c)
            };
            inside(0, cx) && inside(2, cz)
        })
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Merging never adds triangles
    #[test]
    fn triangle_count_never_grows(cells in grid(), flip in 1usize..8) {
        let mb = mesh_of(&cells, flip);
        let out = merge_up_faces(&mb);
        prop_assert!(out.triangle_count() <= mb.triangle_count());
        prop_assert_eq!(out.idx.len() % 6, 0);
    }

    // Every occupied cell is covered by exactly one up quad and the area is preserved
    #[test]
    fn footprint_is_covered_exactly(cells in grid()) {
        let mb = mesh_of(&cells, usize::MAX);
        let out = merge_up_faces(&mb);
        prop_assert_eq!(up_area(&out), up_area(&mb));
        for (i, &c) in cells.iter().enumerate() {
            let want = if c == 0 { 0 } else { 1 };
            prop_assert_eq!(covers(&out, i % 16, i / 16), want);
        }
    }

    // Quads that are not up faces come through bit-for-bit
    #[test]
    fn other_quads_are_untouched(cells in grid()) {
        let mb = mesh_of(&cells, 3);
        let out = merge_up_faces(&mb);
        let sides = |m: &MeshBuild| -> Vec<Vec<u32>> {
            (0..m.vertex_count() / 4)
                .filter(|q| m.normal(q * 4)[1] == 0.0)
                .map(|q| {
                    let mut bits: Vec<u32> = Vec::new();
                    for v in q * 4..q * 4 + 4 {
                        bits.extend(m.position(v).map(f32::to_bits));
                        bits.extend(m.tex(v).map(f32::to_bits));
                        bits.extend(m.color(v).map(f32::to_bits));
                    }
                    bits.extend(m.idx[q * 6..q * 6 + 6].iter().map(|i| i - (q * 4) as u32));
                    bits
                })
                .collect()
        };
        prop_assert_eq!(sides(&out), sides(&mb));
    }
}
