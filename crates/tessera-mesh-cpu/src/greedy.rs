use std::collections::HashMap;

use tessera_geom::Vec3;

use crate::mesh_build::{MeshBuild, STANDARD_WINDING};

const GRID: usize = 16;

// Exact bit patterns of color and the four corner UVs (x0z0, x1z0, x0z1, x1z1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct MergeKey {
    y: u32,
    color: [u32; 3],
    uv: [[u32; 2]; 4],
}

struct Candidate {
    quad: usize,
    x: usize,
    z: usize,
}

struct Group {
    key: MergeKey,
    y: f32,
    color: [f32; 3],
    uv: [[f32; 2]; 4],
    cells: Vec<Candidate>,
}

/// Merges coplanar, uniformly colored, unit up-facing quads into larger rectangles.
///
/// Every other quad is copied through with its vertices and winding untouched;
/// merged quads are appended after them. Running the pass on its own output
/// changes nothing.
pub fn merge_up_faces(buf: &MeshBuild) -> MeshBuild {
    let quad_count = buf.vertex_count() / 4;
    // Each quad's six indices must stay inside its own four vertices
    let self_contained = buf.idx.chunks_exact(6).enumerate().all(|(q, tri)| {
        let lo = (q * 4) as u32;
        tri.iter().all(|&i| (lo..lo + 4).contains(&i))
    });
    if buf.vertex_count() % 4 != 0 || buf.idx.len() != quad_count * 6 || !self_contained {
        log::warn!(
            target: "mesh",
            "greedy merge skipped: {} vertices / {} indices are not self-contained quads",
            buf.vertex_count(),
            buf.idx.len()
        );
        return buf.clone();
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut by_key: HashMap<MergeKey, usize> = HashMap::new();
    for q in 0..quad_count {
        let Some((cand, group)) = candidate(buf, q) else {
            continue;
        };
        let gi = *by_key.entry(group.key).or_insert_with(|| {
            groups.push(group);
            groups.len() - 1
        });
        groups[gi].cells.push(cand);
    }

    let mut removed = vec![false; quad_count];
    let mut merged: Vec<(usize, usize, usize, usize, usize)> = Vec::new();
    for (gi, g) in groups.iter().enumerate() {
        let mut mask: [Option<usize>; GRID * GRID] = [None; GRID * GRID];
        for c in &g.cells {
            let slot = &mut mask[c.z * GRID + c.x];
            // A second quad on an occupied cell stays as it is
            if slot.is_none() {
                *slot = Some(c.quad);
            }
        }
        let occupied: Vec<bool> = mask.iter().map(Option::is_some).collect();
        greedy_rects(GRID, GRID, &occupied, |x, z, w, h| {
            if w * h < 2 {
                return;
            }
            for zz in z..z + h {
                for xx in x..x + w {
                    if let Some(q) = mask[zz * GRID + xx] {
                        removed[q] = true;
                    }
                }
            }
            merged.push((gi, x, z, w, h));
        });
    }
    if merged.is_empty() {
        return buf.clone();
    }

    let kept = removed.iter().filter(|r| !**r).count();
    let mut out = MeshBuild::default();
    out.reserve_quads(kept + merged.len());
    for q in (0..quad_count).filter(|q| !removed[*q]) {
        let base = out.vertex_count() as u32;
        for v in q * 4..q * 4 + 4 {
            out.pos.extend_from_slice(&buf.pos[v * 3..v * 3 + 3]);
            out.norm.extend_from_slice(&buf.norm[v * 3..v * 3 + 3]);
            out.uv.extend_from_slice(&buf.uv[v * 2..v * 2 + 2]);
            out.col.extend_from_slice(&buf.col[v * 3..v * 3 + 3]);
        }
        let old_base = (q * 4) as u32;
        out.idx
            .extend(buf.idx[q * 6..q * 6 + 6].iter().map(|i| i - old_base + base));
    }
    for (gi, x, z, w, h) in merged {
        let g = &groups[gi];
        let [uv00, uv10, uv01, _] = g.uv;
        let tiled = |dx: f32, dz: f32| {
            [
                uv00[0] + dx * (uv10[0] - uv00[0]) + dz * (uv01[0] - uv00[0]),
                uv00[1] + dx * (uv10[1] - uv00[1]) + dz * (uv01[1] - uv00[1]),
            ]
        };
        let (x0, z0) = (x as f32, z as f32);
        let (wf, hf) = (w as f32, h as f32);
        // Same corner order as a single up face: (x0,z1) (x1,z1) (x0,z0) (x1,z0)
        let corners = [(0.0, hf), (wf, hf), (0.0, 0.0), (wf, 0.0)];
        let base = out.vertex_count() as u32;
        for (dx, dz) in corners {
            out.push_vertex(
                Vec3::new(x0 + dx, g.y, z0 + dz),
                Vec3::UP,
                tiled(dx, dz),
                g.color,
            );
        }
        out.push_quad_indices(base, &STANDARD_WINDING);
    }
    out
}

fn candidate(buf: &MeshBuild, q: usize) -> Option<(Candidate, Group)> {
    let verts = [q * 4, q * 4 + 1, q * 4 + 2, q * 4 + 3];
    if verts.iter().any(|&v| buf.normal(v) != [0.0, 1.0, 0.0]) {
        return None;
    }
    let color = buf.color(verts[0]);
    if verts.iter().any(|&v| buf.color(v) != color) {
        return None;
    }
    let p = verts.map(|v| buf.position(v));
    let y = p[0][1];
    if p.iter().any(|v| v[1] != y) {
        return None;
    }
    let min_x = p.iter().map(|v| v[0]).fold(f32::INFINITY, f32::min);
    let min_z = p.iter().map(|v| v[2]).fold(f32::INFINITY, f32::min);
    if min_x.fract() != 0.0 || min_z.fract() != 0.0 {
        return None;
    }
    if !(0.0..GRID as f32).contains(&min_x) || !(0.0..GRID as f32).contains(&min_z) {
        return None;
    }
    let mut uv = [[f32::NAN; 2]; 4];
    let mut seen = [false; 4];
    for (i, v) in p.iter().enumerate() {
        let slot = match (unit_step(v[0] - min_x), unit_step(v[2] - min_z)) {
            (Some(dx), Some(dz)) => dx + 2 * dz,
            _ => return None,
        };
        if seen[slot] {
            return None;
        }
        seen[slot] = true;
        uv[slot] = buf.tex(verts[i]);
    }
    let key = MergeKey {
        y: y.to_bits(),
        color: color.map(f32::to_bits),
        uv: uv.map(|c| c.map(f32::to_bits)),
    };
    Some((
        Candidate {
            quad: q,
            x: min_x as usize,
            z: min_z as usize,
        },
        Group {
            key,
            y,
            color,
            uv,
            cells: Vec::new(),
        },
    ))
}

#[inline]
fn unit_step(d: f32) -> Option<usize> {
    if d == 0.0 {
        Some(0)
    } else if d == 1.0 {
        Some(1)
    } else {
        None
    }
}

/// Row-major greedy rectangle sweep: grow along x first, then down while the whole row matches.
pub(crate) fn greedy_rects(
    width: usize,
    height: usize,
    mask: &[bool],
    mut emit: impl FnMut(usize, usize, usize, usize),
) {
    let mut used = vec![false; width * height];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if !mask[idx] || used[idx] {
                continue;
            }
            let mut w = 1;
            while x + w < width && mask[y * width + x + w] && !used[y * width + x + w] {
                w += 1;
            }
            let mut h = 1;
            'expand: while y + h < height {
                for i in 0..w {
                    let j = (y + h) * width + x + i;
                    if !mask[j] || used[j] {
                        break 'expand;
                    }
                }
                h += 1;
            }
            emit(x, y, w, h);
            for yy in 0..h {
                for xx in 0..w {
                    used[(y + yy) * width + x + xx] = true;
                }
            }
        }
    }
}
