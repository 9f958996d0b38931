use tessera_geom::Vec3;

/// Growable per-section vertex arrays. One quad is 4 vertices and 6 indices.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub col: Vec<f32>,
    pub idx: Vec<u32>,
}

/// Winding of the two triangles of a quad whose corners are `v0..v3`.
pub const STANDARD_WINDING: [u32; 6] = [0, 1, 2, 2, 1, 3];
pub const FLIPPED_WINDING: [u32; 6] = [0, 3, 2, 0, 1, 3];

impl MeshBuild {
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4 * 3);
        self.norm.reserve(n_quads * 4 * 3);
        self.uv.reserve(n_quads * 4 * 2);
        self.col.reserve(n_quads * 4 * 3);
        self.idx.reserve(n_quads * 6);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Appends one vertex and returns its index.
    #[inline]
    pub fn push_vertex(&mut self, p: Vec3, n: Vec3, uv: [f32; 2], rgb: [f32; 3]) -> u32 {
        let i = self.vertex_count() as u32;
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.norm.extend_from_slice(&[n.x, n.y, n.z]);
        self.uv.extend_from_slice(&uv);
        self.col.extend_from_slice(&rgb);
        i
    }

    /// Indexes the 4 vertices starting at `base` with the given winding.
    #[inline]
    pub fn push_quad_indices(&mut self, base: u32, winding: &[u32; 6]) {
        self.idx.extend(winding.iter().map(|w| base + w));
    }

    pub fn position(&self, v: usize) -> [f32; 3] {
        [self.pos[v * 3], self.pos[v * 3 + 1], self.pos[v * 3 + 2]]
    }

    pub fn normal(&self, v: usize) -> [f32; 3] {
        [self.norm[v * 3], self.norm[v * 3 + 1], self.norm[v * 3 + 2]]
    }

    pub fn color(&self, v: usize) -> [f32; 3] {
        [self.col[v * 3], self.col[v * 3 + 1], self.col[v * 3 + 2]]
    }

    pub fn tex(&self, v: usize) -> [f32; 2] {
        [self.uv[v * 2], self.uv[v * 2 + 1]]
    }

    /// Moves the arrays into fixed-size buffers.
    pub fn into_buffers(self) -> MeshBuffers {
        MeshBuffers {
            positions: self.pos.into_boxed_slice(),
            normals: self.norm.into_boxed_slice(),
            uvs: self.uv.into_boxed_slice(),
            colors: self.col.into_boxed_slice(),
            indices: self.idx.into_boxed_slice(),
        }
    }
}

/// Finished, fixed-size vertex arrays handed to the host.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuffers {
    pub positions: Box<[f32]>,
    pub normals: Box<[f32]>,
    pub uvs: Box<[f32]>,
    pub colors: Box<[f32]>,
    pub indices: Box<[u32]>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildStats {
    pub blocks: u32,
    pub quads: u32,
    pub liquid_quads: u32,
    /// Up-facing quads removed by the greedy pass minus the merged quads added.
    pub merged_away: u32,
    pub micros: u64,
}

/// Geometry of one section: opaque cuboids plus the transparent liquid pass.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct SectionGeometry {
    pub opaque: MeshBuffers,
    pub transparent: MeshBuffers,
    pub stats: BuildStats,
}

impl SectionGeometry {
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.transparent.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.opaque.triangle_count() + self.transparent.triangle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_are_rebased() {
        let mut mb = MeshBuild::default();
        for _ in 0..2 {
            let base = mb.push_vertex(Vec3::ZERO, Vec3::UP, [0.0, 0.0], [1.0; 3]);
            for _ in 0..3 {
                mb.push_vertex(Vec3::ZERO, Vec3::UP, [0.0, 0.0], [1.0; 3]);
            }
            mb.push_quad_indices(base, &STANDARD_WINDING);
        }
        assert_eq!(&mb.idx[6..], &[4, 5, 6, 6, 5, 7]);
        let out = mb.into_buffers();
        assert_eq!(out.vertex_count(), 8);
        assert_eq!(out.triangle_count(), 4);
    }
}
