use tessera_geom::Vec3;
use tessera_models::Face;

/// One quad corner: unit-cube position and face-local texture coordinate.
#[derive(Clone, Copy, Debug)]
pub struct Corner {
    pub pos: [u8; 3],
    pub uv: [u8; 2],
}

/// Corner layout of one cube face plus the masks that pick its two AO side samples.
#[derive(Clone, Copy, Debug)]
pub struct FaceCorners {
    pub corners: [Corner; 4],
    pub mask1: [i32; 3],
    pub mask2: [i32; 3],
}

const fn c(x: u8, y: u8, z: u8, u: u8, v: u8) -> Corner {
    Corner {
        pos: [x, y, z],
        uv: [u, v],
    }
}

// Corners are ordered so (0,1,2) and (2,1,3) wind counter-clockwise seen from outside.
const UP: FaceCorners = FaceCorners {
    corners: [c(0, 1, 1, 0, 1), c(1, 1, 1, 1, 1), c(0, 1, 0, 0, 0), c(1, 1, 0, 1, 0)],
    mask1: [1, 1, 0],
    mask2: [0, 1, 1],
};
const DOWN: FaceCorners = FaceCorners {
    corners: [c(1, 0, 1, 0, 1), c(0, 0, 1, 1, 1), c(1, 0, 0, 0, 0), c(0, 0, 0, 1, 0)],
    mask1: [1, 1, 0],
    mask2: [0, 1, 1],
};
const EAST: FaceCorners = FaceCorners {
    corners: [c(1, 1, 1, 0, 0), c(1, 0, 1, 0, 1), c(1, 1, 0, 1, 0), c(1, 0, 0, 1, 1)],
    mask1: [1, 1, 0],
    mask2: [1, 0, 1],
};
const WEST: FaceCorners = FaceCorners {
    corners: [c(0, 1, 0, 0, 0), c(0, 0, 0, 0, 1), c(0, 1, 1, 1, 0), c(0, 0, 1, 1, 1)],
    mask1: [1, 1, 0],
    mask2: [1, 0, 1],
};
const SOUTH: FaceCorners = FaceCorners {
    corners: [c(0, 0, 1, 0, 1), c(1, 0, 1, 1, 1), c(0, 1, 1, 0, 0), c(1, 1, 1, 1, 0)],
    mask1: [1, 0, 1],
    mask2: [0, 1, 1],
};
const NORTH: FaceCorners = FaceCorners {
    corners: [c(1, 0, 0, 0, 1), c(0, 0, 0, 1, 1), c(1, 1, 0, 0, 0), c(0, 1, 0, 1, 0)],
    mask1: [1, 0, 1],
    mask2: [0, 1, 1],
};

#[inline]
pub fn face_corners(face: Face) -> &'static FaceCorners {
    match face {
        Face::PosY => &UP,
        Face::NegY => &DOWN,
        Face::PosX => &EAST,
        Face::NegX => &WEST,
        Face::PosZ => &SOUTH,
        Face::NegZ => &NORTH,
    }
}

/// Face-local texture coordinate of a block-local point, in the corner table's convention.
#[inline]
pub fn face_uv(face: Face, p: Vec3) -> (f32, f32) {
    match face {
        Face::PosY => (p.x, p.z),
        Face::NegY => (1.0 - p.x, p.z),
        Face::PosX => (1.0 - p.z, 1.0 - p.y),
        Face::NegX => (p.z, 1.0 - p.y),
        Face::PosZ => (p.x, 1.0 - p.y),
        Face::NegZ => (1.0 - p.x, 1.0 - p.y),
    }
}
