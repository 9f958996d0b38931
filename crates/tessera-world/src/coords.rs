use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECTION_SIZE: i32 = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Position inside the owning section, each axis in 0..16.
    #[inline]
    pub const fn local(self) -> (usize, usize, usize) {
        (
            self.x.rem_euclid(SECTION_SIZE) as usize,
            self.y.rem_euclid(SECTION_SIZE) as usize,
            self.z.rem_euclid(SECTION_SIZE) as usize,
        )
    }
}

/// Section identified by its origin; every component is a multiple of 16.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SectionKey {
    /// Floors arbitrary world coordinates to the containing section's origin.
    #[inline]
    pub const fn containing(p: BlockPos) -> Self {
        Self {
            x: floor16(p.x),
            y: floor16(p.y),
            z: floor16(p.z),
        }
    }

    #[inline]
    pub const fn from_origin(x: i32, y: i32, z: i32) -> Self {
        Self::containing(BlockPos::new(x, y, z))
    }

    #[inline]
    pub const fn origin(self) -> BlockPos {
        BlockPos::new(self.x, self.y, self.z)
    }

    #[inline]
    pub const fn column(self) -> ColumnKey {
        ColumnKey { x: self.x, z: self.z }
    }

    /// Neighbor `dx/dy/dz` sections away.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx * SECTION_SIZE,
            y: self.y + dy * SECTION_SIZE,
            z: self.z + dz * SECTION_SIZE,
        }
    }

    /// Section-grid indices (origin / 16).
    #[inline]
    pub const fn grid(self) -> (i32, i32, i32) {
        (self.x >> 4, self.y >> 4, self.z >> 4)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Column identified by its x/z origin (multiples of 16).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnKey {
    pub x: i32,
    pub z: i32,
}

impl ColumnKey {
    #[inline]
    pub const fn containing(x: i32, z: i32) -> Self {
        Self {
            x: floor16(x),
            z: floor16(z),
        }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx * SECTION_SIZE,
            z: self.z + dz * SECTION_SIZE,
        }
    }

    #[inline]
    pub const fn section(self, y: i32) -> SectionKey {
        SectionKey {
            x: self.x,
            y: floor16(y),
            z: self.z,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

#[inline]
const fn floor16(v: i32) -> i32 {
    v & !(SECTION_SIZE - 1)
}
