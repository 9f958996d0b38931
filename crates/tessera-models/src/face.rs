use tessera_geom::Vec3;

/// Cube face, named after the outward direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Model-file names: up, down, east, west, south, north.
    pub fn from_name(s: &str) -> Option<Face> {
        match s {
            "up" | "top" => Some(Face::PosY),
            "down" | "bottom" => Some(Face::NegY),
            "east" => Some(Face::PosX),
            "west" => Some(Face::NegX),
            "south" => Some(Face::PosZ),
            "north" => Some(Face::NegZ),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::PosY => "up",
            Face::NegY => "down",
            Face::PosX => "east",
            Face::NegX => "west",
            Face::PosZ => "south",
            Face::NegZ => "north",
        }
    }

    #[inline]
    pub fn delta(self) -> [i32; 3] {
        match self {
            Face::PosY => [0, 1, 0],
            Face::NegY => [0, -1, 0],
            Face::PosX => [1, 0, 0],
            Face::NegX => [-1, 0, 0],
            Face::PosZ => [0, 0, 1],
            Face::NegZ => [0, 0, -1],
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        let [x, y, z] = self.delta();
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Inverse of `delta`; None for non-unit directions.
    pub fn from_delta(d: [i32; 3]) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.delta() == d)
    }
}
