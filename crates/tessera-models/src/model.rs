use std::sync::Arc;

use tessera_geom::{Axis, Mat3, Vec3};

use crate::config::{ElementDef, FaceDef, ModelDef, TextureDef, VariantDef};
use crate::error::{ModelError, Result};
use crate::face::Face;

/// Atlas rectangle: origin `(u, v)` and span `(su, sv)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UvTile {
    pub u: f32,
    pub v: f32,
    pub su: f32,
    pub sv: f32,
}

impl UvTile {
    /// Narrows the tile to a `[u1, v1, u2, v2]` window given in 0..16 texels.
    pub fn window(self, uv: [f32; 4]) -> UvTile {
        UvTile {
            u: self.u + uv[0] / 16.0 * self.su,
            v: self.v + uv[1] / 16.0 * self.sv,
            su: (uv[2] - uv[0]) / 16.0 * self.su,
            sv: (uv[3] - uv[1]) / 16.0 * self.sv,
        }
    }

    /// Atlas coordinate of a face-local `(s, t)` in 0..1.
    #[inline]
    pub fn at(self, s: f32, t: f32) -> [f32; 2] {
        [self.u + s * self.su, self.v + t * self.sv]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementRotation {
    pub origin: Vec3,
    pub axis: Axis,
    pub angle: f32,
    pub matrix: Mat3,
    pub rescale: f32,
}

impl ElementRotation {
    /// Rotates `p` about the pivot, stretching the two off-axis components when rescaled.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let mut r = self.matrix.mul_vec(p - self.origin);
        if self.rescale != 1.0 {
            match self.axis {
                Axis::X => {
                    r.y *= self.rescale;
                    r.z *= self.rescale;
                }
                Axis::Y => {
                    r.x *= self.rescale;
                    r.z *= self.rescale;
                }
                Axis::Z => {
                    r.x *= self.rescale;
                    r.y *= self.rescale;
                }
            }
        }
        r + self.origin
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementFace {
    /// Tile narrowed to the face's uv window.
    pub tile: UvTile,
    /// Whole tile, for uv-locked placements that derive texels from world position.
    pub atlas: UvTile,
    pub cullface: Option<Face>,
    pub tint_index: Option<i32>,
    /// Texture rotation in degrees, a multiple of 90.
    pub rotation: i32,
}

/// Axis-aligned box in block units (0..1).
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub from: Vec3,
    pub to: Vec3,
    pub rotation: Option<ElementRotation>,
    pub faces: [Option<ElementFace>; 6],
    pub shade: bool,
}

impl Element {
    pub fn face(&self, f: Face) -> Option<&ElementFace> {
        self.faces[f.index()].as_ref()
    }

    pub fn is_unit_cube(&self) -> bool {
        self.rotation.is_none() && self.from == Vec3::ZERO && self.to == Vec3::splat(1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub elements: Vec<Element>,
    pub ambient_occlusion: bool,
    /// Tile for element-less renderers such as liquids.
    pub particle: Option<UvTile>,
}

impl Model {
    pub fn compile(block: &str, def: &ModelDef) -> Result<Model> {
        let elements = def
            .elements
            .iter()
            .map(|e| compile_element(block, e))
            .collect::<Result<Vec<_>>>()?;
        let particle = def
            .textures
            .get("particle")
            .and_then(|v| serde_json::from_value::<TextureDef>(v.clone()).ok())
            .map(tile_of);
        Ok(Model {
            elements,
            ambient_occlusion: def.ao.unwrap_or(true),
            particle,
        })
    }

    /// Particle tile, else the first face tile found.
    pub fn primary_tile(&self) -> Option<UvTile> {
        self.particle.or_else(|| {
            self.elements
                .iter()
                .flat_map(|e| e.faces.iter().flatten())
                .map(|f| f.tile)
                .next()
        })
    }
}

fn tile_of(t: TextureDef) -> UvTile {
    UvTile {
        u: t.u,
        v: t.v,
        su: t.su,
        sv: t.sv,
    }
}

// Default face window derived from the element bounds, in 0..16 texels.
fn default_window(face: Face, from: [f32; 3], to: [f32; 3]) -> [f32; 4] {
    match face {
        Face::PosY | Face::NegY => [from[0], from[2], to[0], to[2]],
        Face::PosZ | Face::NegZ => [from[0], 16.0 - to[1], to[0], 16.0 - from[1]],
        Face::PosX | Face::NegX => [from[2], 16.0 - to[1], to[2], 16.0 - from[1]],
    }
}

fn compile_element(block: &str, e: &ElementDef) -> Result<Element> {
    let rotation = match &e.rotation {
        Some(r) => {
            let axis = Axis::parse(&r.axis).ok_or_else(|| ModelError::UnknownAxis {
                block: block.to_string(),
                axis: r.axis.clone(),
            })?;
            let rescale = if r.rescale && r.angle != 0.0 {
                1.0 / r.angle.to_radians().cos().abs()
            } else {
                1.0
            };
            Some(ElementRotation {
                origin: Vec3::from_array(r.origin) / 16.0,
                axis,
                angle: r.angle,
                matrix: Mat3::from_axis_degrees(axis, r.angle),
                rescale,
            })
        }
        None => None,
    };
    let mut faces: [Option<ElementFace>; 6] = Default::default();
    for (name, fd) in &e.faces {
        let face = Face::from_name(name).ok_or_else(|| ModelError::UnknownFace {
            block: block.to_string(),
            face: name.clone(),
        })?;
        let window = fd.uv.unwrap_or_else(|| default_window(face, e.from, e.to));
        faces[face.index()] = Some(compile_face(block, fd, window)?);
    }
    Ok(Element {
        from: Vec3::from_array(e.from) / 16.0,
        to: Vec3::from_array(e.to) / 16.0,
        rotation,
        faces,
        shade: e.shade,
    })
}

fn compile_face(block: &str, fd: &FaceDef, window: [f32; 4]) -> Result<ElementFace> {
    let base = tile_of(fd.texture);
    let cullface = match &fd.cullface {
        Some(c) => Some(Face::from_name(c).ok_or_else(|| ModelError::UnknownFace {
            block: block.to_string(),
            face: c.clone(),
        })?),
        None => None,
    };
    Ok(ElementFace {
        tile: base.window(window),
        atlas: base,
        cullface,
        tint_index: fd.tintindex,
        rotation: fd.rotation.rem_euclid(360),
    })
}

/// One model placement chosen for a concrete block state.
#[derive(Clone, Debug)]
pub struct ResolvedVariant {
    pub model: Arc<Model>,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub uvlock: bool,
    /// Whole-block rotation about the block center; z applies first, then x, then y.
    pub rotation: Mat3,
}

impl ResolvedVariant {
    pub fn new(model: Arc<Model>, def: &VariantDef) -> Self {
        let rz = Mat3::from_axis_degrees(Axis::Z, -(def.z as f32));
        let rx = Mat3::from_axis_degrees(Axis::X, -(def.x as f32));
        let ry = Mat3::from_axis_degrees(Axis::Y, -(def.y as f32));
        Self {
            model,
            x: def.x,
            y: def.y,
            z: def.z,
            uvlock: def.uvlock,
            rotation: ry.mul_mat(&rx.mul_mat(&rz)),
        }
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        !self.rotation.is_identity()
    }
}
