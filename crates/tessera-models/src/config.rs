use serde::Deserialize;
use std::collections::HashMap;

// Raw JSON shapes of blockstate and model tables.

#[derive(Deserialize, Debug, Clone)]
pub struct BlockStateDef {
    #[serde(default)]
    pub variants: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub multipart: Option<Vec<MultipartDef>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MultipartDef {
    #[serde(default)]
    pub when: Option<serde_json::Value>,
    pub apply: OneOrMany<VariantDef>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Weighted lists are resolved deterministically to their first entry.
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(t) => Some(t),
            OneOrMany::Many(v) => v.first(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariantDef {
    pub model: ModelRef,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub uvlock: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ModelRef {
    Named(String),
    Inline(ModelDef),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ModelDef {
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default, alias = "ambientocclusion")]
    pub ao: Option<bool>,
    // Only resolved tiles are kept; `#ref` strings are left to the asset pipeline
    #[serde(default)]
    pub textures: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ElementDef {
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default)]
    pub rotation: Option<ElementRotationDef>,
    #[serde(default)]
    pub faces: HashMap<String, FaceDef>,
    #[serde(default = "yes")]
    pub shade: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ElementRotationDef {
    pub origin: [f32; 3],
    pub axis: String,
    pub angle: f32,
    #[serde(default)]
    pub rescale: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FaceDef {
    pub texture: TextureDef,
    // Sub-rectangle of the tile in 0..16 texel units
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    #[serde(default)]
    pub cullface: Option<String>,
    #[serde(default)]
    pub tintindex: Option<i32>,
    #[serde(default)]
    pub rotation: i32,
}

/// Atlas tile, already resolved by the asset pipeline.
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct TextureDef {
    pub u: f32,
    pub v: f32,
    pub su: f32,
    pub sv: f32,
}

fn yes() -> bool {
    true
}
