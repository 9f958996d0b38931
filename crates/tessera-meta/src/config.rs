use serde::Deserialize;
use std::collections::HashMap;

use crate::StateId;

// Top-level versioned data bundle delivered with the `metadata` message
#[derive(Deserialize, Debug, Clone, Default)]
pub struct VersionedData {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub biomes: Vec<BiomeDef>,
    #[serde(default)]
    pub tints: TintsDef,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlockDef {
    pub id: u32,
    pub name: String,
    // Absent on legacy (id << 4 | meta) versions
    #[serde(default)]
    pub min_state_id: Option<StateId>,
    #[serde(default)]
    pub max_state_id: Option<StateId>,
    #[serde(default)]
    pub states: Vec<StatePropDef>,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "default_bounding_box")]
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub material: Option<String>,
    // Overrides the bounding-box derived full-cube flag (slabs, stairs, ...)
    #[serde(default)]
    pub full_cube: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundingBox {
    Block,
    Empty,
}

fn default_bounding_box() -> BoundingBox {
    BoundingBox::Block
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatePropDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: PropKind,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub num_values: Option<u32>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    Bool,
    #[default]
    Enum,
    Int,
}

impl StatePropDef {
    /// Ordered value list; bools and counted ints may omit `values`.
    pub fn resolved_values(&self) -> Vec<String> {
        if let Some(v) = &self.values {
            return v.clone();
        }
        match self.kind {
            PropKind::Bool => vec!["true".into(), "false".into()],
            PropKind::Int | PropKind::Enum => (0..self.num_values.unwrap_or(0))
                .map(|i| i.to_string())
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BiomeDef {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default)]
    pub rainfall: f32,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TintsDef {
    #[serde(default)]
    pub grass: TintTableDef,
    #[serde(default)]
    pub foliage: TintTableDef,
    #[serde(default)]
    pub water: TintTableDef,
    #[serde(default)]
    pub redstone: TintTableDef,
    #[serde(default)]
    pub constant: TintTableDef,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TintTableDef {
    #[serde(default)]
    pub default: Option<u32>,
    #[serde(default)]
    pub data: Vec<TintEntryDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TintEntryDef {
    // Biome names, block names, or redstone power levels
    pub keys: Vec<serde_json::Value>,
    pub color: u32,
}

/// Per-version lookup table: block names renamed between versions.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct VersionLookup {
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}
