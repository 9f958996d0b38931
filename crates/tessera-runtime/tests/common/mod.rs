#![allow(dead_code)]

use std::sync::Arc;

use tessera_meta::{Metadata, MetadataService, VersionLookup, VersionedData};
use tessera_models::VariantTable;
use tessera_world::{ColumnPayload, SectionPayload};

pub const AIR: u32 = 0;
pub const STONE: u32 = 1;
pub const BROKEN: u32 = 3;

const META: &str = r#"{
    "blocks": [
        {"id": 0, "name": "air", "minStateId": 0, "maxStateId": 0, "transparent": true, "boundingBox": "empty"},
        {"id": 1, "name": "stone", "minStateId": 1, "maxStateId": 1},
        {"id": 2, "name": "missing_texture", "minStateId": 2, "maxStateId": 2},
        {"id": 3, "name": "broken", "minStateId": 3, "maxStateId": 3}
    ],
    "biomes": [{"id": 1, "name": "plains"}]
}"#;

const CUBE: &str = r#"{"elements": [{"from": [0,0,0], "to": [16,16,16], "faces": {
    "up": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "up"},
    "down": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "down"},
    "north": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "north"},
    "south": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "south"},
    "east": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "east"},
    "west": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "west"}
}}]}"#;

// Extent overflows f32, so every vertex of the element is infinite
const OVERFLOW: &str = r#"{"elements": [{"from": [0,0,0], "to": [1e39,16,16], "faces": {
    "up": {"texture": {"u": 0, "v": 0, "su": 0.0625, "sv": 0.0625}}
}}]}"#;

pub fn versioned_data() -> VersionedData {
    serde_json::from_str(META).unwrap()
}

pub fn lookup() -> VersionLookup {
    VersionLookup::default()
}

pub fn meta() -> Arc<Metadata> {
    MetadataService::new()
        .initialize("1.16.4", &versioned_data(), &lookup())
        .unwrap()
}

pub fn table() -> Arc<VariantTable> {
    let blockstates = r#"{
        "stone": {"variants": {"": {"model": "cube"}}},
        "missing_texture": {"variants": {"": {"model": "cube"}}},
        "broken": {"variants": {"": {"model": "overflow"}}}
    }"#;
    let models = format!(r#"{{"cube": {CUBE}, "overflow": {OVERFLOW}}}"#);
    Arc::new(VariantTable::from_json(blockstates, Some(&models)).unwrap())
}

/// Column with a single stone layer at y=0 in its lowest section.
pub fn floor_column() -> ColumnPayload {
    ColumnPayload {
        sections: vec![SectionPayload::from_fn(0, |_, y, _| if y == 0 { STONE } else { AIR })],
        biomes: vec![1; 256],
        ..Default::default()
    }
}

/// Floor column with one block whose model cannot be meshed.
pub fn broken_column() -> ColumnPayload {
    ColumnPayload {
        sections: vec![SectionPayload::from_fn(0, |x, y, z| match (x, y, z) {
            (4, 4, 4) => BROKEN,
            (_, 0, _) => STONE,
            _ => AIR,
        })],
        biomes: vec![1; 256],
        ..Default::default()
    }
}
