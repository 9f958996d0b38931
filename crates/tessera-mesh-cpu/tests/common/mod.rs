#![allow(dead_code)]

use std::sync::Arc;

use tessera_meta::{Metadata, MetadataService};
use tessera_models::{ModelResolver, VariantTable};
use tessera_world::{ColumnPayload, SectionPayload};

pub const AIR: u32 = 0;
pub const STONE: u32 = 1;
pub const GLASS: u32 = 2;
pub const WATER: u32 = 3;
pub const GRASS_SNOWY: u32 = 19;
pub const GRASS: u32 = 20;
pub const SLAB_WATERLOGGED: u32 = 21;
pub const SLAB: u32 = 22;
pub const MISSING: u32 = 23;
pub const SHORT_GRASS: u32 = 24;
pub const LAVA: u32 = 25;
pub const HALF_LOCKED: u32 = 41;
pub const HALF_FREE: u32 = 42;

pub const GRASS_COLOR: u32 = 0x91BD59;
pub const WATER_COLOR: u32 = 0x3F76E4;

pub fn water(level: u32) -> u32 {
    WATER + level
}

const META: &str = r#"{
    "blocks": [
        {"id": 0, "name": "air", "minStateId": 0, "maxStateId": 0, "transparent": true, "boundingBox": "empty"},
        {"id": 1, "name": "stone", "minStateId": 1, "maxStateId": 1},
        {"id": 20, "name": "glass", "minStateId": 2, "maxStateId": 2, "transparent": true},
        {"id": 9, "name": "water", "minStateId": 3, "maxStateId": 18, "transparent": true, "boundingBox": "empty",
         "states": [{"name": "level", "type": "int", "numValues": 16}]},
        {"id": 2, "name": "grass_block", "minStateId": 19, "maxStateId": 20,
         "states": [{"name": "snowy", "type": "bool"}]},
        {"id": 44, "name": "stone_slab", "minStateId": 21, "maxStateId": 22, "transparent": true, "fullCube": false,
         "states": [{"name": "waterlogged", "type": "bool"}]},
        {"id": 99, "name": "missing_texture", "minStateId": 23, "maxStateId": 23},
        {"id": 31, "name": "short_grass", "minStateId": 24, "maxStateId": 24, "transparent": true,
         "boundingBox": "empty", "material": "plant"},
        {"id": 11, "name": "lava", "minStateId": 25, "maxStateId": 40, "transparent": true, "boundingBox": "empty",
         "states": [{"name": "level", "type": "int", "numValues": 16}]},
        {"id": 50, "name": "half_block", "minStateId": 41, "maxStateId": 42, "transparent": true, "fullCube": false,
         "states": [{"name": "locked", "type": "bool"}]}
    ],
    "biomes": [{"id": 1, "name": "plains"}],
    "tints": {
        "grass": {"default": 9551193},
        "water": {"default": 4159204}
    }
}"#;

fn cube(u: f32) -> String {
    let face = |name: &str| {
        format!(
            r#""{name}": {{"texture": {{"u": {u}, "v": 0, "su": 0.0625, "sv": 0.0625}}, "cullface": "{name}"}}"#
        )
    };
    let faces: Vec<String> = ["up", "down", "north", "south", "east", "west"].iter().map(|f| face(f)).collect();
    format!(r#"{{"elements": [{{"from": [0,0,0], "to": [16,16,16], "faces": {{{}}}}}]}}"#, faces.join(","))
}

fn models() -> String {
    let grass = r#"{"elements": [{"from": [0,0,0], "to": [16,16,16], "faces": {
        "up": {"texture": {"u": 0.5, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "up", "tintindex": 0},
        "down": {"texture": {"u": 0.5, "v": 0.0625, "su": 0.0625, "sv": 0.0625}, "cullface": "down"},
        "north": {"texture": {"u": 0.5, "v": 0.125, "su": 0.0625, "sv": 0.0625}, "cullface": "north"},
        "south": {"texture": {"u": 0.5, "v": 0.125, "su": 0.0625, "sv": 0.0625}, "cullface": "south"},
        "east": {"texture": {"u": 0.5, "v": 0.125, "su": 0.0625, "sv": 0.0625}, "cullface": "east"},
        "west": {"texture": {"u": 0.5, "v": 0.125, "su": 0.0625, "sv": 0.0625}, "cullface": "west"}
    }}]}"#;
    let slab = r#"{"elements": [{"from": [0,0,0], "to": [16,8,16], "faces": {
        "up": {"texture": {"u": 0.75, "v": 0, "su": 0.0625, "sv": 0.0625}},
        "down": {"texture": {"u": 0.75, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "down"},
        "north": {"texture": {"u": 0.75, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "north"},
        "south": {"texture": {"u": 0.75, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "south"},
        "east": {"texture": {"u": 0.75, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "east"},
        "west": {"texture": {"u": 0.75, "v": 0, "su": 0.0625, "sv": 0.0625}, "cullface": "west"}
    }}]}"#;
    format!(
        r#"{{
            "stone": {stone},
            "glass": {glass},
            "missing": {missing},
            "grass_block": {grass},
            "slab": {slab},
            "half": {{"elements": [{{"from": [0,0,0], "to": [8,16,16], "faces": {{
                "up": {{"texture": {{"u": 0.25, "v": 0, "su": 0.0625, "sv": 0.0625}}}}
            }}}}]}},
            "water": {{"textures": {{"particle": {{"u": 0.875, "v": 0, "su": 0.0625, "sv": 0.0625}}}}}},
            "lava": {{"textures": {{"particle": {{"u": 0.9375, "v": 0, "su": 0.0625, "sv": 0.0625}}}}}}
        }}"#,
        stone = cube(0.0),
        glass = cube(0.0625),
        missing = cube(0.125),
    )
}

const BLOCKSTATES: &str = r#"{
    "stone": {"variants": {"": {"model": "stone"}}},
    "glass": {"variants": {"": {"model": "glass"}}},
    "missing_texture": {"variants": {"": {"model": "missing"}}},
    "grass_block": {"variants": {"snowy=false": {"model": "grass_block"}, "snowy=true": {"model": "stone"}}},
    "stone_slab": {"variants": {"": {"model": "slab"}}},
    "water": {"variants": {"": {"model": "water"}}},
    "lava": {"variants": {"": {"model": "lava"}}},
    "half_block": {"variants": {
        "locked=true": {"model": "half", "y": 90, "uvlock": true},
        "locked=false": {"model": "half", "y": 90}
    }}
}"#;

pub fn meta() -> Arc<Metadata> {
    MetadataService::new().initialize_json("1.16.4", META, None).unwrap()
}

pub fn table() -> Arc<VariantTable> {
    Arc::new(VariantTable::from_json(BLOCKSTATES, Some(&models())).unwrap())
}

pub fn resolver() -> ModelResolver {
    ModelResolver::new(table(), 256, "missing_texture")
}

/// One loaded column whose y=0 section is filled by `f(x, y, z)`.
pub fn column(f: impl FnMut(usize, usize, usize) -> u32) -> ColumnPayload {
    ColumnPayload {
        sections: vec![SectionPayload::from_fn(0, f)],
        biomes: vec![1; 256],
        ..Default::default()
    }
}

pub fn rgb(c: u32) -> [f32; 3] {
    [
        ((c >> 16) & 0xFF) as f32 / 255.0,
        ((c >> 8) & 0xFF) as f32 / 255.0,
        (c & 0xFF) as f32 / 255.0,
    ]
}

pub fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
