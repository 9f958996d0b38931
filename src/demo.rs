//! Synthetic block tables and terrain for the headless binary and smoke tests.

use tessera_world::{ColumnPayload, SectionPayload};

use crate::error::Result;
use crate::renderer::WorldRenderer;

pub const VERSION: &str = "1.16.4";

pub mod state {
    pub const AIR: u32 = 0;
    pub const STONE: u32 = 1;
    pub const DIRT: u32 = 2;
    pub const GRASS_SNOWY: u32 = 3;
    pub const GRASS: u32 = 4;
    /// Water source; flowing levels follow at `WATER + level`.
    pub const WATER: u32 = 5;
    pub const GLASS: u32 = 21;
    pub const MISSING: u32 = 22;
}

pub const VERSIONED_DATA: &str = r#"{
    "blocks": [
        {"id": 0, "name": "air", "minStateId": 0, "maxStateId": 0, "transparent": true, "boundingBox": "empty"},
        {"id": 1, "name": "stone", "minStateId": 1, "maxStateId": 1},
        {"id": 3, "name": "dirt", "minStateId": 2, "maxStateId": 2},
        {"id": 2, "name": "grass_block", "minStateId": 3, "maxStateId": 4,
         "states": [{"name": "snowy", "type": "bool"}]},
        {"id": 9, "name": "water", "minStateId": 5, "maxStateId": 20, "transparent": true, "boundingBox": "empty",
         "states": [{"name": "level", "type": "int", "numValues": 16}]},
        {"id": 20, "name": "glass", "minStateId": 21, "maxStateId": 21, "transparent": true},
        {"id": 99, "name": "missing_texture", "minStateId": 22, "maxStateId": 22}
    ],
    "biomes": [{"id": 1, "name": "plains", "temperature": 0.8, "rainfall": 0.4}],
    "tints": {
        "grass": {"default": 9551193},
        "foliage": {"default": 7842607},
        "water": {"default": 4159204}
    }
}"#;

pub const BLOCKSTATES: &str = r#"{
    "stone": {"variants": {"": {"model": "stone"}}},
    "dirt": {"variants": {"": {"model": "dirt"}}},
    "grass_block": {"variants": {
        "snowy=false": {"model": "grass_block"},
        "snowy=true": {"model": "dirt"}
    }},
    "water": {"variants": {"": {"model": "water"}}},
    "glass": {"variants": {"": {"model": "glass"}}},
    "missing_texture": {"variants": {"": {"model": "missing"}}}
}"#;

fn tile(u: f32, v: f32) -> String {
    format!(r#"{{"u": {u}, "v": {v}, "su": 0.0625, "sv": 0.0625}}"#)
}

fn cube(u: f32, v: f32, up_tint: bool) -> String {
    let faces: Vec<String> = ["up", "down", "north", "south", "east", "west"]
        .iter()
        .map(|f| {
            let tint = if up_tint && *f == "up" { r#", "tintindex": 0"# } else { "" };
            format!(r#""{f}": {{"texture": {}, "cullface": "{f}"{tint}}}"#, tile(u, v))
        })
        .collect();
    format!(
        r#"{{"elements": [{{"from": [0,0,0], "to": [16,16,16], "faces": {{{}}}}}]}}"#,
        faces.join(",")
    )
}

pub fn models() -> String {
    format!(
        r#"{{
            "stone": {},
            "dirt": {},
            "grass_block": {},
            "glass": {},
            "missing": {},
            "water": {{"textures": {{"particle": {}}}}}
        }}"#,
        cube(0.0, 0.0, false),
        cube(0.0625, 0.0, false),
        cube(0.125, 0.0, true),
        cube(0.1875, 0.0, false),
        cube(0.9375, 0.9375, false),
        tile(0.25, 0.0),
    )
}

/// Loads the synthetic version and blockstate tables.
pub fn load_tables(r: &mut WorldRenderer) -> Result<()> {
    r.set_version_json(VERSION, VERSIONED_DATA, None)?;
    r.set_block_states_json(BLOCKSTATES, Some(&models()))
}

/// Flat column: stone below y=4, two dirt layers, grass on top at y=6. Columns
/// whose grid coordinates are both odd hold a shallow pond and a glass post.
pub fn terrain_column(cx: i32, cz: i32) -> ColumnPayload {
    use state::*;
    let pond = cx.rem_euclid(2) == 1 && cz.rem_euclid(2) == 1;
    let section = SectionPayload::from_fn(0, |x, y, z| {
        let in_pond = pond && (4..12).contains(&x) && (4..12).contains(&z);
        match y {
            0..=3 => STONE,
            4 | 5 => DIRT,
            6 if in_pond => WATER,
            6 => GRASS,
            7..=9 if x == 1 && z == 1 => GLASS,
            _ => AIR,
        }
    });
    ColumnPayload {
        sections: vec![section],
        biomes: vec![1; 256],
        ..Default::default()
    }
}
