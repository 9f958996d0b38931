use std::collections::HashMap;

use crate::Rgb;
use crate::config::{TintTableDef, TintsDef};

const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Biome-keyed color tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TintKind {
    Grass,
    Foliage,
    Water,
}

impl TintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TintKind::Grass => "grass",
            TintKind::Foliage => "foliage",
            TintKind::Water => "water",
        }
    }
}

#[derive(Clone, Debug, Default)]
struct KeyedTint {
    default: Option<Rgb>,
    by_key: HashMap<String, Rgb>,
}

impl KeyedTint {
    fn compile(def: &TintTableDef) -> Self {
        let mut by_key = HashMap::new();
        for entry in &def.data {
            let rgb = rgb_from_u32(entry.color);
            for k in &entry.keys {
                let key = match k {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                by_key.insert(key, rgb);
            }
        }
        Self {
            default: def.default.map(rgb_from_u32),
            by_key,
        }
    }

    fn get(&self, key: &str) -> Option<Rgb> {
        self.by_key.get(key).copied().or(self.default)
    }
}

/// Compiled tint tables of one version.
#[derive(Clone, Debug, Default)]
pub struct TintTables {
    grass: KeyedTint,
    foliage: KeyedTint,
    water: KeyedTint,
    redstone: KeyedTint,
    constant: KeyedTint,
}

impl TintTables {
    pub fn compile(def: &TintsDef) -> Self {
        Self {
            grass: KeyedTint::compile(&def.grass),
            foliage: KeyedTint::compile(&def.foliage),
            water: KeyedTint::compile(&def.water),
            redstone: KeyedTint::compile(&def.redstone),
            constant: KeyedTint::compile(&def.constant),
        }
    }

    /// Color for `biome`, falling back to the table default. None when neither exists.
    pub fn biome(&self, kind: TintKind, biome: &str) -> Option<Rgb> {
        match kind {
            TintKind::Grass => self.grass.get(biome),
            TintKind::Foliage => self.foliage.get(biome),
            TintKind::Water => self.water.get(biome),
        }
    }

    pub fn redstone(&self, power: u8) -> Option<Rgb> {
        self.redstone.get(&power.to_string())
    }

    /// Fixed per-block colors (birch and spruce leaves, lily pads).
    pub fn constant(&self, block: &str) -> Option<Rgb> {
        self.constant.by_key.get(block).copied()
    }
}

pub fn rgb_from_u32(c: u32) -> Rgb {
    [
        ((c >> 16) & 0xFF) as f32 / 255.0,
        ((c >> 8) & 0xFF) as f32 / 255.0,
        (c & 0xFF) as f32 / 255.0,
    ]
}

pub(crate) fn white() -> Rgb {
    WHITE
}
