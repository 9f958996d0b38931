use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{BiomeDef, BlockDef, BoundingBox, VersionLookup, VersionedData};
use crate::diagnostics::MissingFieldLog;
use crate::error::{MetaError, Result};
use crate::tint::{TintKind, TintTables, white};
use crate::{Rgb, StateId, is_air_name};

#[derive(Clone, Debug)]
pub struct PropLayout {
    pub name: Arc<str>,
    pub values: Vec<Arc<str>>,
}

#[derive(Clone, Debug)]
pub struct BlockInfo {
    pub id: u32,
    pub name: Arc<str>,
    pub transparent: bool,
    pub full_cube: bool,
    pub material: Option<Arc<str>>,
    pub min_state_id: StateId,
    pub max_state_id: StateId,
    pub props: Vec<PropLayout>,
    pub legacy: bool,
}

impl BlockInfo {
    #[inline]
    pub fn is_air(&self) -> bool {
        is_air_name(&self.name)
    }
}

/// Decoded view of one block state id.
#[derive(Clone, Debug)]
pub struct StateInfo {
    pub block: usize,
    pub properties: Vec<(Arc<str>, Arc<str>)>,
    // "k=v,k=v" in declaration order; memo key for variant resolution
    pub props_key: Arc<str>,
    // Raw metadata nibble on legacy versions
    pub legacy_meta: Option<u8>,
}

impl StateInfo {
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| &**k == name)
            .map(|(_, v)| &**v)
    }
}

#[derive(Clone, Debug)]
pub struct BiomeInfo {
    pub id: u16,
    pub name: Arc<str>,
    pub temperature: f32,
    pub rainfall: f32,
}

/// Immutable tables for one game version.
#[derive(Debug)]
pub struct Metadata {
    version: String,
    blocks: Vec<BlockInfo>,
    by_name: HashMap<Arc<str>, usize>,
    states: Vec<Option<StateInfo>>,
    biomes: HashMap<u16, BiomeInfo>,
    tints: TintTables,
    aliases: HashMap<String, String>,
    missing: MissingFieldLog,
}

impl Metadata {
    pub fn build(version: &str, data: &VersionedData, lookup: &VersionLookup) -> Result<Self> {
        let mut blocks = Vec::with_capacity(data.blocks.len());
        let mut by_name = HashMap::with_capacity(data.blocks.len());
        let mut states: Vec<Option<StateInfo>> = Vec::new();
        for def in &data.blocks {
            let idx = blocks.len();
            let info = compile_block(def)?;
            let hi = info.max_state_id as usize;
            if states.len() <= hi {
                states.resize(hi + 1, None);
            }
            for sid in info.min_state_id..=info.max_state_id {
                states[sid as usize] = Some(decode_state(idx, &info, sid));
            }
            by_name.insert(info.name.clone(), idx);
            blocks.push(info);
        }
        let biomes = data
            .biomes
            .iter()
            .map(|b: &BiomeDef| {
                (
                    b.id,
                    BiomeInfo {
                        id: b.id,
                        name: Arc::from(b.name.as_str()),
                        temperature: b.temperature,
                        rainfall: b.rainfall,
                    },
                )
            })
            .collect();
        log::info!(
            target: "meta",
            "version={} blocks={} states={} biomes={} aliases={}",
            version,
            blocks.len(),
            states.iter().filter(|s| s.is_some()).count(),
            data.biomes.len(),
            lookup.aliases.len()
        );
        Ok(Self {
            version: version.to_string(),
            blocks,
            by_name,
            states,
            biomes,
            tints: TintTables::compile(&data.tints),
            aliases: lookup.aliases.clone(),
            missing: MissingFieldLog::new(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn blocks(&self) -> &[BlockInfo] {
        &self.blocks
    }

    pub fn block(&self, idx: usize) -> Option<&BlockInfo> {
        self.blocks.get(idx)
    }

    /// Decoded state; unknown ids are logged once and yield None.
    pub fn state(&self, id: StateId) -> Option<&StateInfo> {
        let s = self.states.get(id as usize).and_then(|s| s.as_ref());
        if s.is_none() {
            self.missing.note(&format!("blockStates[{}]", id));
        }
        s
    }

    pub fn block_of_state(&self, id: StateId) -> Option<&BlockInfo> {
        self.state(id).and_then(|s| self.blocks.get(s.block))
    }

    /// Follows version aliases before looking the name up.
    pub fn block_by_name(&self, name: &str) -> Option<&BlockInfo> {
        let name = self.canonical_name(name);
        match self.by_name.get(name) {
            Some(&i) => self.blocks.get(i),
            None => {
                self.missing.note(&format!("blocksByName[{}]", name));
                None
            }
        }
    }

    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Air family only; unknown ids are not air.
    pub fn is_air(&self, id: StateId) -> bool {
        self.block_of_state(id).is_some_and(BlockInfo::is_air)
    }

    pub fn biome(&self, id: u16) -> Option<&BiomeInfo> {
        let b = self.biomes.get(&id);
        if b.is_none() {
            self.missing.note(&format!("biomes[{}]", id));
        }
        b
    }

    /// Biome tint, white when neither the biome nor a table default is known.
    pub fn biome_tint(&self, kind: TintKind, biome: u16) -> Rgb {
        let name = self.biome(biome).map(|b| b.name.clone());
        let found = name.as_deref().and_then(|n| self.tints.biome(kind, n));
        match found {
            Some(c) => c,
            None => {
                self.missing
                    .note(&format!("tints.{}[{}]", kind.as_str(), name.as_deref().unwrap_or("?")));
                white()
            }
        }
    }

    pub fn redstone_tint(&self, power: u8) -> Rgb {
        self.tints.redstone(power).unwrap_or_else(|| {
            self.missing.note(&format!("tints.redstone[{}]", power));
            white()
        })
    }

    pub fn constant_tint(&self, block: &str) -> Option<Rgb> {
        self.tints.constant(block)
    }

    pub fn tints(&self) -> &TintTables {
        &self.tints
    }

    pub fn missing_fields(&self) -> &MissingFieldLog {
        &self.missing
    }
}

fn compile_block(def: &BlockDef) -> Result<BlockInfo> {
    let mut props = Vec::with_capacity(def.states.len());
    for p in &def.states {
        let values = p.resolved_values();
        if values.is_empty() {
            return Err(MetaError::EmptyProperty {
                name: def.name.clone(),
                prop: p.name.clone(),
            });
        }
        props.push(PropLayout {
            name: Arc::from(p.name.as_str()),
            values: values.iter().map(|v| Arc::from(v.as_str())).collect(),
        });
    }
    let span: u64 = props.iter().map(|p| p.values.len() as u64).product();
    let legacy = def.min_state_id.is_none();
    let (min, max) = match (def.min_state_id, def.max_state_id) {
        (Some(min), Some(max)) => {
            if max < min || (max - min) as u64 + 1 != span {
                return Err(MetaError::StateRange {
                    name: def.name.clone(),
                    min,
                    max,
                    expected: span,
                });
            }
            (min, max)
        }
        (Some(min), None) => (min, min + span.saturating_sub(1) as u32),
        // Legacy numbering: id << 4 | meta
        _ => (def.id << 4, (def.id << 4) | 0xF),
    };
    Ok(BlockInfo {
        id: def.id,
        name: Arc::from(def.name.as_str()),
        transparent: def.transparent,
        full_cube: def.full_cube.unwrap_or(def.bounding_box == BoundingBox::Block),
        material: def.material.as_deref().map(Arc::from),
        min_state_id: min,
        max_state_id: max,
        props,
        legacy,
    })
}

// Mixed radix, last declared property varies fastest.
fn decode_state(block: usize, info: &BlockInfo, sid: StateId) -> StateInfo {
    let mut rest = sid - info.min_state_id;
    let mut picked: Vec<usize> = vec![0; info.props.len()];
    for (i, p) in info.props.iter().enumerate().rev() {
        let n = p.values.len() as u32;
        picked[i] = (rest % n) as usize;
        rest /= n;
    }
    let properties: Vec<(Arc<str>, Arc<str>)> = info
        .props
        .iter()
        .zip(&picked)
        .map(|(p, &v)| (p.name.clone(), p.values[v].clone()))
        .collect();
    let key = properties
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",");
    StateInfo {
        block,
        properties,
        props_key: Arc::from(key.as_str()),
        legacy_meta: info.legacy.then_some((sid & 0xF) as u8),
    }
}
