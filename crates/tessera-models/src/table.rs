use std::collections::HashMap;
use std::sync::Arc;

use crate::bare_name;
use crate::config::{BlockStateDef, ModelDef, ModelRef, MultipartDef, OneOrMany, VariantDef};
use crate::error::{ModelError, Result};
use crate::model::{Model, ResolvedVariant};
use crate::predicate::{Predicate, parse_variant_key, variant_matches};

#[derive(Clone, Debug)]
pub struct VariantRule {
    pub conditions: Vec<(String, String)>,
    pub variant: ResolvedVariant,
}

#[derive(Clone, Debug)]
pub struct MultipartRule {
    pub when: Predicate,
    pub apply: ResolvedVariant,
}

/// Compiled blockstate definition of one block.
#[derive(Clone, Debug)]
pub enum BlockStates {
    Variants(Vec<VariantRule>),
    Multipart(Vec<MultipartRule>),
}

impl BlockStates {
    /// Models for a property set. None when a variants table has no matching key.
    pub fn select(&self, props: &[(Arc<str>, Arc<str>)]) -> Option<Vec<ResolvedVariant>> {
        match self {
            BlockStates::Variants(rules) => rules
                .iter()
                .find(|r| variant_matches(&r.conditions, props))
                .map(|r| vec![r.variant.clone()]),
            BlockStates::Multipart(parts) => Some(
                parts
                    .iter()
                    .filter(|p| p.when.matches(props))
                    .map(|p| p.apply.clone())
                    .collect(),
            ),
        }
    }
}

/// All blockstates of one asset version, keyed by bare block name.
#[derive(Clone, Debug, Default)]
pub struct VariantTable {
    states: HashMap<String, BlockStates>,
}

impl VariantTable {
    /// `blockstates` maps block names to definitions; `models` holds named models they may reference.
    pub fn from_json(blockstates: &str, models: Option<&str>) -> Result<Self> {
        let defs: HashMap<String, BlockStateDef> = serde_json::from_str(blockstates)?;
        let models: HashMap<String, ModelDef> = match models {
            Some(m) => serde_json::from_str(m)?,
            None => HashMap::new(),
        };
        Self::compile(&defs, &models)
    }

    pub fn compile(
        defs: &HashMap<String, BlockStateDef>,
        models: &HashMap<String, ModelDef>,
    ) -> Result<Self> {
        let mut named: HashMap<String, Arc<Model>> = HashMap::new();
        let mut states = HashMap::with_capacity(defs.len());
        for (name, def) in defs {
            let block = bare_name(name);
            let compiled = compile_block(block, def, models, &mut named)?;
            states.insert(block.to_string(), compiled);
        }
        log::debug!(target: "mesh", "variant table: blocks={} shared_models={}", states.len(), named.len());
        Ok(Self { states })
    }

    pub fn get(&self, name: &str) -> Option<&BlockStates> {
        self.states.get(bare_name(name))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn compile_block(
    block: &str,
    def: &BlockStateDef,
    models: &HashMap<String, ModelDef>,
    named: &mut HashMap<String, Arc<Model>>,
) -> Result<BlockStates> {
    if let Some(vars) = &def.variants {
        let mut rules = Vec::with_capacity(vars.len());
        for (key, value) in vars {
            let apply: OneOrMany<VariantDef> = serde_json::from_value(value.clone())?;
            let Some(first) = apply.first() else {
                continue;
            };
            rules.push(VariantRule {
                conditions: parse_variant_key(key),
                variant: compile_variant(block, first, models, named)?,
            });
        }
        return Ok(BlockStates::Variants(rules));
    }
    if let Some(parts) = &def.multipart {
        let mut rules = Vec::with_capacity(parts.len());
        for MultipartDef { when, apply } in parts {
            let Some(first) = apply.first() else {
                continue;
            };
            rules.push(MultipartRule {
                when: Predicate::parse(block, when.as_ref())?,
                apply: compile_variant(block, first, models, named)?,
            });
        }
        return Ok(BlockStates::Multipart(rules));
    }
    Err(ModelError::Empty {
        block: block.to_string(),
    })
}

fn compile_variant(
    block: &str,
    def: &VariantDef,
    models: &HashMap<String, ModelDef>,
    named: &mut HashMap<String, Arc<Model>>,
) -> Result<ResolvedVariant> {
    let model = match &def.model {
        ModelRef::Inline(m) => Arc::new(Model::compile(block, &flatten(block, m, models)?)?),
        ModelRef::Named(name) => {
            let key = bare_name(name).to_string();
            match named.get(&key) {
                Some(m) => m.clone(),
                None => {
                    let src = named_model(block, models, name)?;
                    let m = Arc::new(Model::compile(block, &flatten(block, src, models)?)?);
                    named.insert(key, m.clone());
                    m
                }
            }
        }
    };
    Ok(ResolvedVariant::new(model, def))
}

const MAX_PARENT_DEPTH: usize = 32;

fn named_model<'a>(block: &str, models: &'a HashMap<String, ModelDef>, name: &str) -> Result<&'a ModelDef> {
    models
        .get(bare_name(name))
        .or_else(|| models.get(name))
        .ok_or_else(|| ModelError::UnknownModel {
            block: block.to_string(),
            model: name.to_string(),
        })
}

/// Folds a model's parent chain into one definition. The nearest model that
/// declares elements supplies them; textures merge with the child winning.
fn flatten(block: &str, def: &ModelDef, models: &HashMap<String, ModelDef>) -> Result<ModelDef> {
    let mut out = def.clone();
    let mut next = def.parent.clone();
    let mut depth = 0;
    while let Some(name) = next {
        depth += 1;
        if depth > MAX_PARENT_DEPTH {
            return Err(ModelError::ParentChain {
                block: block.to_string(),
                model: name,
            });
        }
        let parent = named_model(block, models, &name)?;
        if out.elements.is_empty() {
            out.elements = parent.elements.clone();
        }
        if out.ao.is_none() {
            out.ao = parent.ao;
        }
        for (k, v) in &parent.textures {
            out.textures.entry(k.clone()).or_insert_with(|| v.clone());
        }
        next = parent.parent.clone();
    }
    out.parent = None;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(kv: &[(&str, &str)]) -> Vec<(Arc<str>, Arc<str>)> {
        kv.iter().map(|(k, v)| (Arc::from(*k), Arc::from(*v))).collect()
    }

    const MODELS: &str = r#"{
        "cube": {"elements": [{"from": [0,0,0], "to": [16,16,16], "faces": {}}]},
        "post": {"elements": [{"from": [6,0,6], "to": [10,16,10], "faces": {}}]},
        "side": {"elements": [{"from": [7,12,0], "to": [9,15,9], "faces": {}}]}
    }"#;

    #[test]
    fn first_matching_variant_wins() {
        let t = VariantTable::from_json(
            r#"{"minecraft:furnace": {"variants": {
                "facing=north": {"model": "cube"},
                "facing=east": {"model": "cube", "y": 90},
                "": {"model": "post"}
            }}}"#,
            Some(MODELS),
        )
        .unwrap();
        let bs = t.get("furnace").unwrap();
        let east = bs.select(&props(&[("facing", "east")])).unwrap();
        assert_eq!(east.len(), 1);
        assert_eq!(east[0].y, 90);
        let other = bs.select(&props(&[("facing", "down")])).unwrap();
        assert_eq!(other[0].model.elements[0].from.x, 6.0 / 16.0);
    }

    #[test]
    fn multipart_accumulates() {
        let t = VariantTable::from_json(
            r#"{"oak_fence": {"multipart": [
                {"apply": {"model": "post"}},
                {"when": {"north": "true"}, "apply": {"model": "side"}},
                {"when": {"east": "true"}, "apply": [{"model": "side", "y": 90}, {"model": "post"}]}
            ]}}"#,
            Some(MODELS),
        )
        .unwrap();
        let bs = t.get("oak_fence").unwrap();
        assert_eq!(bs.select(&props(&[("north", "false"), ("east", "false")])).unwrap().len(), 1);
        let both = bs.select(&props(&[("north", "true"), ("east", "true")])).unwrap();
        assert_eq!(both.len(), 3);
        assert_eq!(both[2].y, 90);
        // named models are compiled once and shared
        assert!(Arc::ptr_eq(&both[1].model, &both[2].model));
    }

    #[test]
    fn unknown_model_is_an_error() {
        let err = VariantTable::from_json(r#"{"x": {"variants": {"": {"model": "nope"}}}}"#, None)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownModel { .. }));
    }

    #[test]
    fn parent_chain_supplies_elements_and_textures() {
        let models = r#"{
            "block/block": {"ambientocclusion": false,
                            "textures": {"particle": {"u": 0.5, "v": 0, "su": 0.0625, "sv": 0.0625}}},
            "block/cube": {"parent": "block/block",
                           "elements": [{"from": [0,0,0], "to": [16,16,16], "faces": {}}]},
            "stone": {"parent": "minecraft:block/cube",
                      "textures": {"particle": {"u": 0.25, "v": 0, "su": 0.0625, "sv": 0.0625}}},
            "plank": {"parent": "block/cube"}
        }"#;
        let t = VariantTable::from_json(
            r#"{"stone": {"variants": {"": {"model": "stone"}}},
                "planks": {"variants": {"": {"model": "plank"}}},
                "post": {"variants": {"": {"model": {"parent": "block/cube", "ambientocclusion": true}}}}}"#,
            Some(models),
        )
        .unwrap();
        let stone = &t.get("stone").unwrap().select(&[]).unwrap()[0].model;
        assert_eq!(stone.elements.len(), 1);
        assert!(!stone.ambient_occlusion);
        assert_eq!(stone.particle.unwrap().u, 0.25);
        let plank = &t.get("planks").unwrap().select(&[]).unwrap()[0].model;
        assert_eq!(plank.particle.unwrap().u, 0.5);
        let post = &t.get("post").unwrap().select(&[]).unwrap()[0].model;
        assert_eq!(post.elements.len(), 1);
        assert!(post.ambient_occlusion);
    }

    #[test]
    fn broken_parent_chains_are_errors() {
        let cyclic = r#"{"a": {"parent": "b"}, "b": {"parent": "a"}}"#;
        let err = VariantTable::from_json(r#"{"x": {"variants": {"": {"model": "a"}}}}"#, Some(cyclic))
            .unwrap_err();
        assert!(matches!(err, ModelError::ParentChain { .. }));
        let dangling = r#"{"a": {"parent": "block/nowhere"}}"#;
        let err = VariantTable::from_json(r#"{"x": {"variants": {"": {"model": "a"}}}}"#, Some(dangling))
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownModel { .. }));
    }

    #[test]
    fn no_matching_variant() {
        let t = VariantTable::from_json(
            r#"{"lever": {"variants": {"powered=true": {"model": "cube"}}}}"#,
            Some(MODELS),
        )
        .unwrap();
        assert!(t.get("lever").unwrap().select(&props(&[("powered", "false")])).is_none());
    }
}
