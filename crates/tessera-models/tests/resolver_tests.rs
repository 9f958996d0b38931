use std::sync::Arc;

use tessera_meta::MetadataService;
use tessera_models::{ModelResolver, VariantTable};

const BLOCKSTATES: &str = r#"{
    "stone": {"variants": {"": {"model": "cube"}}},
    "missing_texture": {"variants": {"": {"model": "cube", "x": 90}}},
    "oak_log": {"variants": {
        "axis=y": {"model": "cube"},
        "axis=x": {"model": "cube", "x": 90, "y": 90},
        "axis=z": {"model": "cube", "x": 90}
    }}
}"#;

const MODELS: &str = r#"{
    "cube": {"elements": [{"from": [0,0,0], "to": [16,16,16], "faces": {}}]}
}"#;

const META: &str = r#"{
    "blocks": [
        {"id": 0, "name": "air", "minStateId": 0, "maxStateId": 0, "transparent": true, "boundingBox": "empty"},
        {"id": 1, "name": "stone", "minStateId": 1, "maxStateId": 1},
        {"id": 2, "name": "log", "minStateId": 2, "maxStateId": 4,
         "states": [{"name": "axis", "type": "enum", "values": ["x", "y", "z"]}]},
        {"id": 3, "name": "strange_thing", "minStateId": 5, "maxStateId": 5},
        {"id": 4, "name": "void_air", "minStateId": 6, "maxStateId": 6, "transparent": true, "boundingBox": "empty"}
    ]
}"#;

fn resolver(capacity: usize) -> ModelResolver {
    let table = VariantTable::from_json(BLOCKSTATES, Some(MODELS)).unwrap();
    ModelResolver::new(Arc::new(table), capacity, "missing_texture")
}

fn meta() -> Arc<tessera_meta::Metadata> {
    MetadataService::new()
        .initialize_json("1.12", META, Some(r#"{"aliases": {"log": "oak_log"}}"#))
        .unwrap()
}

#[test]
fn air_family_resolves_to_nothing() {
    let mut r = resolver(16);
    let m = meta();
    assert!(r.resolve_state(&m, 0).is_empty());
    assert!(r.resolve_state(&m, 6).is_empty());
    assert!(r.resolve("minecraft:cave_air", &[], "").is_empty());
}

#[test]
fn alias_used_when_primary_name_missing() {
    let mut r = resolver(16);
    let m = meta();
    let x = r.resolve_state(&m, 2);
    assert_eq!((x[0].x, x[0].y), (90, 90));
    let z = r.resolve_state(&m, 4);
    assert_eq!((z[0].x, z[0].y), (90, 0));
}

#[test]
fn unknown_block_falls_back_to_missing_texture() {
    let mut r = resolver(16);
    let m = meta();
    let res = r.resolve_state(&m, 5);
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].x, 90);
    assert_eq!(r.stats().fallbacks, 1);
    let unknown = r.resolve_state(&m, 4242);
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].x, 90);
    assert_eq!(r.stats().fallbacks, 2);
}

#[test]
fn memoized_per_name_and_props() {
    let mut r = resolver(16);
    let m = meta();
    let a = r.resolve_state(&m, 1);
    let b = r.resolve_state(&m, 1);
    assert!(Arc::ptr_eq(&a, &b));
    let s = r.stats();
    assert_eq!((s.hits, s.misses, s.entries), (1, 1, 1));
    r.clear();
    assert_eq!(r.stats().entries, 0);
    assert_eq!(r.stats().evictions, 1);
}

#[test]
fn bounded_cache_evicts_least_recent() {
    let mut r = resolver(2);
    let m = meta();
    r.resolve_state(&m, 2);
    r.resolve_state(&m, 3);
    r.resolve_state(&m, 4);
    let s = r.stats();
    assert_eq!(s.entries, 2);
    assert_eq!(s.evictions, 1);
    r.resolve_state(&m, 2);
    assert_eq!(r.stats().misses, 4);
}
