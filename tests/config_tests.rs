use std::io::Write;
use std::time::Duration;

use tessera::{ConfigError, TesseraConfig};

#[test]
fn parses_every_field() {
    let cfg = TesseraConfig::from_toml_str(
        r#"
        workers = 3
        tick_ms = 20
        greedy_merge = true
        ambient_occlusion = false
        cull_unloaded_neighbors = true
        variant_cache_capacity = 128
        missing_block = "barrier"
        "#,
    )
    .unwrap();
    assert_eq!(cfg.workers, 3);
    let d = cfg.dispatcher_config();
    assert_eq!(d.workers, 3);
    assert_eq!(d.tick, Duration::from_millis(20));
    assert!(d.worker.mesh.greedy_merge);
    assert!(!d.worker.mesh.ambient_occlusion);
    assert!(d.worker.mesh.cull_unloaded_neighbors);
    assert_eq!(d.worker.variant_cache_capacity, 128);
    assert_eq!(d.worker.missing_block, "barrier");
}

#[test]
fn partial_document_keeps_defaults() {
    let cfg = TesseraConfig::from_toml_str("greedy_merge = true").unwrap();
    let def = TesseraConfig::default();
    assert!(cfg.greedy_merge);
    assert_eq!(cfg.tick_ms, def.tick_ms);
    assert_eq!(cfg.missing_block, "missing_texture");
    assert!(cfg.ambient_occlusion);
}

#[test]
fn unknown_keys_and_bad_types_are_rejected() {
    assert!(matches!(
        TesseraConfig::from_toml_str("greedy = true"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        TesseraConfig::from_toml_str("workers = \"many\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn loads_from_disk() {
    let path = std::env::temp_dir().join(format!("tessera-config-{}.toml", std::process::id()));
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "workers = 5").unwrap();
    drop(f);
    let cfg = TesseraConfig::from_path(&path).unwrap();
    assert_eq!(cfg.workers, 5);
    std::fs::remove_file(&path).unwrap();

    let missing = TesseraConfig::from_path(path.with_extension("absent"));
    assert!(matches!(missing, Err(ConfigError::Io { .. })));
}
