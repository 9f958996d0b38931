//! Version-specific block, biome, and tint tables for the meshing workers.
#![forbid(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod metadata;
pub mod service;
pub mod tint;

pub use config::{BiomeDef, BlockDef, BoundingBox, PropKind, StatePropDef, TintsDef, VersionLookup, VersionedData};
pub use diagnostics::MissingFieldLog;
pub use error::{MetaError, Result};
pub use metadata::{BiomeInfo, BlockInfo, Metadata, StateInfo};
pub use service::MetadataService;
pub use tint::{TintKind, TintTables};

pub type StateId = u32;
pub type Rgb = [f32; 3];

/// State id of plain air in every supported version.
pub const AIR_STATE: StateId = 0;

/// True for `air`, `cave_air`, `void_air` and any other `*_air` block name.
#[inline]
pub fn is_air_name(name: &str) -> bool {
    name == "air" || name.ends_with("_air")
}
