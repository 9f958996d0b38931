//! Incremental section meshing for block worlds: host-facing facade over the mesh workers.
#![forbid(unsafe_code)]

pub mod config;
pub mod demo;
pub mod error;
pub mod renderer;

pub use config::{ConfigError, TesseraConfig};
pub use error::{Error, Result};
pub use renderer::{RenderStats, WorldRenderer};

pub use tessera_geom as geom;
pub use tessera_mesh_cpu as mesh;
pub use tessera_meta as meta;
pub use tessera_models as models;
pub use tessera_runtime as runtime;
pub use tessera_world as world;
