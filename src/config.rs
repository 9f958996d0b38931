use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tessera_mesh_cpu::MeshOptions;
use tessera_runtime::{DispatcherConfig, WorkerConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime settings, read from TOML. Every field is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TesseraConfig {
    /// Mesh worker count, fixed at startup.
    pub workers: usize,
    /// Period of each worker's remesh tick.
    pub tick_ms: u64,
    pub greedy_merge: bool,
    pub ambient_occlusion: bool,
    pub cull_unloaded_neighbors: bool,
    pub variant_cache_capacity: usize,
    pub missing_block: String,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            tick_ms: 50,
            greedy_merge: false,
            ambient_occlusion: true,
            cull_unloaded_neighbors: false,
            variant_cache_capacity: 4096,
            missing_block: "missing_texture".to_string(),
        }
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

impl TesseraConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            ambient_occlusion: self.ambient_occlusion,
            greedy_merge: self.greedy_merge,
            cull_unloaded_neighbors: self.cull_unloaded_neighbors,
        }
    }

    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            workers: self.workers.max(1),
            tick: Duration::from_millis(self.tick_ms.max(1)),
            worker: WorkerConfig {
                mesh: self.mesh_options(),
                variant_cache_capacity: self.variant_cache_capacity.max(1),
                missing_block: self.missing_block.clone(),
            },
        }
    }
}
