use std::sync::Arc;

use crate::config::{VersionLookup, VersionedData};
use crate::error::Result;
use crate::metadata::Metadata;

/// Owns the active version's tables and hands out shared read-only snapshots.
#[derive(Debug, Default)]
pub struct MetadataService {
    current: Option<Arc<Metadata>>,
}

impl MetadataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previously loaded version. On error the old tables stay active.
    pub fn initialize(
        &mut self,
        version: &str,
        data: &VersionedData,
        lookup: &VersionLookup,
    ) -> Result<Arc<Metadata>> {
        let meta = Arc::new(Metadata::build(version, data, lookup)?);
        if let Some(prev) = &self.current {
            if prev.version() != version {
                log::info!(target: "meta", "switching version {} -> {}", prev.version(), version);
            }
        }
        self.current = Some(meta.clone());
        Ok(meta)
    }

    pub fn initialize_json(
        &mut self,
        version: &str,
        data: &str,
        lookup: Option<&str>,
    ) -> Result<Arc<Metadata>> {
        let data: VersionedData = serde_json::from_str(data)?;
        let lookup: VersionLookup = match lookup {
            Some(s) => serde_json::from_str(s)?,
            None => VersionLookup::default(),
        };
        self.initialize(version, &data, &lookup)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&Arc<Metadata>> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }
}
