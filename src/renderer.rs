use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use tessera_mesh_cpu::SectionGeometry;
use tessera_meta::{Metadata, StateId, VersionLookup, VersionedData};
use tessera_models::VariantTable;
use tessera_runtime::{Dispatcher, WorkerEvent};
use tessera_world::{BlockPos, ColumnKey, ColumnPayload, SectionKey};

use crate::config::TesseraConfig;
use crate::error::Result;

/// Aggregate counters over the live section store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub sections: usize,
    pub vertices: usize,
    pub opaque_triangles: usize,
    pub transparent_triangles: usize,
    pub geometry_events: u64,
    pub finished_events: u64,
    pub diagnostics: u64,
}

/// What a host render loop talks to: forwards world changes to the mesh workers
/// and keeps the latest geometry of every section.
pub struct WorldRenderer {
    dispatcher: Dispatcher,
    sections: HashMap<SectionKey, SectionGeometry>,
    stats: RenderStats,
    last_diagnostic: Option<String>,
}

impl WorldRenderer {
    pub fn new(cfg: &TesseraConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(cfg.dispatcher_config())?,
            sections: HashMap::new(),
            stats: RenderStats::default(),
            last_diagnostic: None,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn set_version(
        &mut self,
        version: &str,
        data: &VersionedData,
        lookup: &VersionLookup,
    ) -> Result<Arc<Metadata>> {
        Ok(self.dispatcher.set_metadata(version, data, lookup)?)
    }

    pub fn set_version_json(
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
        self.set_version(version, &data, &lookup)
    }

    pub fn set_block_states(&mut self, table: Arc<VariantTable>) -> Result<()> {
        Ok(self.dispatcher.set_block_states(table)?)
    }

    pub fn set_block_states_json(&mut self, blockstates: &str, models: Option<&str>) -> Result<()> {
        let table = VariantTable::from_json(blockstates, models)?;
        self.set_block_states(Arc::new(table))
    }

    pub fn add_column(&mut self, x: i32, z: i32, payload: ColumnPayload) -> Result<()> {
        Ok(self.dispatcher.add_column(x, z, payload)?)
    }

    /// Unloads the column and drops its sections from the store right away.
    pub fn remove_column(&mut self, x: i32, z: i32) -> Result<()> {
        self.dispatcher.remove_column(x, z)?;
        let col = ColumnKey::containing(x, z);
        self.sections.retain(|k, _| k.column() != col);
        Ok(())
    }

    pub fn set_block_state_id(&mut self, pos: BlockPos, state: StateId) -> Result<()> {
        Ok(self.dispatcher.set_block_state_id(pos, state)?)
    }

    /// Applies everything the workers have produced. Returns the number of events.
    pub fn update(&mut self) -> usize {
        let events = self.dispatcher.poll();
        let n = events.len();
        for ev in events {
            self.apply(ev);
        }
        n
    }

    fn apply(&mut self, ev: WorkerEvent) {
        match ev {
            WorkerEvent::Geometry { key, geometry, .. } => {
                self.stats.geometry_events += 1;
                if geometry.is_empty() {
                    self.sections.remove(&key);
                } else {
                    self.sections.insert(key, geometry);
                }
            }
            WorkerEvent::SectionFinished { .. } => self.stats.finished_events += 1,
            WorkerEvent::Debug { message, .. } => {
                self.stats.diagnostics += 1;
                self.last_diagnostic = Some(message);
            }
        }
    }

    /// Blocks until all pending sections are meshed, then applies the results.
    pub fn wait_for_chunks_to_render(&mut self, timeout: Duration) -> Result<()> {
        let waited = self.dispatcher.wait_for_chunks_to_render(timeout);
        self.update();
        Ok(waited?)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.dispatcher.reset()?;
        self.sections.clear();
        Ok(())
    }

    pub fn section(&self, key: SectionKey) -> Option<&SectionGeometry> {
        self.sections.get(&key)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&SectionKey, &SectionGeometry)> {
        self.sections.iter()
    }

    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    pub fn stats(&self) -> RenderStats {
        let mut s = self.stats;
        s.sections = self.sections.len();
        s.vertices = 0;
        s.opaque_triangles = 0;
        s.transparent_triangles = 0;
        for g in self.sections.values() {
            s.vertices += g.opaque.vertex_count() + g.transparent.vertex_count();
            s.opaque_triangles += g.opaque.triangle_count();
            s.transparent_triangles += g.transparent.triangle_count();
        }
        s
    }
}
