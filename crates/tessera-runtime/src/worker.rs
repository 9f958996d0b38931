use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, select, tick};
use hashbrown::HashMap;
use tessera_mesh_cpu::{MeshError, MeshOptions, build_section};
use tessera_meta::Metadata;
use tessera_models::{ModelResolver, VariantTable};
use tessera_world::{SectionKey, WorldMirror};

use crate::message::{WorkerEvent, WorkerMsg};

#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub mesh: MeshOptions,
    pub variant_cache_capacity: usize,
    pub missing_block: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            mesh: MeshOptions::default(),
            variant_cache_capacity: 4096,
            missing_block: "missing_texture".to_string(),
        }
    }
}

/// One mesh worker: a private world mirror, a resolver, and the dirty set it
/// drains on every tick. Driven either directly (`handle` + `tick`) or by `run`.
pub struct MeshWorker {
    id: usize,
    cfg: WorkerConfig,
    world: WorldMirror,
    meta: Option<Arc<Metadata>>,
    resolver: Option<ModelResolver>,
    dirty: HashMap<SectionKey, u32>,
    epoch: u64,
}

impl MeshWorker {
    pub fn new(id: usize, cfg: WorkerConfig) -> Self {
        Self {
            id,
            cfg,
            world: WorldMirror::new(),
            meta: None,
            resolver: None,
            dirty: HashMap::new(),
            epoch: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn world(&self) -> &WorldMirror {
        &self.world
    }

    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_dirty(&self, key: SectionKey) -> bool {
        self.dirty.contains_key(&key)
    }

    /// Applies one message. Unmarking a section retires its marks right away.
    pub fn handle(&mut self, msg: WorkerMsg) -> Option<WorkerEvent> {
        match msg {
            WorkerMsg::Metadata(meta) => {
                log::debug!(target: "runtime", "worker {} metadata {}", self.id, meta.version());
                self.meta = Some(meta);
                if let Some(r) = &mut self.resolver {
                    r.clear();
                }
            }
            WorkerMsg::BlockStates(table) => self.set_table(table),
            WorkerMsg::Chunk { x, z, payload } => self.world.add_column(x, z, &payload),
            WorkerMsg::UnloadChunk { x, z } => {
                self.world.remove_column(x, z);
            }
            WorkerMsg::BlockUpdate { pos, state } => {
                self.world.set_block_state_id(pos, state);
            }
            WorkerMsg::Dirty { key, active: true } => *self.dirty.entry(key).or_insert(0) += 1,
            WorkerMsg::Dirty { key, active: false } => {
                if let Some(marks) = self.dirty.remove(&key) {
                    return Some(WorkerEvent::SectionFinished {
                        key,
                        marks,
                        epoch: self.epoch,
                    });
                }
            }
            WorkerMsg::Reset { epoch } => {
                log::debug!(target: "runtime", "worker {} reset, dropped {} dirty", self.id, self.dirty.len());
                self.world.clear();
                self.dirty.clear();
                self.epoch = epoch;
            }
        }
        None
    }

    fn set_table(&mut self, table: Arc<VariantTable>) {
        match &mut self.resolver {
            Some(r) => r.set_table(table),
            None => {
                self.resolver = Some(ModelResolver::new(
                    table,
                    self.cfg.variant_cache_capacity,
                    self.cfg.missing_block.clone(),
                ));
            }
        }
    }

    /// Rebuilds every dirty section. Each one yields exactly one
    /// `SectionFinished`, preceded by its geometry when the column is loaded.
    pub fn tick(&mut self) -> Vec<WorkerEvent> {
        if self.dirty.is_empty() {
            return Vec::new();
        }
        let t0 = Instant::now();
        let mut keys: Vec<(SectionKey, u32)> = self.dirty.drain().collect();
        keys.sort_unstable_by_key(|(k, _)| *k);
        let finished = keys.len();
        let mut out = Vec::with_capacity(keys.len() * 2);
        let mut built = 0usize;
        for (key, marks) in keys {
            if let Some(ev) = self.build(key) {
                if matches!(ev, WorkerEvent::Geometry { .. }) {
                    built += 1;
                }
                out.push(ev);
            }
            out.push(WorkerEvent::SectionFinished {
                key,
                marks,
                epoch: self.epoch,
            });
        }
        log::debug!(
            target: "perf",
            "ms={:.3} worker_tick worker={} built={} finished={}",
            t0.elapsed().as_secs_f64() * 1000.0,
            self.id,
            built,
            finished
        );
        if let Some(r) = &self.resolver {
            let s = r.stats();
            log::trace!(
                target: "runtime",
                "worker {} resolver hits={} misses={} evictions={} entries={}",
                self.id,
                s.hits,
                s.misses,
                s.evictions,
                s.entries
            );
        }
        out
    }

    fn build(&mut self, key: SectionKey) -> Option<WorkerEvent> {
        let (Some(meta), Some(resolver)) = (&self.meta, &mut self.resolver) else {
            log::trace!(target: "runtime", "worker {} skip {}: tables not loaded", self.id, key);
            return None;
        };
        let world = &self.world;
        let opts = &self.cfg.mesh;
        let result = catch_unwind(AssertUnwindSafe(|| build_section(key, world, meta, resolver, opts)));
        match result {
            Ok(Ok(geometry)) => Some(WorkerEvent::Geometry {
                key,
                geometry,
                epoch: self.epoch,
            }),
            Ok(Err(MeshError::ColumnNotLoaded(_))) => None,
            Ok(Err(e)) => Some(self.debug(format!("section {key}: {e}"), None)),
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                // The memo may hold a half-written entry
                resolver.clear();
                Some(self.debug(format!("section {key}: build panicked"), Some(msg)))
            }
        }
    }

    fn debug(&self, message: String, stack: Option<String>) -> WorkerEvent {
        log::warn!(target: "runtime", "worker {} {}", self.id, message);
        WorkerEvent::Debug {
            worker: self.id,
            message,
            stack,
        }
    }

    /// Worker loop: applies messages in order and drains the dirty set on every tick.
    /// Returns when the orchestrator drops its sender.
    pub fn run(mut self, rx: Receiver<WorkerMsg>, tx: Sender<WorkerEvent>, period: Duration) {
        let ticker = tick(period);
        log::info!(target: "runtime", "worker {} started tick_ms={}", self.id, period.as_millis());
        loop {
            select! {
                recv(rx) -> msg => match msg {
                    Ok(msg) => {
                        if let Some(ev) = self.handle(msg) {
                            let _ = tx.send(ev);
                        }
                    }
                    Err(_) => break,
                },
                recv(ticker) -> _ => {
                    for ev in self.tick() {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                }
            }
        }
        log::info!(target: "runtime", "worker {} stopped", self.id);
    }
}
