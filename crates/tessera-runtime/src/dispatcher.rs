use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use hashbrown::{HashMap, HashSet};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tessera_meta::{Metadata, MetadataService, StateId, VersionLookup, VersionedData};
use tessera_models::VariantTable;
use tessera_world::{BlockPos, ColumnKey, ColumnPayload, SectionKey};

use crate::error::{DispatchError, Result};
use crate::hash::worker_index;
use crate::message::{WorkerEvent, WorkerMsg};
use crate::worker::{MeshWorker, WorkerConfig};

const LEGACY_EXTENT: (i32, u32) = (0, 256);

#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Pool size, fixed for the dispatcher's lifetime.
    pub workers: usize,
    pub tick: Duration,
    pub worker: WorkerConfig,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1))
            .unwrap_or(1)
            .max(1);
        Self {
            workers,
            tick: Duration::from_millis(50),
            worker: WorkerConfig::default(),
        }
    }
}

/// Sections whose geometry depends on the block at `pos`: its own section plus
/// the neighbor across every face the block touches.
pub fn sections_touched_by(pos: BlockPos) -> Vec<SectionKey> {
    let key = SectionKey::containing(pos);
    let (lx, ly, lz) = pos.local();
    let mut out = vec![key];
    let mut edge = |l: usize, lo: (i32, i32, i32), hi: (i32, i32, i32)| {
        let d = match l {
            0 => lo,
            15 => hi,
            _ => return,
        };
        out.push(key.offset(d.0, d.1, d.2));
    };
    edge(lx, (-1, 0, 0), (1, 0, 0));
    edge(ly, (0, -1, 0), (0, 1, 0));
    edge(lz, (0, 0, -1), (0, 0, 1));
    out
}

/// Routes world changes to a fixed pool of mesh workers and tracks which
/// sections are still waiting for a rebuild.
///
/// Every column and block update is broadcast so each worker's mirror can cull
/// across section boundaries; dirty marks go only to the section's owner.
pub struct Dispatcher {
    senders: Vec<Sender<WorkerMsg>>,
    events: Receiver<WorkerEvent>,
    _pool: ThreadPool,
    meta: MetadataService,
    pending: HashMap<SectionKey, u32>,
    waiters: Vec<Sender<()>>,
    loaded: HashSet<ColumnKey>,
    extent: Option<(i32, u32)>,
    backlog: Vec<WorkerEvent>,
    epoch: u64,
}

impl Dispatcher {
    pub fn new(cfg: DispatcherConfig) -> Result<Self> {
        let n = cfg.workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(n)
            .thread_name(|i| format!("tessera-mesh-{i}"))
            .build()?;
        let (ev_tx, ev_rx) = unbounded::<WorkerEvent>();
        let mut senders = Vec::with_capacity(n);
        for id in 0..n {
            let (tx, rx) = unbounded::<WorkerMsg>();
            let worker = MeshWorker::new(id, cfg.worker.clone());
            let ev_tx = ev_tx.clone();
            let period = cfg.tick;
            pool.spawn(move || worker.run(rx, ev_tx, period));
            senders.push(tx);
        }
        log::info!(target: "runtime", "dispatcher up workers={} tick_ms={}", n, cfg.tick.as_millis());
        Ok(Self {
            senders,
            events: ev_rx,
            _pool: pool,
            meta: MetadataService::new(),
            pending: HashMap::new(),
            waiters: Vec::new(),
            loaded: HashSet::new(),
            extent: None,
            backlog: Vec::new(),
            epoch: 0,
        })
    }

    pub fn workers(&self) -> usize {
        self.senders.len()
    }

    pub fn worker_for(&self, key: SectionKey) -> usize {
        worker_index(key, self.senders.len())
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, key: SectionKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn has_column(&self, x: i32, z: i32) -> bool {
        self.loaded.contains(&ColumnKey::containing(x, z))
    }

    pub fn metadata(&self) -> Option<&Arc<Metadata>> {
        self.meta.get()
    }

    fn send(&self, worker: usize, msg: WorkerMsg) -> Result<()> {
        self.senders[worker]
            .send(msg)
            .map_err(|_| DispatchError::Disconnected(worker))
    }

    fn broadcast(&self, msg: WorkerMsg) -> Result<()> {
        for w in 0..self.senders.len() {
            self.send(w, msg.clone())?;
        }
        Ok(())
    }

    /// Builds the version tables once and shares them with every worker.
    pub fn set_metadata(
        &mut self,
        version: &str,
        data: &VersionedData,
        lookup: &VersionLookup,
    ) -> Result<Arc<Metadata>> {
        let meta = self.meta.initialize(version, data, lookup)?;
        self.broadcast(WorkerMsg::Metadata(meta.clone()))?;
        Ok(meta)
    }

    pub fn set_block_states(&mut self, table: Arc<VariantTable>) -> Result<()> {
        log::info!(target: "runtime", "blockstates {} entries", table.len());
        self.broadcast(WorkerMsg::BlockStates(table))
    }

    /// Marks a section for rebuild on its owning worker. `active == false`
    /// withdraws any marks the worker still holds for it.
    pub fn mark_dirty(&mut self, key: SectionKey, active: bool) -> Result<()> {
        let worker = self.worker_for(key);
        if active {
            *self.pending.entry(key).or_insert(0) += 1;
        }
        let sent = self.send(worker, WorkerMsg::Dirty { key, active });
        if sent.is_err() && active {
            self.retire(key, 1);
        }
        sent
    }

    fn extent(&self) -> (i32, u32) {
        self.extent.unwrap_or(LEGACY_EXTENT)
    }

    fn in_extent(&self, y: i32) -> bool {
        let (min_y, height) = self.extent();
        y >= min_y && y < min_y + height as i32
    }

    fn mark_column(&mut self, col: ColumnKey) -> Result<()> {
        let (min_y, height) = self.extent();
        for y in (min_y..min_y + height as i32).step_by(16) {
            self.mark_dirty(col.section(y), true)?;
        }
        Ok(())
    }

    fn loaded_neighbors(&self, col: ColumnKey) -> Vec<ColumnKey> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(|(dx, dz)| col.offset(dx, dz))
            .filter(|c| self.loaded.contains(c))
            .collect()
    }

    /// Loads or replaces a column on every worker, then marks its sections and
    /// those of its loaded lateral neighbors.
    pub fn add_column(&mut self, x: i32, z: i32, payload: ColumnPayload) -> Result<()> {
        if self.extent.is_none() && (payload.min_y.is_some() || payload.world_height.is_some()) {
            self.extent = Some((
                payload.min_y.unwrap_or(LEGACY_EXTENT.0),
                payload.world_height.unwrap_or(LEGACY_EXTENT.1),
            ));
        }
        let col = ColumnKey::containing(x, z);
        let payload = Arc::new(payload);
        self.broadcast(WorkerMsg::Chunk { x, z, payload })?;
        self.loaded.insert(col);
        self.mark_column(col)?;
        for nb in self.loaded_neighbors(col) {
            self.mark_column(nb)?;
        }
        Ok(())
    }

    /// Unloads a column everywhere. Neighbors are remeshed so their edge faces
    /// follow the unloaded-neighbor policy.
    pub fn remove_column(&mut self, x: i32, z: i32) -> Result<()> {
        let col = ColumnKey::containing(x, z);
        self.broadcast(WorkerMsg::UnloadChunk { x, z })?;
        if self.loaded.remove(&col) {
            for nb in self.loaded_neighbors(col) {
                self.mark_column(nb)?;
            }
        }
        Ok(())
    }

    pub fn set_block_state_id(&mut self, pos: BlockPos, state: StateId) -> Result<()> {
        self.broadcast(WorkerMsg::BlockUpdate { pos, state })?;
        for key in sections_touched_by(pos) {
            if self.in_extent(key.y) {
                self.mark_dirty(key, true)?;
            }
        }
        Ok(())
    }

    /// Drops every worker's mirror and all pending marks. Version tables stay.
    pub fn reset(&mut self) -> Result<()> {
        self.epoch += 1;
        self.broadcast(WorkerMsg::Reset { epoch: self.epoch })?;
        self.pending.clear();
        self.loaded.clear();
        self.extent = None;
        self.backlog.clear();
        self.wake_waiters();
        Ok(())
    }

    fn retire(&mut self, key: SectionKey, marks: u32) {
        if let Some(n) = self.pending.get_mut(&key) {
            *n = n.saturating_sub(marks);
            if *n == 0 {
                self.pending.remove(&key);
            }
        }
        if self.pending.is_empty() {
            self.wake_waiters();
        }
    }

    fn wake_waiters(&mut self) {
        for w in self.waiters.drain(..) {
            let _ = w.send(());
        }
    }

    fn accept(&mut self, ev: WorkerEvent) {
        match ev {
            WorkerEvent::SectionFinished { key, marks, epoch } => {
                if epoch == self.epoch {
                    self.retire(key, marks);
                    self.backlog.push(ev);
                }
            }
            WorkerEvent::Geometry { key, epoch, .. } => {
                if epoch == self.epoch && self.loaded.contains(&key.column()) {
                    self.backlog.push(ev);
                } else {
                    log::trace!(target: "runtime", "dropping stale geometry {}", key);
                }
            }
            WorkerEvent::Debug { .. } => self.backlog.push(ev),
        }
    }

    /// Collects everything the workers have sent so far, in arrival order.
    pub fn poll(&mut self) -> Vec<WorkerEvent> {
        while let Ok(ev) = self.events.try_recv() {
            self.accept(ev);
        }
        std::mem::take(&mut self.backlog)
    }

    /// Resolves once no section is pending. Already resolved when nothing is.
    /// Completions are only observed through `poll` or
    /// `wait_for_chunks_to_render`.
    pub fn await_drain(&mut self) -> Receiver<()> {
        let (tx, rx) = bounded(1);
        if self.pending.is_empty() {
            let _ = tx.send(());
        } else {
            self.waiters.push(tx);
        }
        rx
    }

    /// Blocks until every pending section has finished or `timeout` passes.
    /// Events received meanwhile stay queued for the next `poll`.
    pub fn wait_for_chunks_to_render(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let t0 = Instant::now();
        let drained = self.await_drain();
        loop {
            if drained.try_recv().is_ok() {
                log::debug!(
                    target: "perf",
                    "ms={:.3} drain",
                    t0.elapsed().as_secs_f64() * 1000.0
                );
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(DispatchError::DrainTimeout {
                    pending: self.pending.len(),
                });
            }
            match self.events.recv_timeout(deadline - now) {
                Ok(ev) => self.accept(ev),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Err(DispatchError::EventsClosed),
            }
        }
    }
}
