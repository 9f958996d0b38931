use std::sync::Arc;

use tessera_mesh_cpu::SectionGeometry;
use tessera_meta::{Metadata, StateId};
use tessera_models::VariantTable;
use tessera_world::{BlockPos, ColumnPayload, SectionKey};

/// Orchestrator to worker. Delivery order per worker is preserved.
#[derive(Debug, Clone)]
pub enum WorkerMsg {
    Metadata(Arc<Metadata>),
    BlockStates(Arc<VariantTable>),
    Chunk {
        x: i32,
        z: i32,
        payload: Arc<ColumnPayload>,
    },
    UnloadChunk {
        x: i32,
        z: i32,
    },
    BlockUpdate {
        pos: BlockPos,
        state: StateId,
    },
    Dirty {
        key: SectionKey,
        active: bool,
    },
    /// Drops the mirror and all dirty marks; later events carry `epoch`.
    Reset {
        epoch: u64,
    },
}

/// Worker to orchestrator.
#[derive(Debug)]
pub enum WorkerEvent {
    Geometry {
        key: SectionKey,
        geometry: SectionGeometry,
        epoch: u64,
    },
    /// Sent once per rebuild attempt, with or without geometry. `marks` is the
    /// number of dirty marks the attempt retires.
    SectionFinished {
        key: SectionKey,
        marks: u32,
        epoch: u64,
    },
    Debug {
        worker: usize,
        message: String,
        stack: Option<String>,
    },
}

impl WorkerEvent {
    pub fn key(&self) -> Option<SectionKey> {
        match self {
            WorkerEvent::Geometry { key, .. } | WorkerEvent::SectionFinished { key, .. } => Some(*key),
            WorkerEvent::Debug { .. } => None,
        }
    }
}
