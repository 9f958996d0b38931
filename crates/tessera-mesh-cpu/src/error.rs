use tessera_meta::StateId;
use tessera_world::{BlockPos, SectionKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("section {0}: column not loaded")]
    ColumnNotLoaded(SectionKey),
    #[error("state {state} at {pos:?}: model produced non-finite vertices")]
    Degenerate { state: StateId, pos: BlockPos },
}

pub type Result<T> = std::result::Result<T, MeshError>;
