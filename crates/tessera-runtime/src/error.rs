use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("worker {0} is gone")]
    Disconnected(usize),
    #[error("every worker has stopped sending events")]
    EventsClosed,
    #[error("timed out with {pending} sections still pending")]
    DrainTimeout { pending: usize },
    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Meta(#[from] tessera_meta::MetaError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
