//! Section dispatch over a fixed pool of mesh workers, each with its own world mirror.
#![forbid(unsafe_code)]

mod dispatcher;
mod error;
mod hash;
mod message;
mod worker;

pub use dispatcher::{Dispatcher, DispatcherConfig, sections_touched_by};
pub use error::{DispatchError, Result};
pub use hash::worker_index;
pub use message::{WorkerEvent, WorkerMsg};
pub use worker::{MeshWorker, WorkerConfig};
