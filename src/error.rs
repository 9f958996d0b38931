use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dispatch(#[from] tessera_runtime::DispatchError),
    #[error(transparent)]
    Meta(#[from] tessera_meta::MetaError),
    #[error(transparent)]
    Model(#[from] tessera_models::ModelError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
