use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("blockstate json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("block `{block}`: bad predicate: {detail}")]
    Predicate { block: String, detail: String },
    #[error("block `{block}` references unknown model `{model}`")]
    UnknownModel { block: String, model: String },
    #[error("block `{block}`: unknown face `{face}`")]
    UnknownFace { block: String, face: String },
    #[error("block `{block}`: unknown rotation axis `{axis}`")]
    UnknownAxis { block: String, axis: String },
    #[error("block `{block}`: parent chain of `{model}` is too deep or cyclic")]
    ParentChain { block: String, model: String },
    #[error("block `{block}` has neither variants nor multipart")]
    Empty { block: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
