use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("metadata json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("block `{name}` declares states {min}..={max} but its properties span {expected} states")]
    StateRange {
        name: String,
        min: u32,
        max: u32,
        expected: u64,
    },
    #[error("block `{name}` property `{prop}` has no values")]
    EmptyProperty { name: String, prop: String },
}

pub type Result<T> = std::result::Result<T, MetaError>;
