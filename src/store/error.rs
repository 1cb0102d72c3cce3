use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score history is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported score history schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
}
