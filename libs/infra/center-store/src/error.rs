use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("[STORE_IO]: {0}")]
    Io(#[from] std::io::Error),

    #[error("[STORE_CORRUPT]: center store file is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),
}
