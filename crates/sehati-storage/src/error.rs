use std::path::PathBuf;

use thiserror::Error;

use sehati_core::models::condition::Condition;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("draft stored under {key} is for {found}")]
    ConditionMismatch { key: String, found: Condition },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
