use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("unknown family history option: {0}")]
    UnknownFamilyHistory(String),

    #[error("invalid anonymous tag: {0}")]
    InvalidTag(String),
}
