use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("step {step} is invalid: {errors}")]
    InvalidStep { step: usize, errors: FieldErrors },

    #[error("step {index} out of range (assessment has {total} steps)")]
    StepOutOfRange { index: usize, total: usize },

    #[error(transparent)]
    Core(#[from] sehati_core::error::CoreError),
}
