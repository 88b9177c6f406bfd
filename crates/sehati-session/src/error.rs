use thiserror::Error;

use sehati_risk::error::RiskError;
use sehati_risk::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("cannot {action} while the session is {state}")]
    NotCollecting {
        action: &'static str,
        state: &'static str,
    },
}

impl SessionError {
    /// Per-field messages when the error is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Risk(RiskError::InvalidStep { errors, .. }) => Some(errors),
            _ => None,
        }
    }

    /// Step the field errors belong to.
    pub fn invalid_step(&self) -> Option<usize> {
        match self {
            Self::Risk(RiskError::InvalidStep { step, .. }) => Some(*step),
            _ => None,
        }
    }
}
