pub mod common;
pub mod diabetes;
pub mod heart;
pub mod hypertension;
