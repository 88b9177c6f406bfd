//! sehati-session
//!
//! The multi-step assessment flow: step gating, draft autosave and resume,
//! and the hand-off to an [`analyzer::Analyzer`] once every step is in.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use analyzer::{Analyzer, LocalAnalyzer};
pub use config::SehatiConfig;
pub use error::SessionError;
pub use session::{Advance, AssessmentSession, SessionState};
