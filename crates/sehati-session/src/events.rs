use serde::Serialize;
use tracing::info;

use sehati_core::draft_keys::DraftKey;
use sehati_core::models::condition::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    Opened,
    Resumed,
    StepAdvanced,
    StepRejected,
    Retreated,
    AnalysisStarted,
    Completed,
    Acknowledged,
    Reset,
}

impl SessionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Resumed => "resumed",
            Self::StepAdvanced => "step_advanced",
            Self::StepRejected => "step_rejected",
            Self::Retreated => "retreated",
            Self::AnalysisStarted => "analysis_started",
            Self::Completed => "completed",
            Self::Acknowledged => "acknowledged",
            Self::Reset => "reset",
        }
    }
}

/// A structured record of one session transition.
///
/// Events carry no answers, only positions and outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub action: SessionAction,
    pub condition: Condition,
    pub draft_key: String,
    pub step: usize,
    pub at: jiff::Timestamp,
    pub details: Option<serde_json::Value>,
}

impl SessionEvent {
    pub fn new(action: SessionAction, key: &DraftKey, step: usize) -> Self {
        Self {
            action,
            condition: key.condition,
            draft_key: key.storage_key(),
            step,
            at: jiff::Timestamp::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this event via tracing.
    pub fn emit(&self) {
        info!(
            session.action = self.action.as_str(),
            session.condition = %self.condition,
            session.key = %self.draft_key,
            session.step = self.step,
            session.details = ?self.details,
            "session event"
        );
    }
}
