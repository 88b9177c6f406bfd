use tracing::{info, warn};

use sehati_core::draft_keys::DraftKey;
use sehati_core::models::draft::{AssessmentDraft, StepValues};
use sehati_core::models::result::RiskResult;
use sehati_risk::error::RiskError;
use sehati_risk::validation::retain_declared;
use sehati_risk::ConditionProfile;
use sehati_storage::DraftStore;

use crate::analyzer::Analyzer;
use crate::error::SessionError;
use crate::events::{SessionAction, SessionEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Waiting for the values of step `step`.
    Collecting { step: usize },
    /// Every step is in; the analyzer is running.
    Computing,
    Complete(RiskResult),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Collecting { .. } => "collecting",
            Self::Computing => "computing",
            Self::Complete(_) => "complete",
        }
    }
}

/// Outcome of a successful [`AssessmentSession::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    NextStep(usize),
    Completed(RiskResult),
}

/// One in-progress assessment for a single condition.
///
/// Values are kept per step, exactly as entered (trimmed), and the draft is
/// written to the store after every accepted step and every retreat.
/// Storage failures are logged and otherwise ignored: the session keeps
/// working from memory.
pub struct AssessmentSession<P, S, A> {
    profile: P,
    store: S,
    analyzer: A,
    key: DraftKey,
    draft: AssessmentDraft,
    state: SessionState,
}

impl<P, S, A> AssessmentSession<P, S, A>
where
    P: ConditionProfile,
    S: DraftStore,
    A: Analyzer,
{
    /// Start a session, resuming the draft stored under `key` if there is one.
    ///
    /// A stored draft is taken as-is; its values are validated again only
    /// when the steps are resubmitted.
    pub fn open(profile: P, store: S, analyzer: A, key: DraftKey) -> Self {
        assert_eq!(
            key.condition,
            profile.condition(),
            "draft key {key} does not belong to the {} profile",
            profile.condition()
        );

        let stored = match store.load_draft(&key) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to load draft, starting empty");
                None
            }
        };

        let last_step = profile.total_steps().saturating_sub(1);
        let (draft, action) = match stored {
            Some(mut draft) => {
                if draft.current_step > last_step {
                    warn!(
                        key = %key,
                        stored_step = draft.current_step,
                        last_step,
                        "stored step out of range, clamping"
                    );
                    draft.current_step = last_step;
                }
                (draft, SessionAction::Resumed)
            }
            None => (AssessmentDraft::new(profile.condition()), SessionAction::Opened),
        };

        let step = draft.current_step;
        let session = Self {
            profile,
            store,
            analyzer,
            key,
            draft,
            state: SessionState::Collecting { step },
        };
        session.event(action, step).emit();
        session
    }

    /// Submit the values of the active step.
    ///
    /// Invalid values leave the session untouched and come back as
    /// [`RiskError::InvalidStep`] with every failing field. On the last step
    /// the whole draft is validated again before scoring; if an earlier step
    /// no longer passes, the session moves back to it.
    pub async fn advance(&mut self, values: StepValues) -> Result<Advance, SessionError> {
        let SessionState::Collecting { step } = self.state else {
            return Err(SessionError::NotCollecting {
                action: "advance",
                state: self.state.name(),
            });
        };

        if let Err(e) = self.profile.validate_step(step, &values) {
            if let RiskError::InvalidStep { errors, .. } = &e {
                self.event(SessionAction::StepRejected, step)
                    .with_details(serde_json::json!({ "fields": errors.errors.keys().collect::<Vec<_>>() }))
                    .emit();
            }
            return Err(e.into());
        }

        let kept = retain_declared(&self.profile.steps()[step], &values);
        self.draft.set_step_values(step, kept);

        let next = step + 1;
        if next < self.profile.total_steps() {
            self.move_to(next);
            self.event(SessionAction::StepAdvanced, next).emit();
            return Ok(Advance::NextStep(next));
        }

        self.move_to(step);
        let input = match self.profile.parse_input(&self.draft.fields) {
            Ok(input) => input,
            Err(RiskError::InvalidStep { step: failing, errors }) => {
                self.move_to(failing);
                self.event(SessionAction::StepRejected, failing)
                    .with_details(serde_json::json!({ "fields": errors.errors.keys().collect::<Vec<_>>() }))
                    .emit();
                return Err(RiskError::InvalidStep {
                    step: failing,
                    errors,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        self.state = SessionState::Computing;
        self.event(SessionAction::AnalysisStarted, step).emit();

        let result = self.analyzer.analyze(&self.profile, &input).await;

        self.state = SessionState::Complete(result.clone());
        self.event(SessionAction::Completed, step)
            .with_details(serde_json::json!({
                "risk_percentage": result.risk_percentage,
                "risk_level": result.risk_level,
            }))
            .emit();
        Ok(Advance::Completed(result))
    }

    /// Go back one step, keeping every value already entered. From
    /// `Computing` or `Complete` this returns to the last step.
    pub fn retreat(&mut self) -> usize {
        let target = match self.state {
            SessionState::Collecting { step } => step.saturating_sub(1),
            SessionState::Computing | SessionState::Complete(_) => self.last_step(),
        };
        self.move_to(target);
        self.event(SessionAction::Retreated, target).emit();
        target
    }

    /// Discard every value and the stored draft. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.clear();
        self.event(SessionAction::Reset, 0).emit();
    }

    /// Take the result of a completed session and start over. `None` (and no
    /// change) unless the session is complete.
    pub fn acknowledge(&mut self) -> Option<RiskResult> {
        let SessionState::Complete(result) = &self.state else {
            return None;
        };
        let result = result.clone();
        self.clear();
        self.event(SessionAction::Acknowledged, 0).emit();
        Some(result)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Active step; the last step once all steps are submitted.
    pub fn current_step(&self) -> usize {
        match self.state {
            SessionState::Collecting { step } => step,
            SessionState::Computing | SessionState::Complete(_) => self.last_step(),
        }
    }

    pub fn total_steps(&self) -> usize {
        self.profile.total_steps()
    }

    /// Values previously accepted for step `index`, for pre-filling the form.
    pub fn step_values(&self, index: usize) -> Option<&StepValues> {
        self.draft.step_values(index)
    }

    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    pub fn key(&self) -> &DraftKey {
        &self.key
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn result(&self) -> Option<&RiskResult> {
        match &self.state {
            SessionState::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// Share of steps already behind the user, 0 to 100.
    pub fn progress_percent(&self) -> u8 {
        match self.state {
            SessionState::Collecting { step } => {
                let total = self.total_steps().max(1) as f64;
                ((step as f64 / total) * 100.0).round() as u8
            }
            SessionState::Computing | SessionState::Complete(_) => 100,
        }
    }

    fn last_step(&self) -> usize {
        self.total_steps().saturating_sub(1)
    }

    fn move_to(&mut self, step: usize) {
        self.state = SessionState::Collecting { step };
        self.draft.current_step = step;
        self.draft.touch();
        self.persist();
    }

    fn persist(&self) {
        match self.store.save_draft(&self.key, &self.draft) {
            Ok(()) => info!(key = %self.key, step = self.draft.current_step, "draft saved"),
            Err(e) => warn!(key = %self.key, error = %e, "failed to save draft"),
        }
    }

    fn clear(&mut self) {
        self.draft = AssessmentDraft::new(self.profile.condition());
        self.state = SessionState::Collecting { step: 0 };
        if let Err(e) = self.store.clear_draft(&self.key) {
            warn!(key = %self.key, error = %e, "failed to clear draft");
        }
    }

    fn event(&self, action: SessionAction, step: usize) -> SessionEvent {
        SessionEvent::new(action, &self.key, step)
    }
}
