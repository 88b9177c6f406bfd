use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::condition::Condition;

/// Raw text values entered on one step, keyed by field id.
pub type StepValues = BTreeMap<String, String>;

/// Step key for the shared demographics step.
pub const BASIC_INFO_STEP: &str = "basic_info";

/// Key under which the values of step `index` are stored in a draft.
/// Step 0 is always the basic-info step; later steps are `step1`, `step2`, ...
pub fn step_key(index: usize) -> String {
    if index == 0 {
        BASIC_INFO_STEP.to_string()
    } else {
        format!("step{index}")
    }
}

/// The resumable state of one assessment in progress.
///
/// Serialized as `{"condition", "fields", "currentStep", "timestamp"}`.
/// There is no schema version: a draft whose field names no longer match the
/// current steps simply fails to map onto them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentDraft {
    pub condition: Condition,
    pub current_step: usize,
    #[serde(default)]
    pub fields: BTreeMap<String, StepValues>,
    /// Time of last save. Display/debugging only, never used for expiry.
    pub timestamp: jiff::Timestamp,
}

impl AssessmentDraft {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            current_step: 0,
            fields: BTreeMap::new(),
            timestamp: jiff::Timestamp::now(),
        }
    }

    pub fn step_values(&self, index: usize) -> Option<&StepValues> {
        self.fields.get(&step_key(index))
    }

    /// Replace the values stored for step `index` wholesale.
    pub fn set_step_values(&mut self, index: usize, values: StepValues) {
        self.fields.insert(step_key(index), values);
    }

    pub fn touch(&mut self) {
        self.timestamp = jiff::Timestamp::now();
    }

    pub fn is_empty(&self) -> bool {
        self.current_step == 0 && self.fields.is_empty()
    }
}
