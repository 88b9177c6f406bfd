//! sehati-risk
//!
//! Health-risk calculators. Pure data and arithmetic with no storage or I/O.
//! Each condition is a profile: its form steps, validation bounds, threshold
//! tables, and follow-up plan. One generic engine scores any profile.

pub mod conditions;
pub mod engine;
pub mod error;
pub mod fields;
mod input;
pub mod scoring;
pub mod units;
pub mod validation;
pub mod vitals;

use std::collections::BTreeMap;

use sehati_core::error::CoreError;
use sehati_core::models::condition::Condition;
use sehati_core::models::draft::{step_key, StepValues};
use sehati_core::models::input::RiskInput;
use sehati_core::models::result::{CareItem, RiskLevel, RiskResult};

use error::RiskError;
use scoring::RuleTable;
use validation::{ParsedStep, StepSpec};

/// Trait implemented by each condition's assessment.
pub trait ConditionProfile: Send + Sync {
    fn condition(&self) -> Condition;

    /// Human-readable title (e.g., "فحص مخاطر السكري").
    fn name(&self) -> &str;

    /// Form steps in order. Step 0 is the shared basic-info step.
    fn steps(&self) -> &[StepSpec];

    /// Threshold tables scored by [`engine::RiskEngine`].
    fn rules(&self) -> &RuleTable;

    /// Follow-up plan for a risk band.
    fn care_plan(&self, level: RiskLevel) -> Vec<CareItem>;

    fn total_steps(&self) -> usize {
        self.steps().len()
    }

    /// The form steps as JSON, for rendering the form client-side.
    fn form_schema(&self) -> Result<serde_json::Value, RiskError> {
        Ok(serde_json::to_value(self.steps()).map_err(CoreError::from)?)
    }

    /// Validate the values entered on step `index`.
    fn validate_step(&self, index: usize, values: &StepValues) -> Result<ParsedStep, RiskError> {
        let step = self.steps().get(index).ok_or(RiskError::StepOutOfRange {
            index,
            total: self.total_steps(),
        })?;
        validation::validate_step(step, values).map_err(|errors| RiskError::InvalidStep {
            step: index,
            errors,
        })
    }

    /// Validate every step of an accumulated field map and build the engine
    /// input. Fails on the first step with errors, reporting all of its
    /// invalid fields.
    fn parse_input(&self, fields: &BTreeMap<String, StepValues>) -> Result<RiskInput, RiskError> {
        let empty = StepValues::new();
        let mut parsed = ParsedStep::new();
        for index in 0..self.total_steps() {
            let values = fields.get(&step_key(index)).unwrap_or(&empty);
            parsed.extend(self.validate_step(index, values)?);
        }
        input::build(parsed)
    }

    /// Plain-text report of the answers and the result, for the
    /// "download report" action.
    fn summarize(&self, fields: &BTreeMap<String, StepValues>, result: &RiskResult) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for (index, step) in self.steps().iter().enumerate() {
            let Some(values) = fields.get(&step_key(index)) else {
                continue;
            };
            output.push_str(&format!("### {}\n", step.title));
            for field in &step.fields {
                if let Some(value) = values.get(&field.id).filter(|v| !v.is_empty()) {
                    output.push_str(&format!("- {}: {}\n", field.label, field.display_value(value)));
                }
            }
            output.push('\n');
        }

        output.push_str("### النتيجة\n");
        output.push_str(&format!("- نسبة المخاطر: {}%\n", result.risk_percentage));
        output.push_str(&format!("- مستوى المخاطر: {}\n", result.risk_level.label()));
        output.push_str(&format!(
            "- مؤشر كتلة الجسم: {:.1} ({})\n",
            result.bmi,
            result.bmi_category.label()
        ));
        if let Some(bp) = result.blood_pressure {
            output.push_str(&format!("- تصنيف ضغط الدم: {}\n", bp.label()));
        }
        if !result.recommendations.is_empty() {
            output.push_str("\n### التوصيات\n");
            for line in &result.recommendations {
                output.push_str(&format!("- {line}\n"));
            }
        }
        output
    }
}

impl<P: ConditionProfile + ?Sized> ConditionProfile for Box<P> {
    fn condition(&self) -> Condition {
        (**self).condition()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn steps(&self) -> &[StepSpec] {
        (**self).steps()
    }

    fn rules(&self) -> &RuleTable {
        (**self).rules()
    }

    fn care_plan(&self, level: RiskLevel) -> Vec<CareItem> {
        (**self).care_plan(level)
    }
}

/// Return all registered condition profiles.
pub fn all_profiles() -> Vec<Box<dyn ConditionProfile>> {
    Condition::ALL.into_iter().map(profile_for).collect()
}

/// The profile scoring `condition`.
pub fn profile_for(condition: Condition) -> Box<dyn ConditionProfile> {
    match condition {
        Condition::Diabetes => Box::new(conditions::diabetes::Diabetes),
        Condition::Hypertension => Box::new(conditions::hypertension::Hypertension),
        Condition::Heart => Box::new(conditions::heart::Heart),
    }
}

/// Look up a profile by condition slug.
pub fn get_profile(slug: &str) -> Result<Box<dyn ConditionProfile>, RiskError> {
    let condition: Condition = slug.parse()?;
    Ok(profile_for(condition))
}
