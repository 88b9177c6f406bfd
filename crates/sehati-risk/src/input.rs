use std::collections::BTreeMap;

use sehati_core::models::input::{FamilyHistory, Gender, LabValue, RiskInput};

use crate::error::RiskError;
use crate::fields;
use crate::validation::{message, FieldErrors, FieldValue, ParsedStep};
use crate::vitals::{average_reading, Reading};

/// Turn the parsed values of every step into a [`RiskInput`].
///
/// Numbers outside the basic-info step become lab values; composite
/// readings are averaged into the systolic/diastolic pair; remaining choices
/// are kept as enumerated answers.
pub(crate) fn build(mut parsed: ParsedStep) -> Result<RiskInput, RiskError> {
    let mut missing = FieldErrors::default();
    let mut number = |id: &str, parsed: &mut ParsedStep| match parsed.remove(id) {
        Some(FieldValue::Number(v)) => v,
        _ => {
            missing.insert(id, message::REQUIRED);
            0.0
        }
    };

    let age = number(fields::AGE, &mut parsed);
    let height_cm = number(fields::HEIGHT, &mut parsed);
    let weight_kg = number(fields::WEIGHT, &mut parsed);
    let gender = match parsed.remove(fields::GENDER) {
        Some(FieldValue::Choice(value)) => Some(value.parse::<Gender>()?),
        _ => {
            missing.insert(fields::GENDER, message::REQUIRED);
            None
        }
    };
    let (Some(gender), true) = (gender, missing.is_empty()) else {
        return Err(RiskError::InvalidStep {
            step: 0,
            errors: missing,
        });
    };

    let family_history = match parsed.remove(fields::FAMILY_HISTORY) {
        Some(FieldValue::Choice(value)) => value.parse::<FamilyHistory>()?,
        _ => FamilyHistory::None,
    };

    let mut labs = BTreeMap::new();
    let mut choices = BTreeMap::new();
    let mut readings: Vec<Reading> = Vec::new();

    for id in fields::BP_READINGS {
        if let Some(FieldValue::Reading(reading)) = parsed.remove(id) {
            readings.push(reading);
        }
    }
    if let Some(avg) = average_reading(&readings) {
        labs.insert(fields::SYSTOLIC.to_string(), LabValue::Measured(avg.systolic));
        labs.insert(fields::DIASTOLIC.to_string(), LabValue::Measured(avg.diastolic));
    }

    for (id, value) in parsed {
        match value {
            FieldValue::Number(v) => {
                labs.insert(id, LabValue::Measured(v));
            }
            FieldValue::Unknown => {
                labs.insert(id, LabValue::Unknown);
            }
            FieldValue::Choice(answer) => {
                choices.insert(id, answer);
            }
            FieldValue::Reading(_) => {}
        }
    }

    Ok(RiskInput {
        age: age as u8,
        gender,
        height_cm,
        weight_kg,
        labs,
        choices,
        family_history,
    })
}
