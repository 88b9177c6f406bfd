use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use sehati_core::models::draft::StepValues;
use sehati_core::models::input::UNKNOWN_TOKEN;

use crate::scoring::ValueRange;
use crate::vitals::Reading;

/// Fixed user-facing validation messages.
pub mod message {
    pub const REQUIRED: &str = "هذا الحقل مطلوب";
    pub const NOT_A_NUMBER: &str = "يرجى إدخال قيمة رقمية";
    pub const NOT_AN_INTEGER: &str = "يرجى إدخال عدد صحيح";
    pub const INVALID_OPTION: &str = "يرجى اختيار أحد الخيارات المتاحة";
    pub const BLOOD_PRESSURE: &str = "يرجى إدخال ضغط الدم بالشكل الصحيح (مثال: 120/80)";
}

const UNKNOWN_LABEL: &str = "غير معروف";

static BP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2,3})/(\d{2,3})$").unwrap_or_else(|e| panic!("invalid reading pattern: {e}"))
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Number {
        range: ValueRange,
        integer: bool,
        allow_unknown: bool,
    },
    Choice {
        options: Vec<ChoiceLabel>,
    },
    /// A single `systolic/diastolic` string such as `120/80`.
    BloodPressure {
        systolic: ValueRange,
        diastolic: ValueRange,
    },
}

/// An accepted answer of a choice field and the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceLabel {
    pub value: String,
    pub label: String,
}

impl ChoiceLabel {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub kind: FieldKind,
    /// Shown when the value parses but falls outside its bounds.
    pub range_message: String,
}

impl FieldSpec {
    pub fn number(id: &str, label: &str, range: ValueRange) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required: true,
            kind: FieldKind::Number {
                range,
                integer: false,
                allow_unknown: false,
            },
            range_message: format!("يجب أن تكون القيمة بين {} و {}", range.min, range.max),
        }
    }

    pub fn integer(id: &str, label: &str, range: ValueRange) -> Self {
        let mut spec = Self::number(id, label, range);
        if let FieldKind::Number { integer, .. } = &mut spec.kind {
            *integer = true;
        }
        spec
    }

    pub fn choice(id: &str, label: &str, options: Vec<ChoiceLabel>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required: true,
            kind: FieldKind::Choice { options },
            range_message: message::INVALID_OPTION.to_string(),
        }
    }

    pub fn blood_pressure(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required: true,
            kind: FieldKind::BloodPressure {
                systolic: ValueRange::new(60.0, 300.0),
                diastolic: ValueRange::new(40.0, 200.0),
            },
            range_message: message::BLOOD_PRESSURE.to_string(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accept the `unknown` token in place of a number.
    pub fn unknown_ok(mut self) -> Self {
        if let FieldKind::Number { allow_unknown, .. } = &mut self.kind {
            *allow_unknown = true;
        }
        self
    }

    pub fn with_range_message(mut self, message: &str) -> Self {
        self.range_message = message.to_string();
        self
    }

    /// Text to show for a stored value: the option label for choice
    /// fields, the words for `unknown`, otherwise the value itself.
    pub fn display_value<'a>(&'a self, value: &'a str) -> &'a str {
        match &self.kind {
            FieldKind::Choice { options } => options
                .iter()
                .find(|o| o.value == value)
                .map_or(value, |o| o.label.as_str()),
            FieldKind::Number { allow_unknown: true, .. } if value == UNKNOWN_TOKEN => UNKNOWN_LABEL,
            _ => value,
        }
    }
}

/// One step of an assessment form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepSpec {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl StepSpec {
    pub fn new(title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.to_string(),
            fields,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// A field value after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Unknown,
    Choice(String),
    Reading(Reading),
}

pub type ParsedStep = BTreeMap<String, FieldValue>;

/// Every invalid field of a step, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    pub errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Validate one raw value. `Ok(None)` means an optional field left empty.
pub fn validate_field(spec: &FieldSpec, raw: Option<&str>) -> Result<Option<FieldValue>, String> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return if spec.required {
            Err(message::REQUIRED.to_string())
        } else {
            Ok(None)
        };
    }

    match &spec.kind {
        FieldKind::Number {
            range,
            integer,
            allow_unknown,
        } => {
            if *allow_unknown && raw == UNKNOWN_TOKEN {
                return Ok(Some(FieldValue::Unknown));
            }
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| message::NOT_A_NUMBER.to_string())?;
            if *integer && value.fract() != 0.0 {
                return Err(message::NOT_AN_INTEGER.to_string());
            }
            if !range.contains(value) {
                return Err(spec.range_message.clone());
            }
            Ok(Some(FieldValue::Number(value)))
        }
        FieldKind::Choice { options } => {
            if options.iter().any(|o| o.value == raw) {
                Ok(Some(FieldValue::Choice(raw.to_string())))
            } else {
                Err(spec.range_message.clone())
            }
        }
        FieldKind::BloodPressure {
            systolic,
            diastolic,
        } => parse_reading(raw, systolic, diastolic)
            .map(|r| Some(FieldValue::Reading(r)))
            .ok_or_else(|| spec.range_message.clone()),
    }
}

fn parse_reading(raw: &str, systolic: &ValueRange, diastolic: &ValueRange) -> Option<Reading> {
    let caps = BP_PATTERN.captures(raw)?;
    let sys: f64 = caps[1].parse().ok()?;
    let dia: f64 = caps[2].parse().ok()?;
    (systolic.contains(sys) && diastolic.contains(dia)).then_some(Reading {
        systolic: sys,
        diastolic: dia,
    })
}

/// Validate every field of a step. All errors are collected so the caller
/// can highlight each invalid field at once; values for ids the step does
/// not declare are ignored.
pub fn validate_step(step: &StepSpec, values: &StepValues) -> Result<ParsedStep, FieldErrors> {
    let mut parsed = ParsedStep::new();
    let mut errors = FieldErrors::default();

    for spec in &step.fields {
        match validate_field(spec, values.get(&spec.id).map(String::as_str)) {
            Ok(Some(value)) => {
                parsed.insert(spec.id.clone(), value);
            }
            Ok(None) => {}
            Err(message) => errors.insert(&spec.id, message),
        }
    }

    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(errors)
    }
}

/// Keep only the values a step declares, trimmed. This is what gets stored
/// in a draft after a successful advance.
pub fn retain_declared(step: &StepSpec, values: &StepValues) -> StepValues {
    values
        .iter()
        .filter(|(id, _)| step.field(id).is_some())
        .map(|(id, value)| (id.clone(), value.trim().to_string()))
        .collect()
}
