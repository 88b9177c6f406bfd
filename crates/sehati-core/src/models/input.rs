use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Token a user may enter instead of a lab value they do not know.
pub const UNKNOWN_TOKEN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "ذكر",
            Self::Female => "أنثى",
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(CoreError::UnknownGender(other.to_string())),
        }
    }
}

/// Family history of the screened condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FamilyHistory {
    None,
    Distant,
    FirstDegree,
    Unsure,
}

impl FamilyHistory {
    pub const ALL: [FamilyHistory; 4] = [
        FamilyHistory::None,
        FamilyHistory::Distant,
        FamilyHistory::FirstDegree,
        FamilyHistory::Unsure,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Distant => "distant",
            Self::FirstDegree => "first_degree",
            Self::Unsure => "unsure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "لا",
            Self::Distant => "نعم (أقارب بعيدون)",
            Self::FirstDegree => "نعم (أقارب درجة أولى)",
            Self::Unsure => "غير متأكد",
        }
    }
}

impl FromStr for FamilyHistory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FamilyHistory::ALL
            .into_iter()
            .find(|h| h.slug() == s.trim())
            .ok_or_else(|| CoreError::UnknownFamilyHistory(s.to_string()))
    }
}

/// A lab measurement, or the explicit "I don't know" answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum LabValue {
    Measured(f64),
    Unknown,
}

impl LabValue {
    pub fn measured(&self) -> Option<f64> {
        match self {
            Self::Measured(v) => Some(*v),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for LabValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured(v) => write!(f, "{v}"),
            Self::Unknown => f.write_str(UNKNOWN_TOKEN),
        }
    }
}

/// Body-mass index, kg/m².
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// The parsed bundle handed to the risk engine once every step is complete.
///
/// `ConditionProfile::parse_input` builds one from raw draft text and
/// guarantees every measured value lies inside its field's bounds. Values
/// built by hand are scored as given; range checks are the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskInput {
    pub age: u8,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Lab values keyed by field id (`fastingGlucose`, `ldl`, `systolicBP`, ...).
    pub labs: BTreeMap<String, LabValue>,
    /// Enumerated lifestyle and history answers keyed by field id.
    pub choices: BTreeMap<String, String>,
    pub family_history: FamilyHistory,
}

impl RiskInput {
    /// Body-mass index, kg/m².
    pub fn bmi(&self) -> f64 {
        bmi(self.weight_kg, self.height_cm)
    }

    pub fn lab(&self, field: &str) -> LabValue {
        self.labs.get(field).copied().unwrap_or(LabValue::Unknown)
    }

    pub fn choice(&self, field: &str) -> Option<&str> {
        self.choices.get(field).map(String::as_str)
    }
}
