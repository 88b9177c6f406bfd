use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::condition::Condition;

/// Categorical risk band derived from the capped percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "منخفض",
            Self::Medium => "متوسط",
            Self::High => "عالي",
            Self::VeryHigh => "عالي جداً",
        }
    }
}

/// A scoring rule that fired, and how many points it added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskFactor {
    pub name: String,
    pub contribution: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CarePriority {
    Low,
    Medium,
    High,
}

/// One entry of the band-level follow-up plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CareItem {
    pub title: String,
    pub details: String,
    pub priority: CarePriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "نقص في الوزن",
            Self::Normal => "وزن طبيعي",
            Self::Overweight => "زيادة في الوزن",
            Self::Obese => "سمنة",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BpCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl BpCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "ضغط طبيعي",
            Self::Elevated => "ضغط مرتفع",
            Self::Stage1 => "ارتفاع ضغط الدم (المرحلة الأولى)",
            Self::Stage2 => "ارتفاع ضغط الدم (المرحلة الثانية)",
            Self::Crisis => "أزمة ضغط الدم",
        }
    }
}

/// The engine's output for one submission. Read-only once produced and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskResult {
    pub condition: Condition,
    /// Score sum, capped at the configured ceiling.
    pub risk_percentage: u8,
    pub risk_level: RiskLevel,
    /// Placeholder peer-group figure looked up by age bracket. Not derived
    /// from population data.
    pub comparison_percentage: u8,
    /// Fired rules, largest contribution first.
    pub top_factors: Vec<RiskFactor>,
    /// Advice for each notable rule in evaluation order, or a single
    /// generic line when nothing notable fired.
    pub recommendations: Vec<String>,
    pub care_plan: Vec<CareItem>,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    /// Classification of the averaged reading, for assessments that collect one.
    pub blood_pressure: Option<BpCategory>,
}
