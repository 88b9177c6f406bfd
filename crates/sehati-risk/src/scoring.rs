use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sehati_core::models::input::{FamilyHistory, Gender, RiskInput};
use sehati_core::models::result::RiskLevel;

use crate::validation::ChoiceLabel;

/// Inclusive bounds for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One rung of a threshold ladder.
///
/// Ladders are listed most severe first and the first rung a value
/// qualifies for wins, so exactly one rung (or none) applies per rule.
/// A rung carrying `advice` is notable: firing it adds a recommendation.
#[derive(Debug, Clone)]
pub struct Tier {
    pub at: f64,
    /// Threshold for the second reading of an [`Criterion::EitherAtLeast`] rule.
    pub secondary_at: Option<f64>,
    pub points: u32,
    pub factor: String,
    pub advice: Option<String>,
}

impl Tier {
    pub fn new(at: f64, points: u32, factor: &str) -> Self {
        Self {
            at,
            secondary_at: None,
            points,
            factor: factor.to_string(),
            advice: None,
        }
    }

    pub fn or_secondary(mut self, at: f64) -> Self {
        self.secondary_at = Some(at);
        self
    }

    pub fn advise(mut self, advice: &str) -> Self {
        self.advice = Some(advice.to_string());
        self
    }
}

/// How a lab rule compares its reading(s) against a rung's threshold.
#[derive(Debug, Clone)]
pub enum Criterion {
    /// Qualifies when `value >= at`.
    AtLeast { field: String },
    /// Qualifies when `value < at` (lower is worse, e.g. HDL).
    Below { field: String },
    /// Qualifies when `first >= at` or `second >= secondary_at`
    /// (systolic/diastolic pairs).
    EitherAtLeast { first: String, second: String },
}

/// A threshold ladder over one lab value or reading pair.
#[derive(Debug, Clone)]
pub struct LabRule {
    pub criterion: Criterion,
    pub tiers: Vec<Tier>,
}

impl LabRule {
    pub fn at_least(field: &str, tiers: Vec<Tier>) -> Self {
        Self {
            criterion: Criterion::AtLeast {
                field: field.to_string(),
            },
            tiers,
        }
    }

    pub fn below(field: &str, tiers: Vec<Tier>) -> Self {
        Self {
            criterion: Criterion::Below {
                field: field.to_string(),
            },
            tiers,
        }
    }

    pub fn either_at_least(first: &str, second: &str, tiers: Vec<Tier>) -> Self {
        Self {
            criterion: Criterion::EitherAtLeast {
                first: first.to_string(),
                second: second.to_string(),
            },
            tiers,
        }
    }

    /// The lab fields this rule reads.
    pub fn fields(&self) -> Vec<&str> {
        match &self.criterion {
            Criterion::AtLeast { field } | Criterion::Below { field } => vec![field.as_str()],
            Criterion::EitherAtLeast { first, second } => vec![first.as_str(), second.as_str()],
        }
    }

    /// Select the rung that applies to `input`. Unknown values never match.
    pub fn evaluate(&self, input: &RiskInput) -> Option<&Tier> {
        match &self.criterion {
            Criterion::AtLeast { field } => {
                let value = input.lab(field).measured()?;
                self.tiers.iter().find(|t| value >= t.at)
            }
            Criterion::Below { field } => {
                let value = input.lab(field).measured()?;
                self.tiers.iter().find(|t| value < t.at)
            }
            Criterion::EitherAtLeast { first, second } => {
                let first = input.lab(first).measured();
                let second = input.lab(second).measured();
                self.tiers.iter().find(|t| {
                    first.is_some_and(|v| v >= t.at)
                        || matches!((second, t.secondary_at), (Some(v), Some(at)) if v >= at)
                })
            }
        }
    }
}

/// Ladder applied to the derived body-mass index.
pub fn evaluate_bmi(tiers: &[Tier], bmi: f64) -> Option<&Tier> {
    tiers.iter().find(|t| bmi >= t.at)
}

#[derive(Debug, Clone)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub points: u32,
    pub advice: Option<String>,
}

/// Fixed points per enumerated answer. The option list doubles as the
/// validation set for the field.
#[derive(Debug, Clone)]
pub struct ChoiceRule {
    pub field: String,
    pub label: String,
    pub factor: String,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceRule {
    pub fn new(field: &str, label: &str, factor: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            factor: factor.to_string(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, value: &str, label: &str, points: u32) -> Self {
        self.options.push(ChoiceOption {
            value: value.to_string(),
            label: label.to_string(),
            points,
            advice: None,
        });
        self
    }

    pub fn advised(mut self, value: &str, label: &str, points: u32, advice: &str) -> Self {
        self.options.push(ChoiceOption {
            value: value.to_string(),
            label: label.to_string(),
            points,
            advice: Some(advice.to_string()),
        });
        self
    }

    /// The answers as form options, in table order.
    pub fn labels(&self) -> Vec<ChoiceLabel> {
        self.options
            .iter()
            .map(|o| ChoiceLabel::new(&o.value, &o.label))
            .collect()
    }

    pub fn evaluate(&self, input: &RiskInput) -> Option<&ChoiceOption> {
        let answer = input.choice(&self.field)?;
        self.options.iter().find(|o| o.value == answer)
    }
}

#[derive(Debug, Clone)]
pub struct FamilyHistoryRule {
    pub factor: String,
    pub first_degree: u32,
    pub distant: u32,
    pub unsure: u32,
    /// Added when the first-degree or distant answer fires.
    pub advice: String,
}

impl FamilyHistoryRule {
    pub fn points(&self, history: FamilyHistory) -> u32 {
        match history {
            FamilyHistory::None => 0,
            FamilyHistory::Distant => self.distant,
            FamilyHistory::FirstDegree => self.first_degree,
            FamilyHistory::Unsure => self.unsure,
        }
    }

    pub fn advice_for(&self, history: FamilyHistory) -> Option<&str> {
        match history {
            FamilyHistory::FirstDegree | FamilyHistory::Distant => Some(&self.advice),
            FamilyHistory::None | FamilyHistory::Unsure => None,
        }
    }
}

/// Age threshold, optionally restricted to one gender.
#[derive(Debug, Clone)]
pub struct AgeTier {
    pub min_age: u8,
    pub gender: Option<Gender>,
    pub points: u32,
    pub factor: String,
    pub advice: Option<String>,
}

impl AgeTier {
    pub fn new(min_age: u8, points: u32, factor: &str) -> Self {
        Self {
            min_age,
            gender: None,
            points,
            factor: factor.to_string(),
            advice: None,
        }
    }

    pub fn only(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn advise(mut self, advice: &str) -> Self {
        self.advice = Some(advice.to_string());
        self
    }

    fn matches(&self, age: u8, gender: Gender) -> bool {
        age >= self.min_age && self.gender.is_none_or(|g| g == gender)
    }
}

pub fn evaluate_age(tiers: &[AgeTier], age: u8, gender: Gender) -> Option<&AgeTier> {
    tiers.iter().find(|t| t.matches(age, gender))
}

/// The complete rule set of one condition, evaluated in field order:
/// labs, enumerated answers, family history, age/gender, BMI.
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub labs: Vec<LabRule>,
    pub choices: Vec<ChoiceRule>,
    pub family_history: FamilyHistoryRule,
    pub age: Vec<AgeTier>,
    pub bmi: Vec<Tier>,
}

/// Banding of the capped percentage into a [`RiskLevel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BandScheme {
    /// `< 30` low, `< 60` medium, otherwise high.
    #[default]
    ThreeTier,
    /// `< 20` low, `< 40` medium, `< 70` high, otherwise very high.
    FourTier,
}

impl BandScheme {
    /// Lower bounds of every band above the lowest, ascending.
    pub fn cutoffs(&self) -> &'static [u8] {
        match self {
            Self::ThreeTier => &[30, 60],
            Self::FourTier => &[20, 40, 70],
        }
    }

    pub fn classify(&self, percentage: u8) -> RiskLevel {
        const LEVELS: [RiskLevel; 4] = [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::VeryHigh,
        ];
        let band = self.cutoffs().iter().filter(|&&c| percentage >= c).count();
        LEVELS[band]
    }
}

/// Runtime knobs of the engine that differ between product variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineConfig {
    /// Ceiling applied to the raw score sum (95 or 100 in shipped variants).
    pub score_cap: u8,
    pub bands: BandScheme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_cap: 100,
            bands: BandScheme::ThreeTier,
        }
    }
}
