use tracing::debug;

use sehati_core::models::input::RiskInput;
use sehati_core::models::result::{RiskFactor, RiskResult};

use crate::fields;
use crate::scoring::{evaluate_age, evaluate_bmi, EngineConfig};
use crate::vitals::{classify_bmi, classify_bp, Reading};
use crate::ConditionProfile;

/// Shown when no notable rule fired.
pub const GENERIC_ADVICE: &str = "حافظ على نمط حياتك الصحي الحالي";

/// Most factors reported in a result.
pub const TOP_FACTOR_LIMIT: usize = 5;

/// Placeholder peer-group percentages by minimum age of the bracket,
/// oldest first. Hardcoded display figures; not population statistics.
const PEER_COMPARISON_BY_AGE: [(u8, u8); 5] = [(65, 65), (55, 50), (45, 35), (35, 25), (0, 15)];

/// Placeholder "people your age" figure for the result screen.
pub fn peer_comparison(age: u8) -> u8 {
    PEER_COMPARISON_BY_AGE
        .iter()
        .find(|(min_age, _)| age >= *min_age)
        .map_or(0, |(_, pct)| *pct)
}

/// Scores a [`RiskInput`] against one profile's tables.
///
/// Pure and total: identical input always yields an identical result, and
/// the input is trusted to have passed validation.
pub struct RiskEngine<'p, P: ConditionProfile + ?Sized> {
    profile: &'p P,
    config: EngineConfig,
}

#[derive(Default)]
struct Tally {
    score: u32,
    factors: Vec<RiskFactor>,
    advice: Vec<String>,
}

impl Tally {
    fn add(&mut self, factor: &str, points: u32, advice: Option<&str>) {
        if points == 0 {
            return;
        }
        self.score += points;
        self.factors.push(RiskFactor {
            name: factor.to_string(),
            contribution: points,
        });
        if let Some(advice) = advice {
            self.advice.push(advice.to_string());
        }
    }
}

impl<'p, P: ConditionProfile + ?Sized> RiskEngine<'p, P> {
    pub fn new(profile: &'p P, config: EngineConfig) -> Self {
        Self { profile, config }
    }

    pub fn assess(&self, input: &RiskInput) -> RiskResult {
        let rules = self.profile.rules();
        let mut tally = Tally::default();

        for rule in &rules.labs {
            if let Some(tier) = rule.evaluate(input) {
                tally.add(&tier.factor, tier.points, tier.advice.as_deref());
            }
        }

        for rule in &rules.choices {
            if let Some(option) = rule.evaluate(input) {
                tally.add(&rule.factor, option.points, option.advice.as_deref());
            }
        }

        let family = &rules.family_history;
        tally.add(
            &family.factor,
            family.points(input.family_history),
            family.advice_for(input.family_history),
        );

        if let Some(tier) = evaluate_age(&rules.age, input.age, input.gender) {
            tally.add(&tier.factor, tier.points, tier.advice.as_deref());
        }

        let bmi = input.bmi();
        if let Some(tier) = evaluate_bmi(&rules.bmi, bmi) {
            tally.add(&tier.factor, tier.points, tier.advice.as_deref());
        }

        let cap = u32::from(self.config.score_cap.min(100));
        let risk_percentage = tally.score.min(cap) as u8;
        let risk_level = self.config.bands.classify(risk_percentage);

        debug!(
            condition = %self.profile.condition(),
            raw_score = tally.score,
            risk_percentage,
            ?risk_level,
            "risk scored"
        );

        let mut top_factors = tally.factors;
        top_factors.sort_by(|a, b| b.contribution.cmp(&a.contribution));
        top_factors.truncate(TOP_FACTOR_LIMIT);

        let recommendations = if tally.advice.is_empty() {
            vec![GENERIC_ADVICE.to_string()]
        } else {
            tally.advice
        };

        let blood_pressure = match (
            input.lab(fields::SYSTOLIC).measured(),
            input.lab(fields::DIASTOLIC).measured(),
        ) {
            (Some(systolic), Some(diastolic)) => Some(classify_bp(Reading {
                systolic,
                diastolic,
            })),
            _ => None,
        };

        RiskResult {
            condition: self.profile.condition(),
            risk_percentage,
            risk_level,
            comparison_percentage: peer_comparison(input.age),
            top_factors,
            recommendations,
            care_plan: self.profile.care_plan(risk_level),
            bmi,
            bmi_category: classify_bmi(bmi),
            blood_pressure,
        }
    }
}
