//! Steps, answer sets and rule builders shared by every condition.

use sehati_core::models::input::{FamilyHistory, Gender};
use sehati_core::models::result::{CareItem, CarePriority};

use crate::fields;
use crate::scoring::{ChoiceRule, FamilyHistoryRule, Tier, ValueRange};
use crate::validation::{ChoiceLabel, FieldSpec, StepSpec};

pub fn basic_info_step() -> StepSpec {
    StepSpec::new(
        "البيانات الأساسية",
        vec![
            FieldSpec::integer(fields::AGE, "العمر", ValueRange::new(1.0, 120.0))
                .with_range_message("يجب أن يكون العمر بين 1 و 120 سنة"),
            FieldSpec::choice(
                fields::GENDER,
                "الجنس",
                Gender::ALL
                    .iter()
                    .map(|g| ChoiceLabel::new(g.slug(), g.label()))
                    .collect(),
            )
            .with_range_message("يرجى اختيار الجنس"),
            FieldSpec::number(fields::HEIGHT, "الطول (سم)", ValueRange::new(50.0, 250.0))
                .with_range_message("يجب أن يكون الطول بين 50 و 250 سم"),
            FieldSpec::number(fields::WEIGHT, "الوزن (كجم)", ValueRange::new(10.0, 500.0))
                .with_range_message("يجب أن يكون الوزن بين 10 و 500 كجم"),
        ],
    )
}

/// Form field whose options are exactly the rule's answers.
pub fn choice_field(rule: &ChoiceRule) -> FieldSpec {
    FieldSpec::choice(&rule.field, &rule.label, rule.labels())
}

pub fn family_history_field() -> FieldSpec {
    FieldSpec::choice(
        fields::FAMILY_HISTORY,
        "هل يوجد تاريخ عائلي للمرض؟",
        FamilyHistory::ALL
            .iter()
            .map(|h| ChoiceLabel::new(h.slug(), h.label()))
            .collect(),
    )
}

pub fn exercise_rule(rarely: u32, none: u32) -> ChoiceRule {
    ChoiceRule::new(fields::EXERCISE, "ممارسة الرياضة", "قلة النشاط البدني")
        .option("daily", "يومياً", 0)
        .option("weekly", "أسبوعياً", 0)
        .advised("rarely", "نادراً", rarely, "زيادة النشاط البدني إلى 30 دقيقة يومياً")
        .advised("none", "لا أمارس", none, "زيادة النشاط البدني إلى 30 دقيقة يومياً")
}

pub fn diet_rule(poor: u32) -> ChoiceRule {
    ChoiceRule::new(fields::DIET, "النظام الغذائي", "نظام غذائي غير صحي")
        .option("healthy", "صحي", 0)
        .option("average", "عادي", 0)
        .advised("poor", "غير صحي", poor, "راجع نظامك الغذائي مع أخصائي تغذية")
}

pub fn smoking_rule(former: u32, current: u32) -> ChoiceRule {
    ChoiceRule::new(fields::SMOKING, "التدخين", "التدخين")
        .option("no", "لا", 0)
        .option("former", "أقلعت", former)
        .advised("yes", "نعم", current, "الإقلاع عن التدخين فوراً لتحسين صحتك")
}

pub fn family_history_rule(first_degree: u32, distant: u32, unsure: u32, factor: &str) -> FamilyHistoryRule {
    FamilyHistoryRule {
        factor: factor.to_string(),
        first_degree,
        distant,
        unsure,
        advice: "التاريخ العائلي يزيد المخاطر - متابعة دورية مطلوبة".to_string(),
    }
}

/// BMI ladder: obese (≥30) then overweight (≥25).
pub fn bmi_tiers(obese: u32, overweight: u32) -> Vec<Tier> {
    vec![
        Tier::new(30.0, obese, "السمنة (BMI ≥ 30)")
            .advise("السمنة عامل خطر مهم - ننصح بفقدان الوزن"),
        Tier::new(25.0, overweight, "زيادة الوزن (BMI ≥ 25)")
            .advise("الوزن الزائد يزيد المخاطر - حافظ على نظام غذائي صحي"),
    ]
}

pub fn care(title: &str, details: &str, priority: CarePriority) -> CareItem {
    CareItem {
        title: title.to_string(),
        details: details.to_string(),
        priority,
    }
}
