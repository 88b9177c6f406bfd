use std::sync::LazyLock;

use sehati_core::models::condition::Condition;
use sehati_core::models::result::{CareItem, CarePriority, RiskLevel};

use super::common::{
    basic_info_step, bmi_tiers, care, choice_field, diet_rule, exercise_rule, family_history_field,
    family_history_rule, smoking_rule,
};
use crate::fields;
use crate::scoring::{AgeTier, LabRule, RuleTable, Tier, ValueRange};
use crate::validation::{FieldSpec, StepSpec};
use crate::ConditionProfile;

/// Type 2 diabetes screen. Fasting glucose and HbA1c drive most of the
/// score; either may be answered "unknown" and is then skipped.
pub struct Diabetes;

static RULES: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    labs: vec![
        LabRule::at_least(
            fields::FASTING_GLUCOSE,
            vec![
                Tier::new(126.0, 40, "ارتفاع سكر الصائم")
                    .advise("مستوى السكر مرتفع - استشر طبيب فوراً"),
                Tier::new(100.0, 20, "سكر صائم في المنطقة الحدية")
                    .advise("مستوى السكر في المنطقة الحدية - راقب نظامك الغذائي"),
            ],
        ),
        LabRule::at_least(
            fields::HBA1C,
            vec![
                Tier::new(6.5, 35, "ارتفاع السكر التراكمي")
                    .advise("السكر التراكمي مرتفع - يلزم تقييم طبي"),
                Tier::new(5.7, 15, "سكر تراكمي في مرحلة ما قبل السكري")
                    .advise("السكر التراكمي يشير لمرحلة ما قبل السكري - أعد الفحص خلال 3 أشهر"),
            ],
        ),
    ],
    choices: vec![exercise_rule(10, 15), diet_rule(10), smoking_rule(5, 10)],
    family_history: family_history_rule(20, 10, 5, "تاريخ عائلي للسكري"),
    age: vec![AgeTier::new(45, 10, "العمر 45 سنة فأكثر")],
    bmi: bmi_tiers(15, 10),
});

static STEPS: LazyLock<Vec<StepSpec>> = LazyLock::new(|| {
    vec![
        basic_info_step(),
        StepSpec::new(
            "التحاليل المخبرية",
            vec![
                FieldSpec::number(
                    fields::FASTING_GLUCOSE,
                    "سكر الصائم (mg/dL)",
                    ValueRange::new(20.0, 600.0),
                )
                .unknown_ok(),
                FieldSpec::number(fields::HBA1C, "السكر التراكمي HbA1c (%)", ValueRange::new(3.0, 15.0))
                    .unknown_ok(),
            ],
        ),
        StepSpec::new("نمط الحياة", RULES.choices.iter().map(choice_field).collect()),
        StepSpec::new("التاريخ المرضي", vec![family_history_field()]),
    ]
});

impl ConditionProfile for Diabetes {
    fn condition(&self) -> Condition {
        Condition::Diabetes
    }

    fn name(&self) -> &str {
        "فحص مخاطر السكري"
    }

    fn steps(&self) -> &[StepSpec] {
        &STEPS
    }

    fn rules(&self) -> &RuleTable {
        &RULES
    }

    fn care_plan(&self, level: RiskLevel) -> Vec<CareItem> {
        match level {
            RiskLevel::Low => vec![
                care(
                    "فحص سنوي",
                    "أعد فحص سكر الصائم مرة كل سنة",
                    CarePriority::Low,
                ),
                care(
                    "نشاط بدني منتظم",
                    "150 دقيقة من المشي السريع أسبوعياً",
                    CarePriority::Low,
                ),
            ],
            RiskLevel::Medium => vec![
                care(
                    "فحص كل 6 أشهر",
                    "سكر الصائم والسكر التراكمي كل ستة أشهر",
                    CarePriority::Medium,
                ),
                care(
                    "تقليل السكريات",
                    "خفف المشروبات المحلاة والنشويات المكررة",
                    CarePriority::Medium,
                ),
                care(
                    "خفض الوزن",
                    "فقدان 5-7% من الوزن يقلل خطر الإصابة بشكل واضح",
                    CarePriority::Medium,
                ),
            ],
            RiskLevel::High | RiskLevel::VeryHigh => vec![
                care(
                    "مراجعة الطبيب",
                    "احجز موعداً مع طبيب الغدد أو الطبيب العام خلال أسبوعين",
                    CarePriority::High,
                ),
                care(
                    "تحاليل تأكيدية",
                    "سكر الصائم والسكر التراكمي واختبار تحمل الجلوكوز",
                    CarePriority::High,
                ),
                care(
                    "خطة غذائية",
                    "استشر أخصائي تغذية لوضع نظام منخفض السكريات",
                    CarePriority::Medium,
                ),
            ],
        }
    }
}
