use std::sync::LazyLock;

use sehati_core::models::condition::Condition;
use sehati_core::models::result::{CareItem, CarePriority, RiskLevel};

use super::common::{
    basic_info_step, bmi_tiers, care, choice_field, diet_rule, exercise_rule, family_history_field,
    family_history_rule, smoking_rule,
};
use crate::fields;
use crate::scoring::{AgeTier, ChoiceRule, LabRule, RuleTable, Tier};
use crate::validation::{FieldSpec, StepSpec};
use crate::ConditionProfile;

/// Hypertension screen. Up to three `systolic/diastolic` readings are
/// averaged before the reading ladder is applied.
pub struct Hypertension;

fn salt_rule() -> ChoiceRule {
    ChoiceRule::new(fields::SALT, "استهلاك الملح", "استهلاك مرتفع للملح")
        .option("low", "قليل", 0)
        .option("moderate", "معتدل", 0)
        .advised("high", "مرتفع", 15, "قلل الملح إلى أقل من 5 جرام يومياً")
}

fn stress_rule() -> ChoiceRule {
    ChoiceRule::new(fields::STRESS, "مستوى التوتر", "التوتر المزمن")
        .option("low", "منخفض", 0)
        .option("moderate", "متوسط", 0)
        .advised("high", "مرتفع", 10, "مارس تمارين الاسترخاء والتنفس العميق")
}

fn alcohol_rule() -> ChoiceRule {
    ChoiceRule::new(fields::ALCOHOL, "الكحول", "استهلاك الكحول")
        .option("none", "لا", 0)
        .option("occasional", "أحياناً", 0)
        .advised("high", "بكثرة", 10, "توقف عن تناول الكحول")
}

static RULES: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    labs: vec![LabRule::either_at_least(
        fields::SYSTOLIC,
        fields::DIASTOLIC,
        vec![
            Tier::new(180.0, 50, "أزمة ارتفاع ضغط الدم")
                .or_secondary(110.0)
                .advise("ضغط الدم مرتفع جداً - توجه للطوارئ أو استشر طبيباً فوراً"),
            Tier::new(140.0, 35, "ارتفاع ضغط الدم - المرحلة الثانية")
                .or_secondary(90.0)
                .advise("ضغط الدم مرتفع - يلزم تقييم طبي"),
            Tier::new(130.0, 20, "ارتفاع ضغط الدم - المرحلة الأولى")
                .or_secondary(80.0)
                .advise("راقب ضغط الدم بانتظام وقلل الملح"),
            Tier::new(120.0, 10, "ضغط دم مرتفع قليلاً"),
        ],
    )],
    choices: vec![
        exercise_rule(0, 15),
        diet_rule(5),
        smoking_rule(0, 15),
        salt_rule(),
        stress_rule(),
        alcohol_rule(),
    ],
    family_history: family_history_rule(15, 10, 5, "تاريخ عائلي لارتفاع ضغط الدم"),
    age: vec![
        AgeTier::new(65, 15, "العمر 65 سنة فأكثر"),
        AgeTier::new(45, 10, "العمر 45 سنة فأكثر"),
    ],
    bmi: bmi_tiers(15, 10),
});

static STEPS: LazyLock<Vec<StepSpec>> = LazyLock::new(|| {
    let [first, second, third] = fields::BP_READINGS;
    vec![
        basic_info_step(),
        StepSpec::new(
            "قراءات ضغط الدم",
            vec![
                FieldSpec::blood_pressure(first, "القراءة الأولى"),
                FieldSpec::blood_pressure(second, "القراءة الثانية").optional(),
                FieldSpec::blood_pressure(third, "القراءة الثالثة").optional(),
            ],
        ),
        StepSpec::new("نمط الحياة", RULES.choices.iter().map(choice_field).collect()),
        StepSpec::new("التاريخ المرضي", vec![family_history_field()]),
    ]
});

impl ConditionProfile for Hypertension {
    fn condition(&self) -> Condition {
        Condition::Hypertension
    }

    fn name(&self) -> &str {
        "فحص مخاطر ارتفاع ضغط الدم"
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
                care("قياس دوري", "قس ضغط الدم مرة كل سنة", CarePriority::Low),
                care(
                    "نمط حياة صحي",
                    "حافظ على النشاط البدني وقلل الملح",
                    CarePriority::Low,
                ),
            ],
            RiskLevel::Medium => vec![
                care(
                    "قياس منزلي",
                    "قس ضغط الدم في المنزل مرتين أسبوعياً وسجل القراءات",
                    CarePriority::Medium,
                ),
                care(
                    "نظام DASH الغذائي",
                    "أكثر من الخضار والفواكه وقلل الصوديوم",
                    CarePriority::Medium,
                ),
            ],
            RiskLevel::High | RiskLevel::VeryHigh => vec![
                care(
                    "مراجعة الطبيب",
                    "احجز موعداً خلال أسبوع لتقييم ضغط الدم",
                    CarePriority::High,
                ),
                care(
                    "مراقبة يومية",
                    "قس ضغط الدم صباحاً ومساءً وشارك القراءات مع طبيبك",
                    CarePriority::High,
                ),
                care(
                    "تقليل الملح",
                    "أقل من 5 جرام ملح يومياً وتجنب الأطعمة المصنعة",
                    CarePriority::Medium,
                ),
            ],
        }
    }
}
