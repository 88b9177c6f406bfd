use std::sync::LazyLock;

use sehati_core::models::condition::Condition;
use sehati_core::models::input::Gender;
use sehati_core::models::result::{CareItem, CarePriority, RiskLevel};

use super::common::{
    basic_info_step, bmi_tiers, care, choice_field, diet_rule, exercise_rule, family_history_field,
    family_history_rule, smoking_rule,
};
use crate::fields;
use crate::scoring::{AgeTier, ChoiceRule, LabRule, RuleTable, Tier, ValueRange};
use crate::validation::{FieldSpec, StepSpec};
use crate::ConditionProfile;

/// Cardiovascular screen over the lipid panel, lifestyle and history.
pub struct Heart;

fn chest_pain_rule() -> ChoiceRule {
    ChoiceRule::new(fields::CHEST_PAIN, "هل تشعر بألم في الصدر؟", "ألم في الصدر")
        .option("never", "أبداً", 0)
        .advised("sometimes", "أحياناً", 15, "ألم الصدر يحتاج تقييماً طبياً")
        .advised("frequent", "كثيراً", 30, "ألم الصدر المتكرر يستدعي مراجعة طبيب القلب فوراً")
}

fn blood_pressure_status_rule() -> ChoiceRule {
    ChoiceRule::new(fields::BLOOD_PRESSURE_STATUS, "ضغط الدم", "ارتفاع ضغط الدم")
        .option("normal", "طبيعي", 0)
        .option("borderline", "حدي", 10)
        .advised("high", "مرتفع", 20, "السيطرة على ضغط الدم تحمي القلب")
        .option("unknown", "لا أعرف", 0)
}

fn diabetes_status_rule() -> ChoiceRule {
    ChoiceRule::new(fields::DIABETES_STATUS, "هل لديك سكري؟", "الإصابة بالسكري")
        .option("none", "لا", 0)
        .advised("type1", "النوع الأول", 20, "السيطرة على السكر تقلل خطر أمراض القلب")
        .advised("type2", "النوع الثاني", 20, "السيطرة على السكر تقلل خطر أمراض القلب")
        .option("unsure", "غير متأكد", 0)
}

fn lab(id: &str, label: &str, range: ValueRange) -> FieldSpec {
    FieldSpec::number(id, label, range).unknown_ok()
}

static RULES: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    labs: vec![
        LabRule::at_least(
            fields::CHOLESTEROL_TOTAL,
            vec![
                Tier::new(240.0, 25, "ارتفاع الكوليسترول الكلي")
                    .advise("الكوليسترول مرتفع - استشر طبيبك حول العلاج"),
                Tier::new(200.0, 15, "كوليسترول كلي حدي")
                    .advise("قلل الدهون المشبعة لخفض الكوليسترول"),
            ],
        ),
        LabRule::at_least(
            fields::LDL,
            vec![
                Tier::new(160.0, 25, "ارتفاع الكوليسترول الضار LDL")
                    .advise("الكوليسترول الضار مرتفع - يلزم تقييم طبي"),
                Tier::new(130.0, 15, "كوليسترول ضار حدي"),
            ],
        ),
        LabRule::below(
            fields::HDL,
            vec![
                Tier::new(40.0, 20, "انخفاض الكوليسترول النافع HDL")
                    .advise("ارفع الكوليسترول النافع بالرياضة والدهون الصحية"),
                Tier::new(50.0, 10, "كوليسترول نافع منخفض قليلاً"),
            ],
        ),
        LabRule::at_least(
            fields::TRIGLYCERIDES,
            vec![Tier::new(200.0, 15, "ارتفاع الدهون الثلاثية")
                .advise("قلل السكريات والكربوهيدرات لخفض الدهون الثلاثية")],
        ),
    ],
    choices: vec![
        exercise_rule(10, 20),
        diet_rule(15),
        smoking_rule(10, 25),
        chest_pain_rule(),
        blood_pressure_status_rule(),
        diabetes_status_rule(),
    ],
    family_history: family_history_rule(20, 10, 5, "تاريخ عائلي لأمراض القلب"),
    age: vec![
        AgeTier::new(45, 15, "رجل بعمر 45 سنة فأكثر").only(Gender::Male),
        AgeTier::new(55, 15, "امرأة بعمر 55 سنة فأكثر").only(Gender::Female),
    ],
    bmi: bmi_tiers(15, 10),
});

static STEPS: LazyLock<Vec<StepSpec>> = LazyLock::new(|| {
    let (lifestyle, history) = RULES.choices.split_at(3);
    let mut history: Vec<FieldSpec> = history.iter().map(choice_field).collect();
    history.insert(0, family_history_field());

    vec![
        basic_info_step(),
        StepSpec::new(
            "تحليل الدهون",
            vec![
                lab(
                    fields::CHOLESTEROL_TOTAL,
                    "الكوليسترول الكلي (mg/dL)",
                    ValueRange::new(50.0, 500.0),
                ),
                lab(fields::LDL, "الكوليسترول الضار LDL (mg/dL)", ValueRange::new(30.0, 300.0)),
                lab(fields::HDL, "الكوليسترول النافع HDL (mg/dL)", ValueRange::new(10.0, 150.0)),
                lab(
                    fields::TRIGLYCERIDES,
                    "الدهون الثلاثية (mg/dL)",
                    ValueRange::new(20.0, 1000.0),
                ),
            ],
        ),
        StepSpec::new("نمط الحياة", lifestyle.iter().map(choice_field).collect()),
        StepSpec::new("التاريخ المرضي", history),
    ]
});

impl ConditionProfile for Heart {
    fn condition(&self) -> Condition {
        Condition::Heart
    }

    fn name(&self) -> &str {
        "فحص مخاطر أمراض القلب"
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
                    "فحص دهون دوري",
                    "أعد تحليل الدهون كل 4 إلى 6 سنوات",
                    CarePriority::Low,
                ),
                care(
                    "نشاط بدني",
                    "30 دقيقة من النشاط المعتدل معظم أيام الأسبوع",
                    CarePriority::Low,
                ),
            ],
            RiskLevel::Medium => vec![
                care(
                    "تحليل دهون سنوي",
                    "راقب الكوليسترول والدهون الثلاثية سنوياً",
                    CarePriority::Medium,
                ),
                care(
                    "نظام غذائي للقلب",
                    "قلل الدهون المشبعة وأكثر من الألياف والأسماك",
                    CarePriority::Medium,
                ),
            ],
            RiskLevel::High | RiskLevel::VeryHigh => vec![
                care(
                    "مراجعة طبيب القلب",
                    "احجز موعداً لتقييم شامل لصحة القلب",
                    CarePriority::High,
                ),
                care(
                    "تخطيط القلب",
                    "اطلب تخطيط قلب كهربائي وتحاليل شاملة",
                    CarePriority::High,
                ),
                care(
                    "الإقلاع عن التدخين",
                    "التدخين من أقوى عوامل خطر أمراض القلب",
                    CarePriority::High,
                ),
            ],
        }
    }
}
