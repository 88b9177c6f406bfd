use std::collections::BTreeMap;

use sehati_core::models::condition::Condition;
use sehati_core::models::draft::{step_key, StepValues};
use sehati_core::models::input::{FamilyHistory, Gender, LabValue};
use sehati_core::models::result::{BmiCategory, BpCategory, RiskLevel};
use sehati_risk::engine::RiskEngine;
use sehati_risk::error::RiskError;
use sehati_risk::scoring::EngineConfig;
use sehati_risk::units::{convert_glucose, GlucoseUnit};
use sehati_risk::validation::{message, FieldKind};
use sehati_risk::vitals::{self, average_reading, classify_bmi, classify_bp, indicate, IndicatorStatus, Reading};
use sehati_risk::{all_profiles, fields, get_profile, profile_for, ConditionProfile};

fn values(pairs: &[(&str, &str)]) -> StepValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn hypertension_answers() -> BTreeMap<String, StepValues> {
    BTreeMap::from([
        (
            step_key(0),
            values(&[("age", "50"), ("gender", "male"), ("height", "175"), ("weight", "70")]),
        ),
        (
            step_key(1),
            values(&[("bpReading1", "150/95"), ("bpReading2", "140/85"), ("bpReading3", "")]),
        ),
        (
            step_key(2),
            values(&[
                ("exercise", "daily"),
                ("diet", "healthy"),
                ("smoking", "no"),
                ("salt", "low"),
                ("stress", "low"),
                ("alcohol", "none"),
            ]),
        ),
        (step_key(3), values(&[("familyHistory", "none")])),
    ])
}

#[test]
fn registry_has_one_profile_per_condition() {
    let profiles = all_profiles();
    assert_eq!(profiles.len(), Condition::ALL.len());
    for (profile, condition) in profiles.iter().zip(Condition::ALL) {
        assert_eq!(profile.condition(), condition);
        assert!(!profile.name().is_empty());
    }
    assert!(matches!(get_profile("cancer"), Err(RiskError::Core(_))));
    assert_eq!(get_profile("heart").unwrap().condition(), Condition::Heart);
}

#[test]
fn every_profile_starts_with_basic_info() {
    for profile in all_profiles() {
        let first = &profile.steps()[0];
        for id in [fields::AGE, fields::GENDER, fields::HEIGHT, fields::WEIGHT] {
            assert!(first.field(id).is_some(), "{} missing {id}", profile.name());
        }
        assert!(profile.total_steps() >= 3);
    }
}

#[test]
fn every_scored_field_is_collected_by_some_step() {
    for profile in all_profiles() {
        let declared = |id: &str| profile.steps().iter().any(|s| s.field(id).is_some());
        let readings_declared = fields::BP_READINGS.iter().any(|id| declared(*id));
        let rules = profile.rules();

        for rule in &rules.labs {
            for id in rule.fields() {
                let derived = (id == fields::SYSTOLIC || id == fields::DIASTOLIC) && readings_declared;
                assert!(declared(id) || derived, "{}: lab {id} never collected", profile.name());
            }
        }
        for rule in &rules.choices {
            let spec = profile
                .steps()
                .iter()
                .find_map(|s| s.field(&rule.field))
                .unwrap_or_else(|| panic!("{}: choice {} never collected", profile.name(), rule.field));
            assert_eq!(spec.kind, FieldKind::Choice { options: rule.labels() });
        }
        assert!(declared(fields::FAMILY_HISTORY));
    }
}

#[test]
fn form_schema_describes_every_step() {
    let schema = profile_for(Condition::Diabetes).form_schema().unwrap();
    let steps = schema.as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["fields"][0]["id"], "age");
    assert_eq!(steps[1]["fields"][0]["kind"]["type"], "number");
    assert_eq!(steps[1]["fields"][0]["kind"]["allow_unknown"], true);
    assert_eq!(steps[2]["fields"][0]["kind"]["options"][3]["value"], "none");
    assert_eq!(steps[2]["fields"][0]["kind"]["options"][3]["label"], "لا أمارس");
    assert_eq!(steps[0]["fields"][1]["kind"]["options"][1]["label"], "أنثى");
}

#[test]
fn parse_input_averages_readings_and_scores() {
    let profile = profile_for(Condition::Hypertension);
    let answers = hypertension_answers();

    let input = profile.parse_input(&answers).unwrap();
    assert_eq!(input.age, 50);
    assert_eq!(input.gender, Gender::Male);
    assert_eq!(input.family_history, FamilyHistory::None);
    assert_eq!(input.lab(fields::SYSTOLIC), LabValue::Measured(145.0));
    assert_eq!(input.lab(fields::DIASTOLIC), LabValue::Measured(90.0));
    assert_eq!(input.choice(fields::SALT), Some("low"));

    let result = RiskEngine::new(profile.as_ref(), EngineConfig::default()).assess(&input);
    assert_eq!(result.risk_percentage, 45);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.blood_pressure, Some(BpCategory::Stage2));
    assert_eq!(result.bmi_category, BmiCategory::Normal);
}

#[test]
fn parse_input_reports_the_first_invalid_step() {
    let profile = profile_for(Condition::Hypertension);
    let mut answers = hypertension_answers();
    answers.remove(&step_key(2));

    let err = profile.parse_input(&answers).unwrap_err();
    let RiskError::InvalidStep { step, errors } = err else {
        panic!("expected invalid step");
    };
    assert_eq!(step, 2);
    assert_eq!(errors.len(), 6);
    assert_eq!(errors.get(fields::SALT), Some(message::REQUIRED));
}

#[test]
fn summary_lists_answers_and_result() {
    let profile = profile_for(Condition::Hypertension);
    let answers = hypertension_answers();
    let input = profile.parse_input(&answers).unwrap();
    let result = RiskEngine::new(profile.as_ref(), EngineConfig::default()).assess(&input);

    let report = profile.summarize(&answers, &result);
    assert!(report.starts_with(&format!("## {}", profile.name())));
    assert!(report.contains("- القراءة الأولى: 150/95"));
    assert!(!report.contains("القراءة الثالثة"));
    assert!(report.contains("- نسبة المخاطر: 45%"));
    assert!(report.contains(BpCategory::Stage2.label()));
}

#[test]
fn summary_shows_unknown_labs_in_words() {
    let profile = profile_for(Condition::Diabetes);
    let answers = BTreeMap::from([
        (
            step_key(0),
            values(&[("age", "30"), ("gender", "female"), ("height", "165"), ("weight", "60")]),
        ),
        (step_key(1), values(&[("fastingGlucose", "unknown"), ("hba1c", "5.1")])),
        (
            step_key(2),
            values(&[("exercise", "weekly"), ("diet", "average"), ("smoking", "no")]),
        ),
        (step_key(3), values(&[("familyHistory", "unsure")])),
    ]);
    let input = profile.parse_input(&answers).unwrap();
    assert_eq!(input.lab(fields::FASTING_GLUCOSE), LabValue::Unknown);

    let result = RiskEngine::new(profile.as_ref(), EngineConfig::default()).assess(&input);
    assert_eq!(result.risk_percentage, 5);

    let report = profile.summarize(&answers, &result);
    assert!(report.contains("غير معروف"));
}

#[test]
fn summary_shows_option_labels_instead_of_slugs() {
    let profile = profile_for(Condition::Diabetes);
    let answers = BTreeMap::from([
        (
            step_key(0),
            values(&[("age", "52"), ("gender", "female"), ("height", "162"), ("weight", "74")]),
        ),
        (step_key(1), values(&[("fastingGlucose", "108"), ("hba1c", "5.9")])),
        (
            step_key(2),
            values(&[("exercise", "rarely"), ("diet", "average"), ("smoking", "former")]),
        ),
        (step_key(3), values(&[("familyHistory", "first_degree")])),
    ]);
    let input = profile.parse_input(&answers).unwrap();
    let result = RiskEngine::new(profile.as_ref(), EngineConfig::default()).assess(&input);

    let report = profile.summarize(&answers, &result);
    assert!(report.contains("- هل يوجد تاريخ عائلي للمرض؟: نعم (أقارب درجة أولى)"));
    assert!(report.contains("- الجنس: أنثى"));
    assert!(report.contains("نادراً"));
    assert!(report.contains("أقلعت"));
    for slug in ["first_degree", "female", "rarely", "former"] {
        assert!(!report.contains(slug), "report shows {slug}");
    }
}

#[test]
fn bmi_matches_the_input_helper() {
    let input = sehati_core::models::input::RiskInput {
        age: 40,
        gender: Gender::Male,
        height_cm: 175.0,
        weight_kg: 70.0,
        labs: BTreeMap::new(),
        choices: BTreeMap::new(),
        family_history: FamilyHistory::None,
    };
    assert_eq!(input.bmi(), vitals::bmi(70.0, 175.0));
}

#[test]
fn bmi_categories_follow_standard_cutoffs() {
    assert!((vitals::bmi(70.0, 175.0) - 22.857).abs() < 0.001);
    assert_eq!(classify_bmi(18.4), BmiCategory::Underweight);
    assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
    assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
    assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
}

#[test]
fn blood_pressure_categories() {
    let bp = |systolic, diastolic| classify_bp(Reading { systolic, diastolic });
    assert_eq!(bp(115.0, 75.0), BpCategory::Normal);
    assert_eq!(bp(125.0, 75.0), BpCategory::Elevated);
    assert_eq!(bp(125.0, 82.0), BpCategory::Stage1);
    assert_eq!(bp(142.0, 70.0), BpCategory::Stage2);
    assert_eq!(bp(150.0, 120.0), BpCategory::Crisis);
}

#[test]
fn readings_average_to_whole_numbers() {
    assert_eq!(average_reading(&[]), None);
    let avg = average_reading(&[
        Reading {
            systolic: 120.0,
            diastolic: 80.0,
        },
        Reading {
            systolic: 131.0,
            diastolic: 85.0,
        },
    ])
    .unwrap();
    assert_eq!(avg.systolic, 126.0);
    assert_eq!(avg.diastolic, 83.0);
}

#[test]
fn lab_indicator_escalates_past_thresholds() {
    assert_eq!(indicate(90.0, 99.0, 125.0).status, IndicatorStatus::Normal);
    assert_eq!(indicate(110.0, 99.0, 125.0).contribution, 15);
    assert_eq!(indicate(150.0, 99.0, 125.0).status, IndicatorStatus::High);
    assert_eq!(indicate(200.0, 99.0, 125.0).contribution, 45);
}

#[test]
fn glucose_converts_between_units() {
    let mmol = convert_glucose(126.0, GlucoseUnit::MgDl, GlucoseUnit::MmolL);
    assert!((mmol - 6.993).abs() < 0.01);
    let back = convert_glucose(mmol, GlucoseUnit::MmolL, GlucoseUnit::MgDl);
    assert!((back - 126.0).abs() < 1e-9);
    assert_eq!(convert_glucose(5.5, GlucoseUnit::MmolL, GlucoseUnit::MmolL), 5.5);
}
