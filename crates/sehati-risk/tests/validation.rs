use sehati_core::models::draft::StepValues;
use sehati_risk::conditions::common::basic_info_step;
use sehati_risk::conditions::diabetes::Diabetes;
use sehati_risk::conditions::hypertension::Hypertension;
use sehati_risk::error::RiskError;
use sehati_risk::fields;
use sehati_risk::validation::{message, retain_declared, validate_step, FieldValue};
use sehati_risk::vitals::Reading;
use sehati_risk::ConditionProfile;

fn values(pairs: &[(&str, &str)]) -> StepValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn valid_basic_info() -> StepValues {
    values(&[
        ("age", "45"),
        ("gender", "male"),
        ("height", "175"),
        ("weight", "80"),
    ])
}

#[test]
fn valid_basic_info_parses_numbers_and_choice() {
    let parsed = validate_step(&basic_info_step(), &valid_basic_info()).unwrap();
    assert_eq!(parsed.get(fields::AGE), Some(&FieldValue::Number(45.0)));
    assert_eq!(parsed.get(fields::GENDER), Some(&FieldValue::Choice("male".to_string())));
}

#[test]
fn short_height_reports_range_message() {
    let mut input = valid_basic_info();
    input.insert("height".to_string(), "30".to_string());

    let errors = validate_step(&basic_info_step(), &input).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(fields::HEIGHT), Some("يجب أن يكون الطول بين 50 و 250 سم"));
}

#[test]
fn every_invalid_field_is_reported_together() {
    let input = values(&[("age", "abc"), ("height", "30"), ("weight", "")]);

    let errors = validate_step(&basic_info_step(), &input).unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(fields::AGE), Some(message::NOT_A_NUMBER));
    assert_eq!(errors.get(fields::WEIGHT), Some(message::REQUIRED));
    assert_eq!(errors.get(fields::GENDER), Some(message::REQUIRED));
    assert!(errors.contains(fields::HEIGHT));
}

#[test]
fn fractional_age_is_rejected() {
    let mut input = valid_basic_info();
    input.insert("age".to_string(), "45.5".to_string());

    let errors = validate_step(&basic_info_step(), &input).unwrap_err();
    assert_eq!(errors.get(fields::AGE), Some(message::NOT_AN_INTEGER));
}

#[test]
fn whitespace_only_counts_as_missing() {
    let mut input = valid_basic_info();
    input.insert("weight".to_string(), "   ".to_string());

    let errors = validate_step(&basic_info_step(), &input).unwrap_err();
    assert_eq!(errors.get(fields::WEIGHT), Some(message::REQUIRED));
}

#[test]
fn unknown_token_is_accepted_only_where_allowed() {
    let parsed = Diabetes
        .validate_step(1, &values(&[("fastingGlucose", "unknown"), ("hba1c", "5.4")]))
        .unwrap();
    assert_eq!(parsed.get(fields::FASTING_GLUCOSE), Some(&FieldValue::Unknown));
    assert_eq!(parsed.get(fields::HBA1C), Some(&FieldValue::Number(5.4)));

    let mut input = valid_basic_info();
    input.insert("age".to_string(), "unknown".to_string());
    let errors = validate_step(&basic_info_step(), &input).unwrap_err();
    assert_eq!(errors.get(fields::AGE), Some(message::NOT_A_NUMBER));
}

#[test]
fn blood_pressure_accepts_composite_readings() {
    let parsed = Hypertension
        .validate_step(1, &values(&[("bpReading1", "135/85")]))
        .unwrap();
    assert_eq!(
        parsed.get("bpReading1"),
        Some(&FieldValue::Reading(Reading {
            systolic: 135.0,
            diastolic: 85.0
        }))
    );
    assert!(!parsed.contains_key("bpReading2"));
}

#[test]
fn malformed_or_implausible_readings_are_rejected() {
    for raw in ["120-80", "120/", "1200/80", "400/80", "120/20", "abc"] {
        let err = Hypertension
            .validate_step(1, &values(&[("bpReading1", raw)]))
            .unwrap_err();
        let RiskError::InvalidStep { step, errors } = err else {
            panic!("expected invalid step for {raw}");
        };
        assert_eq!(step, 1);
        assert_eq!(errors.get("bpReading1"), Some(message::BLOOD_PRESSURE), "{raw}");
    }
}

#[test]
fn choice_outside_options_is_rejected() {
    let err = Diabetes
        .validate_step(2, &values(&[("exercise", "sometimes"), ("diet", "poor"), ("smoking", "no")]))
        .unwrap_err();
    let RiskError::InvalidStep { errors, .. } = err else {
        panic!("expected invalid step");
    };
    assert_eq!(errors.get(fields::EXERCISE), Some(message::INVALID_OPTION));
    assert_eq!(errors.len(), 1);
}

#[test]
fn undeclared_values_are_ignored_and_dropped() {
    let mut input = valid_basic_info();
    input.insert("nickname".to_string(), "sam".to_string());
    input.insert("weight".to_string(), " 80 ".to_string());

    let parsed = validate_step(&basic_info_step(), &input).unwrap();
    assert!(!parsed.contains_key("nickname"));

    let kept = retain_declared(&basic_info_step(), &input);
    assert!(!kept.contains_key("nickname"));
    assert_eq!(kept.get("weight").map(String::as_str), Some("80"));
}

#[test]
fn step_index_past_the_end_is_an_error() {
    let err = Diabetes.validate_step(9, &StepValues::new()).unwrap_err();
    assert!(matches!(err, RiskError::StepOutOfRange { index: 9, total: 4 }));
}
