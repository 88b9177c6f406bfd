//! Derived vitals: BMI, blood-pressure classification and averaging, and
//! the per-lab contribution indicator shown next to form inputs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sehati_core::models::result::{BmiCategory, BpCategory};

pub use sehati_core::models::input::bmi;

pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// One blood-pressure reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reading {
    pub systolic: f64,
    pub diastolic: f64,
}

pub fn classify_bp(reading: Reading) -> BpCategory {
    let Reading {
        systolic,
        diastolic,
    } = reading;
    if systolic >= 180.0 || diastolic >= 120.0 {
        BpCategory::Crisis
    } else if systolic >= 140.0 || diastolic >= 90.0 {
        BpCategory::Stage2
    } else if systolic >= 130.0 || diastolic >= 80.0 {
        BpCategory::Stage1
    } else if systolic >= 120.0 {
        BpCategory::Elevated
    } else {
        BpCategory::Normal
    }
}

/// Mean of several readings, each half rounded to the nearest whole mmHg.
/// `None` for an empty slice.
pub fn average_reading(readings: &[Reading]) -> Option<Reading> {
    if readings.is_empty() {
        return None;
    }
    let n = readings.len() as f64;
    let systolic: f64 = readings.iter().map(|r| r.systolic).sum();
    let diastolic: f64 = readings.iter().map(|r| r.diastolic).sum();
    Some(Reading {
        systolic: (systolic / n).round(),
        diastolic: (diastolic / n).round(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IndicatorStatus {
    Normal,
    Borderline,
    High,
    VeryHigh,
}

/// Rough share a single lab value contributes to risk, for inline display
/// while the user is still filling the form. Independent of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabIndicator {
    pub contribution: u8,
    pub status: IndicatorStatus,
}

pub fn indicate(value: f64, normal_max: f64, high_threshold: f64) -> LabIndicator {
    let (contribution, status) = if value <= normal_max {
        (5, IndicatorStatus::Normal)
    } else if value <= high_threshold {
        (15, IndicatorStatus::Borderline)
    } else if value <= high_threshold * 1.5 {
        (30, IndicatorStatus::High)
    } else {
        (45, IndicatorStatus::VeryHigh)
    };
    LabIndicator {
        contribution,
        status,
    }
}
