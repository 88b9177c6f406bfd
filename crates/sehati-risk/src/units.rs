use serde::{Deserialize, Serialize};
use ts_rs::TS;

const MG_DL_PER_MMOL_L: f64 = 18.0182;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GlucoseUnit {
    MgDl,
    MmolL,
}

pub fn convert_glucose(value: f64, from: GlucoseUnit, to: GlucoseUnit) -> f64 {
    match (from, to) {
        (GlucoseUnit::MgDl, GlucoseUnit::MmolL) => value / MG_DL_PER_MMOL_L,
        (GlucoseUnit::MmolL, GlucoseUnit::MgDl) => value * MG_DL_PER_MMOL_L,
        _ => value,
    }
}
