//! Field ids used in drafts, validation schemas and rule tables.
//!
//! The ids match the names the web forms submit, so they stay camelCase.

pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const HEIGHT: &str = "height";
pub const WEIGHT: &str = "weight";

// Labs
pub const FASTING_GLUCOSE: &str = "fastingGlucose";
pub const HBA1C: &str = "hba1c";
pub const CHOLESTEROL_TOTAL: &str = "cholesterolTotal";
pub const LDL: &str = "ldl";
pub const HDL: &str = "hdl";
pub const TRIGLYCERIDES: &str = "triglycerides";

// Blood pressure: composite readings as entered, and the averaged pair
// they are reduced to before scoring.
pub const BP_READINGS: [&str; 3] = ["bpReading1", "bpReading2", "bpReading3"];
pub const SYSTOLIC: &str = "systolicBP";
pub const DIASTOLIC: &str = "diastolicBP";

// Lifestyle
pub const EXERCISE: &str = "exercise";
pub const DIET: &str = "diet";
pub const SMOKING: &str = "smoking";
pub const SALT: &str = "salt";
pub const STRESS: &str = "stress";
pub const ALCOHOL: &str = "alcohol";

// History
pub const FAMILY_HISTORY: &str = "familyHistory";
pub const CHEST_PAIN: &str = "chestPain";
pub const BLOOD_PRESSURE_STATUS: &str = "bloodPressure";
pub const DIABETES_STATUS: &str = "diabetesStatus";
