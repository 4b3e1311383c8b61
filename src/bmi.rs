use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Imperial BMI conversion factor (lb / in^2 to kg / m^2).
const IMPERIAL_FACTOR: f64 = 703.0;

const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 25.0;
const OVERWEIGHT_BELOW: f64 = 30.0;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

impl BmiCategory {
    /// Buckets a BMI value using half-open thresholds. Zero, negative and
    /// non-finite values have no category.
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        if !bmi.is_finite() || bmi <= 0.0 {
            return None;
        }
        let category = if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < NORMAL_BELOW {
            BmiCategory::Normal
        } else if bmi < OVERWEIGHT_BELOW {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        };
        Some(category)
    }
}

/// Display label for an optional category; empty when there is none yet.
pub fn category_label(category: Option<BmiCategory>) -> &'static str {
    match category {
        Some(BmiCategory::Underweight) => "Underweight",
        Some(BmiCategory::Normal) => "Normal",
        Some(BmiCategory::Overweight) => "Overweight",
        Some(BmiCategory::Obesity) => "Obesity",
        None => "",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BmiReading {
    pub bmi: Option<f64>,
    pub category: Option<BmiCategory>,
}

pub fn total_inches(feet: f64, inches: f64) -> f64 {
    feet * 12.0 + inches
}

pub fn compute_bmi(feet: f64, inches: f64, pounds: f64) -> BmiReading {
    let height = total_inches(feet, inches);
    if height.is_nan() || height <= 0.0 {
        return BmiReading {
            bmi: None,
            category: None,
        };
    }
    let bmi = pounds * IMPERIAL_FACTOR / (height * height);
    BmiReading {
        bmi: Some(bmi),
        category: BmiCategory::from_bmi(bmi),
    }
}

/// Weight range in pounds that lands in the Normal band for a height.
pub fn healthy_weight_range(feet: f64, inches: f64) -> Option<(f64, f64)> {
    let height = total_inches(feet, inches);
    if height.is_nan() || height <= 0.0 {
        return None;
    }
    let to_pounds = |bmi: f64| bmi * height * height / IMPERIAL_FACTOR;
    Some((to_pounds(UNDERWEIGHT_BELOW), to_pounds(NORMAL_BELOW)))
}
