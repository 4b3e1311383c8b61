use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddictionTracker {
    pub id: String,
    pub name: String,
    pub reset_at: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight: f64,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

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
#[strum(ascii_case_insensitive)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

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
#[strum(ascii_case_insensitive)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

/// Recipe id to selected quantity. Zero quantities are never stored.
pub type Basket = BTreeMap<String, u32>;

/// Day to meal to optional recipe id; every cell is present.
pub type MealPlan = BTreeMap<Day, BTreeMap<Meal, Option<String>>>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BmiInputs {
    pub feet: f64,
    pub inches: f64,
    pub pounds: f64,
}
