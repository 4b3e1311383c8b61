//! Export and import of every persisted value as one JSON document.
//!
//! Import is key-presence driven: each top-level key found in the document
//! overwrites the matching stored value verbatim, absent keys are left
//! alone. Stores re-read storage afterwards, so values that do not decode
//! fall back to their defaults exactly as a corrupt store would on startup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dates::format_date;
use crate::storage::{SharedStorage, write_raw};
use crate::stores::keys;
use crate::types::{AddictionTracker, Basket, MealPlan, WeightEntry};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Import failed: file is not valid JSON ({0})")]
    Parse(#[from] serde_json::Error),
    #[error("Import failed: expected a JSON object at the top level")]
    NotAnObject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BmiSnapshot {
    pub ft: f64,
    pub inch: f64,
    pub w: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub addictions: Vec<AddictionTracker>,
    pub weights: Vec<WeightEntry>,
    pub bmi: BmiSnapshot,
    pub recipes_basket: Basket,
    pub mealplan: MealPlan,
    pub weight_goal: Option<f64>,
}

impl BackupDocument {
    pub fn to_json(&self) -> Result<String, BackupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Storage keys written by an import, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub applied: Vec<&'static str>,
}

pub fn backup_file_name(today: NaiveDate) -> String {
    format!("wellness-backup-{}.json", format_date(&today))
}

/// Parses `text` and writes every present key to storage. Nothing is written
/// unless the whole document parses as a JSON object.
pub fn apply_snapshot(storage: &SharedStorage, text: &str) -> Result<ImportSummary, BackupError> {
    let doc: Value = serde_json::from_str(text)?;
    let Value::Object(doc) = doc else {
        return Err(BackupError::NotAnObject);
    };

    let mut summary = ImportSummary::default();
    let mut put = |key: &'static str, value: &Value| {
        write_raw(storage, key, value.to_string());
        summary.applied.push(key);
    };

    if let Some(value) = doc.get("addictions") {
        put(keys::ADDICTIONS, value);
    }
    if let Some(value) = doc.get("weights") {
        put(keys::WEIGHTS, value);
    }
    match doc.get("bmi") {
        Some(Value::Object(bmi)) => {
            for (field, key) in [
                ("ft", keys::HEIGHT_FEET),
                ("inch", keys::HEIGHT_INCHES),
                ("w", keys::WEIGHT_POUNDS),
            ] {
                if let Some(value) = bmi.get(field) {
                    put(key, value);
                }
            }
        }
        Some(other) => tracing::warn!(value = %other, "ignoring non-object bmi section"),
        None => {}
    }
    if let Some(value) = doc.get("recipesBasket") {
        put(keys::RECIPES_BASKET, value);
    }
    if let Some(value) = doc.get("mealplan") {
        put(keys::MEAL_PLAN, value);
    }
    if let Some(value) = doc.get("weightGoal") {
        // An unset goal exports as null and is stored as zero.
        let goal = if value.is_null() { Value::from(0.0) } else { value.clone() };
        put(keys::WEIGHT_GOAL, &goal);
    }

    tracing::info!(keys = ?summary.applied, "imported backup");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStorage, shared};

    fn raw(storage: &SharedStorage, key: &str) -> Option<String> {
        storage.borrow().get(key).unwrap()
    }

    #[test]
    fn test_file_name_embeds_date() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(backup_file_name(today), "wellness-backup-2024-07-04.json");
    }

    #[test]
    fn test_malformed_json_writes_nothing() {
        let storage = shared(MemoryStorage::new());
        let err = apply_snapshot(&storage, "{\"addictions\": [").unwrap_err();
        assert!(matches!(err, BackupError::Parse(_)));
        assert_eq!(raw(&storage, keys::ADDICTIONS), None);
    }

    #[test]
    fn test_non_object_is_rejected() {
        let storage = shared(MemoryStorage::new());
        let err = apply_snapshot(&storage, "[1,2,3]").unwrap_err();
        assert!(matches!(err, BackupError::NotAnObject));
    }

    #[test]
    fn test_absent_keys_are_untouched() {
        let storage = shared(MemoryStorage::new());
        storage
            .borrow_mut()
            .set(keys::THEME, "\"dark\"".to_string())
            .unwrap();
        storage
            .borrow_mut()
            .set(keys::WEIGHTS, "[]".to_string())
            .unwrap();
        let summary = apply_snapshot(&storage, r#"{"addictions":[]}"#).unwrap();
        assert_eq!(summary.applied, vec![keys::ADDICTIONS]);
        assert_eq!(raw(&storage, keys::WEIGHTS).as_deref(), Some("[]"));
        assert_eq!(raw(&storage, keys::THEME).as_deref(), Some("\"dark\""));
    }

    #[test]
    fn test_bmi_fields_map_to_separate_keys() {
        let storage = shared(MemoryStorage::new());
        apply_snapshot(&storage, r#"{"bmi":{"ft":6,"w":200.5}}"#).unwrap();
        assert_eq!(raw(&storage, keys::HEIGHT_FEET).as_deref(), Some("6"));
        assert_eq!(raw(&storage, keys::WEIGHT_POUNDS).as_deref(), Some("200.5"));
        assert_eq!(raw(&storage, keys::HEIGHT_INCHES), None);
    }

    #[test]
    fn test_null_goal_is_stored_as_zero() {
        let storage = shared(MemoryStorage::new());
        apply_snapshot(&storage, r#"{"weightGoal":null}"#).unwrap();
        assert_eq!(raw(&storage, keys::WEIGHT_GOAL).as_deref(), Some("0.0"));
    }

    #[test]
    fn test_values_are_written_verbatim() {
        let storage = shared(MemoryStorage::new());
        apply_snapshot(&storage, r#"{"recipesBasket":{"not-a-recipe":"lots"}}"#).unwrap();
        assert_eq!(
            raw(&storage, keys::RECIPES_BASKET).as_deref(),
            Some(r#"{"not-a-recipe":"lots"}"#)
        );
    }
}
