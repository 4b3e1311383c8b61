use chrono::NaiveDate;
use serde::Serialize;

use crate::backup::{self, BackupDocument, BackupError, BmiSnapshot, ImportSummary};
use crate::bmi::{BmiReading, category_label};
use crate::recipes::{Guidance, guidance_for};
use crate::storage::{KeyValueStore, SharedStorage, shared};
use crate::stores::addictions::streak_days;
use crate::stores::{
    AddictionStore, BasketStore, MealPlanStore, ProfileStore, ThemeStore, Trend, WeightStore,
};

/// Every store of one session over a single storage handle.
pub struct Dashboard {
    storage: SharedStorage,
    pub addictions: AddictionStore,
    pub weights: WeightStore,
    pub profile: ProfileStore,
    pub theme: ThemeStore,
    pub basket: BasketStore,
    pub meal_plan: MealPlanStore,
}

impl Dashboard {
    pub fn new<S: KeyValueStore + 'static>(storage: S) -> Self {
        Self::with_shared(shared(storage))
    }

    pub fn with_shared(storage: SharedStorage) -> Self {
        Self {
            addictions: AddictionStore::load(&storage),
            weights: WeightStore::load(&storage),
            profile: ProfileStore::load(&storage),
            theme: ThemeStore::load(&storage),
            basket: BasketStore::load(&storage),
            meal_plan: MealPlanStore::load(&storage),
            storage,
        }
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Re-reads every store from storage.
    pub fn reload(&mut self) {
        self.addictions.reload();
        self.weights.reload();
        self.profile.reload();
        self.theme.reload();
        self.basket.reload();
        self.meal_plan.reload();
    }

    pub fn export_snapshot(&self) -> BackupDocument {
        let inputs = self.profile.inputs();
        let goal = self.profile.goal();
        BackupDocument {
            addictions: self.addictions.list().to_vec(),
            weights: self.weights.entries().to_vec(),
            bmi: BmiSnapshot {
                ft: inputs.feet,
                inch: inputs.inches,
                w: inputs.pounds,
            },
            recipes_basket: self.basket.items().clone(),
            mealplan: self.meal_plan.plan().clone(),
            weight_goal: (goal > 0.0).then_some(goal),
        }
    }

    /// Applies a backup and reloads. A parse failure leaves state unchanged.
    pub fn import_snapshot(&mut self, text: &str) -> Result<ImportSummary, BackupError> {
        let summary = backup::apply_snapshot(&self.storage, text)?;
        self.reload();
        Ok(summary)
    }

    pub fn bmi(&self) -> BmiReading {
        self.profile.bmi()
    }

    pub fn guidance(&self) -> Guidance {
        guidance_for(self.bmi().category)
    }

    pub fn summary(&self, today: NaiveDate) -> Summary {
        let bmi = self.bmi();
        Summary {
            today,
            streaks: self
                .addictions
                .list()
                .iter()
                .map(|t| StreakLine {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    days: streak_days(t, today),
                })
                .collect(),
            weight_delta: self.weights.delta(),
            weight_trend: self.weights.trend(),
            goal: self.profile.goal(),
            goal_progress: self.weights.progress_percent(self.profile.goal()),
            bmi: bmi.bmi,
            bmi_category: category_label(bmi.category),
            basket_recipes: self.basket.items().len(),
            planned_meals: self
                .meal_plan
                .plan()
                .values()
                .flat_map(|meals| meals.values())
                .filter(|cell| cell.is_some())
                .count(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StreakLine {
    pub id: String,
    pub name: String,
    pub days: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub today: NaiveDate,
    pub streaks: Vec<StreakLine>,
    pub weight_delta: Option<f64>,
    pub weight_trend: Option<Trend>,
    pub goal: f64,
    pub goal_progress: f64,
    pub bmi: Option<f64>,
    pub bmi_category: &'static str,
    pub basket_recipes: usize,
    pub planned_meals: usize,
}

pub fn streak_pill(days: i64) -> String {
    if days == 1 {
        "1 day clean".to_string()
    } else {
        format!("{days} days clean")
    }
}

pub fn delta_pill(delta: Option<f64>) -> String {
    match delta {
        Some(delta) => format!("Δ since start: {delta:.1} lb"),
        None => "Δ since start: no entries yet".to_string(),
    }
}

pub fn bmi_pill(reading: BmiReading) -> String {
    match reading.bmi {
        Some(bmi) => format!("BMI {bmi:.1} · {}", category_label(reading.category)),
        None => "BMI: enter height and weight".to_string(),
    }
}

pub fn progress_pill(percent: f64) -> String {
    format!("{percent:.0}% to goal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::{Day, Meal};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_pills() {
        assert_eq!(streak_pill(3), "3 days clean");
        assert_eq!(streak_pill(1), "1 day clean");
        assert_eq!(streak_pill(0), "0 days clean");
        assert_eq!(delta_pill(Some(-10.0)), "Δ since start: -10.0 lb");
        assert_eq!(delta_pill(Some(2.24)), "Δ since start: 2.2 lb");
        assert_eq!(progress_pill(49.6), "50% to goal");
    }

    #[test]
    fn test_export_reflects_stores() {
        let mut dash = Dashboard::new(MemoryStorage::new());
        dash.addictions.add("Nicotine", d("2024-01-01"));
        dash.weights.add_or_update(d("2024-01-01"), 200.0);
        dash.basket.set_quantity("veggie-omelette", 2);
        dash.meal_plan.set_cell(Day::Mon, Meal::Breakfast, Some("veggie-omelette"));

        let doc = dash.export_snapshot();
        assert_eq!(doc.addictions.len(), 1);
        assert_eq!(doc.weights.len(), 1);
        assert_eq!(doc.bmi, BmiSnapshot { ft: 5.0, inch: 10.0, w: 180.0 });
        assert_eq!(doc.recipes_basket.get("veggie-omelette"), Some(&2));
        assert_eq!(doc.weight_goal, None);

        dash.profile.set_goal(170.0);
        assert_eq!(dash.export_snapshot().weight_goal, Some(170.0));
    }

    #[test]
    fn test_export_uses_backup_key_names() {
        let dash = Dashboard::new(MemoryStorage::new());
        let json: serde_json::Value =
            serde_json::from_str(&dash.export_snapshot().to_json().unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["addictions", "bmi", "mealplan", "recipesBasket", "weightGoal", "weights"]
        );
        assert!(obj["weightGoal"].is_null());
    }

    #[test]
    fn test_failed_import_leaves_state() {
        let mut dash = Dashboard::new(MemoryStorage::new());
        dash.addictions.add("Nicotine", d("2024-01-01"));
        assert!(dash.import_snapshot("not json").is_err());
        assert_eq!(dash.addictions.list().len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut dash = Dashboard::new(MemoryStorage::new());
        let today = d("2024-03-10");
        dash.addictions.add("Nicotine", d("2024-03-07"));
        dash.weights.add_or_update(d("2024-03-01"), 200.0);
        dash.weights.add_or_update(d("2024-03-10"), 190.0);
        dash.profile.set_goal(180.0);
        dash.meal_plan.set_cell(Day::Tue, Meal::Dinner, Some("lentil-vegetable-soup"));

        let summary = dash.summary(today);
        assert_eq!(summary.streaks[0].days, 3);
        assert_eq!(summary.weight_delta, Some(-10.0));
        assert_eq!(summary.weight_trend, Some(Trend::Down));
        assert_eq!(summary.goal_progress, 50.0);
        assert_eq!(summary.bmi_category, "Overweight");
        assert_eq!(summary.planned_meals, 1);
    }
}
