use std::collections::BTreeMap;

use strum::VariantArray;

use crate::recipes::find;
use crate::storage::{SharedStorage, Slot};
use crate::stores::keys;
use crate::types::{Day, Meal, MealPlan};

/// A plan where every `(day, meal)` pair is present and empty.
pub fn create_blank_plan(days: &[Day], meals: &[Meal]) -> MealPlan {
    days.iter()
        .map(|day| (*day, meals.iter().map(|meal| (*meal, None)).collect()))
        .collect()
}

fn full_blank_plan() -> MealPlan {
    create_blank_plan(Day::VARIANTS, Meal::VARIANTS)
}

pub struct MealPlanStore {
    plan: Slot<MealPlan>,
}

impl MealPlanStore {
    pub fn load(storage: &SharedStorage) -> Self {
        let mut store = Self {
            plan: Slot::load(storage, keys::MEAL_PLAN, full_blank_plan),
        };
        store.normalize();
        store
    }

    pub fn reload(&mut self) {
        self.plan.reload(full_blank_plan);
        self.normalize();
    }

    pub fn plan(&self) -> &MealPlan {
        self.plan.get()
    }

    pub fn cell(&self, day: Day, meal: Meal) -> Option<&str> {
        self.plan()
            .get(&day)
            .and_then(|meals| meals.get(&meal))
            .and_then(|cell| cell.as_deref())
    }

    /// Overwrites one cell. The recipe id is not checked against the catalog.
    pub fn set_cell(&mut self, day: Day, meal: Meal, recipe_id: Option<&str>) {
        let value = clean_id(recipe_id);
        tracing::debug!(%day, %meal, recipe = ?value, "setting meal plan cell");
        self.plan.update(|plan| {
            plan.entry(day).or_default().insert(meal, value);
        });
    }

    pub fn clear(&mut self) {
        self.plan.replace(full_blank_plan());
    }

    /// Ingredients of the recipe in a cell; empty for an empty cell or an id
    /// that no longer resolves.
    pub fn ingredients_for(&self, day: Day, meal: Meal) -> &'static [&'static str] {
        self.cell(day, meal)
            .and_then(find)
            .map(|recipe| recipe.ingredients)
            .unwrap_or(&[])
    }

    /// Fills missing cells and turns blank ids into empty cells, in memory
    /// only.
    fn normalize(&mut self) {
        let mut filled = full_blank_plan();
        for (day, meals) in self.plan.get() {
            let row: &mut BTreeMap<Meal, Option<String>> = filled.entry(*day).or_default();
            for (meal, cell) in meals {
                row.insert(*meal, clean_id(cell.as_deref()));
            }
        }
        if &filled != self.plan.get() {
            self.plan.set_in_memory(filled);
        }
    }
}

fn clean_id(recipe_id: Option<&str>) -> Option<String> {
    recipe_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
