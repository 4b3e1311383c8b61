//! Persisted state, one store per slice. Each store owns its keys in the
//! shared [`KeyValueStore`](crate::storage::KeyValueStore) and writes every
//! mutation through immediately.

pub mod addictions;
pub mod basket;
pub mod mealplan;
pub mod profile;
pub mod weights;

pub use addictions::AddictionStore;
pub use basket::BasketStore;
pub use mealplan::MealPlanStore;
pub use profile::{ProfileStore, ThemeStore};
pub use weights::{Trend, WeightStore};

/// Storage keys, one per persisted value.
pub mod keys {
    pub const ADDICTIONS: &str = "wellness.addictions";
    pub const WEIGHTS: &str = "wellness.weights";
    pub const HEIGHT_FEET: &str = "wellness.heightFt";
    pub const HEIGHT_INCHES: &str = "wellness.heightIn";
    pub const WEIGHT_POUNDS: &str = "wellness.weightLb";
    pub const WEIGHT_GOAL: &str = "wellness.weightGoal";
    pub const RECIPES_BASKET: &str = "wellness.recipesBasket";
    pub const MEAL_PLAN: &str = "wellness.mealplan";
    pub const THEME: &str = "wellness.theme";
}
