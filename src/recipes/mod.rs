//! Static recipe data and the BMI-driven guidance built on top of it.

pub mod catalog;
pub mod grocery;
pub mod guidance;

pub use catalog::{Recipe, catalog, find};
pub use grocery::{GroceryItem, aggregate_ingredients, grocery_list_text};
pub use guidance::{Guidance, guidance_for, recipes_for};
