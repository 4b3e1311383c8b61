use serde::Serialize;

use crate::bmi::BmiCategory;
use crate::recipes::catalog::{Recipe, catalog};

/// Macro split (percent of calories) with notes for one BMI band.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub carb_percent: u8,
    pub protein_percent: u8,
    pub fat_percent: u8,
    pub notes: &'static str,
    pub tips: &'static [&'static str],
}

pub fn guidance_for(category: Option<BmiCategory>) -> Guidance {
    match category {
        Some(BmiCategory::Underweight) => Guidance {
            carb_percent: 50,
            protein_percent: 20,
            fat_percent: 30,
            notes: "Aim for a steady calorie surplus built on nutrient-dense foods.",
            tips: &[
                "Eat every 3 to 4 hours and add snacks between meals.",
                "Favour calorie-dense staples: nut butters, whole milk, avocado, rice.",
                "Pair strength training with protein at every meal.",
            ],
        },
        Some(BmiCategory::Normal) => Guidance {
            carb_percent: 45,
            protein_percent: 25,
            fat_percent: 30,
            notes: "Maintain with balanced plates and consistent portions.",
            tips: &[
                "Fill half the plate with vegetables.",
                "Keep protein in every meal to stay full.",
                "Choose whole grains over refined ones.",
            ],
        },
        Some(BmiCategory::Overweight) => Guidance {
            carb_percent: 40,
            protein_percent: 30,
            fat_percent: 30,
            notes: "A modest calorie deficit with higher protein preserves muscle.",
            tips: &[
                "Swap sugary drinks for water or tea.",
                "Load up on fibre: vegetables, legumes, berries.",
                "Plan meals ahead to avoid impulse snacking.",
            ],
        },
        Some(BmiCategory::Obesity) => Guidance {
            carb_percent: 35,
            protein_percent: 35,
            fat_percent: 30,
            notes: "Prioritise protein and fibre; reduce refined carbohydrates.",
            tips: &[
                "Build meals around lean protein and non-starchy vegetables.",
                "Use smaller plates and track portions.",
                "Talk to a healthcare professional about a sustainable plan.",
            ],
        },
        None => Guidance {
            carb_percent: 50,
            protein_percent: 20,
            fat_percent: 30,
            notes: "Enter your height and weight for tailored guidance.",
            tips: &[
                "Balanced meals: vegetables, protein, whole grains, healthy fats.",
            ],
        },
    }
}

/// Recipes suited to `category`, or the whole catalog without one.
pub fn recipes_for(category: Option<BmiCategory>) -> Vec<&'static Recipe> {
    match category {
        Some(category) => catalog().iter().filter(|r| r.suits(category)).collect(),
        None => catalog().iter().collect(),
    }
}
