use serde::Serialize;

use crate::bmi::BmiCategory::{self, Normal, Obesity, Overweight, Underweight};

/// Immutable catalog entry. Ingredient strings carry their own quantity and
/// unit and are matched by exact text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: &'static str,
    pub title: &'static str,
    pub tags: &'static [&'static str],
    pub suits: &'static [BmiCategory],
    pub calories: u32,
    pub protein_grams: u32,
    pub carb_grams: u32,
    pub fat_grams: u32,
    pub ingredients: &'static [&'static str],
    pub steps: &'static [&'static str],
}

impl Recipe {
    pub fn suits(&self, category: BmiCategory) -> bool {
        self.suits.contains(&category)
    }
}

static CATALOG: &[Recipe] = &[
    Recipe {
        id: "teriyaki-salmon-bowl",
        title: "Teriyaki Salmon Rice Bowl",
        tags: &["high-protein", "omega-3", "dinner"],
        suits: &[Underweight, Normal],
        calories: 620,
        protein_grams: 38,
        carb_grams: 68,
        fat_grams: 20,
        ingredients: &[
            "1 salmon fillet",
            "1 cup cooked rice",
            "2 tbsp teriyaki sauce",
            "1 cup broccoli florets",
            "1 tsp sesame seeds",
        ],
        steps: &[
            "Brush the salmon with half the teriyaki sauce.",
            "Bake at 400°F for 12 to 15 minutes.",
            "Steam the broccoli until bright green.",
            "Serve over rice, drizzle the remaining sauce, top with sesame seeds.",
        ],
    },
    Recipe {
        id: "greek-yogurt-parfait",
        title: "Greek Yogurt Berry Parfait",
        tags: &["breakfast", "high-protein", "quick"],
        suits: &[Normal, Overweight, Obesity],
        calories: 280,
        protein_grams: 22,
        carb_grams: 34,
        fat_grams: 6,
        ingredients: &[
            "1 cup plain Greek yogurt",
            "1/2 cup mixed berries",
            "2 tbsp granola",
            "1 tsp honey",
        ],
        steps: &[
            "Layer half the yogurt in a glass.",
            "Add berries and granola, then the rest of the yogurt.",
            "Finish with honey.",
        ],
    },
    Recipe {
        id: "peanut-butter-banana-smoothie",
        title: "Peanut Butter Banana Smoothie",
        tags: &["breakfast", "calorie-dense", "quick"],
        suits: &[Underweight],
        calories: 540,
        protein_grams: 24,
        carb_grams: 62,
        fat_grams: 22,
        ingredients: &[
            "1 banana",
            "2 tbsp peanut butter",
            "1 cup whole milk",
            "1/4 cup rolled oats",
            "1 tsp honey",
        ],
        steps: &["Blend everything until smooth.", "Serve cold."],
    },
    Recipe {
        id: "chicken-quinoa-salad",
        title: "Chicken Quinoa Power Salad",
        tags: &["lunch", "high-protein", "high-fiber"],
        suits: &[Normal, Overweight, Obesity],
        calories: 450,
        protein_grams: 40,
        carb_grams: 38,
        fat_grams: 14,
        ingredients: &[
            "1 chicken breast",
            "1/2 cup cooked quinoa",
            "2 cups spinach",
            "1/2 cup cherry tomatoes",
            "1 tbsp olive oil",
            "1 tbsp lemon juice",
        ],
        steps: &[
            "Grill the chicken and slice it.",
            "Toss spinach, quinoa and tomatoes.",
            "Whisk olive oil with lemon juice and dress the salad.",
            "Top with the chicken.",
        ],
    },
    Recipe {
        id: "turkey-lettuce-wraps",
        title: "Turkey Lettuce Wraps",
        tags: &["lunch", "low-carb", "quick"],
        suits: &[Overweight, Obesity],
        calories: 320,
        protein_grams: 32,
        carb_grams: 12,
        fat_grams: 15,
        ingredients: &[
            "8 oz lean ground turkey",
            "6 butter lettuce leaves",
            "1/2 cup diced bell pepper",
            "1 tbsp soy sauce",
            "1 clove garlic",
        ],
        steps: &[
            "Brown the turkey with garlic.",
            "Stir in bell pepper and soy sauce, cook 3 minutes.",
            "Spoon into lettuce leaves.",
        ],
    },
    Recipe {
        id: "veggie-omelette",
        title: "Garden Veggie Omelette",
        tags: &["breakfast", "vegetarian", "low-carb"],
        suits: &[Normal, Overweight, Obesity],
        calories: 310,
        protein_grams: 21,
        carb_grams: 8,
        fat_grams: 21,
        ingredients: &[
            "2 eggs",
            "1 cup spinach",
            "1/4 cup diced bell pepper",
            "2 tbsp feta cheese",
            "1 tsp olive oil",
        ],
        steps: &[
            "Whisk the eggs.",
            "Sauté spinach and pepper in olive oil.",
            "Pour in the eggs, add feta, fold when set.",
        ],
    },
    Recipe {
        id: "beef-sweet-potato-skillet",
        title: "Beef & Sweet Potato Skillet",
        tags: &["dinner", "calorie-dense", "iron"],
        suits: &[Underweight, Normal],
        calories: 680,
        protein_grams: 36,
        carb_grams: 58,
        fat_grams: 32,
        ingredients: &[
            "8 oz ground beef",
            "1 sweet potato",
            "1 cup cooked rice",
            "1/2 onion",
            "1 tbsp olive oil",
        ],
        steps: &[
            "Dice the sweet potato and cook in olive oil until tender.",
            "Add onion and beef, cook through.",
            "Serve with rice.",
        ],
    },
    Recipe {
        id: "lentil-vegetable-soup",
        title: "Lentil Vegetable Soup",
        tags: &["dinner", "vegetarian", "high-fiber"],
        suits: &[Normal, Overweight, Obesity],
        calories: 360,
        protein_grams: 18,
        carb_grams: 54,
        fat_grams: 7,
        ingredients: &[
            "1 cup dried lentils",
            "1 carrot",
            "1 celery stalk",
            "1/2 onion",
            "4 cups vegetable broth",
        ],
        steps: &[
            "Sweat onion, carrot and celery for 5 minutes.",
            "Add lentils and broth, simmer 25 minutes.",
            "Season and serve.",
        ],
    },
    Recipe {
        id: "avocado-egg-toast",
        title: "Avocado Egg Toast",
        tags: &["breakfast", "healthy-fats"],
        suits: &[Underweight, Normal],
        calories: 430,
        protein_grams: 18,
        carb_grams: 32,
        fat_grams: 26,
        ingredients: &[
            "2 slices whole-grain bread",
            "1 avocado",
            "2 eggs",
            "1 pinch chili flakes",
        ],
        steps: &[
            "Toast the bread.",
            "Mash the avocado onto the toast.",
            "Top with fried or poached eggs and chili flakes.",
        ],
    },
    Recipe {
        id: "shrimp-zucchini-noodles",
        title: "Garlic Shrimp Zucchini Noodles",
        tags: &["dinner", "low-carb", "high-protein"],
        suits: &[Overweight, Obesity],
        calories: 290,
        protein_grams: 30,
        carb_grams: 14,
        fat_grams: 12,
        ingredients: &[
            "6 oz shrimp",
            "2 zucchini",
            "1 clove garlic",
            "1 tsp olive oil",
            "1 tbsp lemon juice",
        ],
        steps: &[
            "Spiralize the zucchini.",
            "Sauté garlic and shrimp in olive oil until pink.",
            "Toss in the noodles for 2 minutes, finish with lemon juice.",
        ],
    },
];

pub fn catalog() -> &'static [Recipe] {
    CATALOG
}

/// Resolves a recipe id. Unknown ids are a normal miss, not an error.
pub fn find(id: &str) -> Option<&'static Recipe> {
    CATALOG.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::VariantArray;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = catalog().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_every_category_has_recipes() {
        for category in BmiCategory::VARIANTS {
            assert!(
                catalog().iter().any(|r| r.suits(*category)),
                "no recipe for {category}"
            );
        }
    }

    #[test]
    fn test_teriyaki_bowl_has_five_ingredients() {
        let bowl = catalog()
            .iter()
            .find(|r| r.title == "Teriyaki Salmon Rice Bowl")
            .unwrap();
        assert_eq!(bowl.ingredients.len(), 5);
        assert_eq!(find(bowl.id), Some(bowl));
    }

    #[test]
    fn test_find_unknown_is_none() {
        assert!(find("deleted-recipe").is_none());
    }
}
