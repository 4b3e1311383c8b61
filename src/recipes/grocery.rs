use serde::Serialize;

use crate::recipes::catalog::find;
use crate::types::Basket;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroceryItem {
    pub ingredient: String,
    pub quantity: u32,
}

/// Sums each selected recipe's ingredients times its basket quantity.
///
/// Ingredient strings are keys as written: "1 cup rice" and "2 cups rice"
/// stay separate lines. Ids missing from the catalog add nothing. Items
/// come out in first-seen order.
pub fn aggregate_ingredients(basket: &Basket) -> Vec<GroceryItem> {
    let mut items: Vec<GroceryItem> = Vec::new();
    for (recipe_id, &qty) in basket {
        if qty == 0 {
            continue;
        }
        let Some(recipe) = find(recipe_id) else {
            tracing::debug!(recipe_id, "basket references unknown recipe");
            continue;
        };
        for ingredient in recipe.ingredients {
            match items.iter_mut().find(|item| item.ingredient == *ingredient) {
                Some(item) => item.quantity = item.quantity.saturating_add(qty),
                None => items.push(GroceryItem {
                    ingredient: (*ingredient).to_string(),
                    quantity: qty,
                }),
            }
        }
    }
    items
}

/// Plain-text grocery list, one `- <ingredient> × <qty>` line per item.
pub fn grocery_list_text(items: &[GroceryItem]) -> String {
    items
        .iter()
        .map(|item| format!("- {} × {}", item.ingredient, item.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}
