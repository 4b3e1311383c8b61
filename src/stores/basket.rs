use crate::recipes::{GroceryItem, aggregate_ingredients};
use crate::storage::{SharedStorage, Slot};
use crate::stores::keys;
use crate::types::Basket;

pub struct BasketStore {
    basket: Slot<Basket>,
}

impl BasketStore {
    pub fn load(storage: &SharedStorage) -> Self {
        let mut store = Self {
            basket: Slot::load(storage, keys::RECIPES_BASKET, Basket::new),
        };
        store.drop_zero_entries();
        store
    }

    pub fn reload(&mut self) {
        self.basket.reload(Basket::new);
        self.drop_zero_entries();
    }

    pub fn items(&self) -> &Basket {
        self.basket.get()
    }

    pub fn quantity(&self, recipe_id: &str) -> u32 {
        self.items().get(recipe_id).copied().unwrap_or(0)
    }

    /// Sets a quantity, clamped at zero. Zero removes the entry.
    pub fn set_quantity(&mut self, recipe_id: &str, qty: i64) {
        let qty = u32::try_from(qty.max(0)).unwrap_or(u32::MAX);
        tracing::debug!(recipe_id, qty, "setting basket quantity");
        self.basket.update(|basket| {
            if qty == 0 {
                basket.remove(recipe_id);
            } else {
                basket.insert(recipe_id.to_string(), qty);
            }
        });
    }

    pub fn increment(&mut self, recipe_id: &str) {
        self.set_quantity(recipe_id, i64::from(self.quantity(recipe_id)) + 1);
    }

    pub fn decrement(&mut self, recipe_id: &str) {
        self.set_quantity(recipe_id, i64::from(self.quantity(recipe_id)) - 1);
    }

    pub fn clear(&mut self) {
        self.basket.replace(Basket::new());
    }

    pub fn groceries(&self) -> Vec<GroceryItem> {
        aggregate_ingredients(self.items())
    }

    fn drop_zero_entries(&mut self) {
        if self.items().values().any(|&q| q == 0) {
            let cleaned = self
                .items()
                .iter()
                .filter(|(_, q)| **q > 0)
                .map(|(id, q)| (id.clone(), *q))
                .collect();
            self.basket.set_in_memory(cleaned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, shared};

    #[test]
    fn test_zero_quantity_removes_key() {
        let storage = shared(MemoryStorage::new());
        let mut basket = BasketStore::load(&storage);
        basket.set_quantity("veggie-omelette", 2);
        basket.set_quantity("veggie-omelette", 0);
        assert!(!basket.items().contains_key("veggie-omelette"));
        let raw = storage.borrow().get(keys::RECIPES_BASKET).unwrap();
        assert_eq!(raw.as_deref(), Some("{}"));
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        let storage = shared(MemoryStorage::new());
        let mut basket = BasketStore::load(&storage);
        basket.set_quantity("veggie-omelette", 1);
        basket.set_quantity("veggie-omelette", -4);
        assert_eq!(basket.quantity("veggie-omelette"), 0);
        assert!(basket.items().is_empty());
    }

    #[test]
    fn test_increment_and_decrement() {
        let storage = shared(MemoryStorage::new());
        let mut basket = BasketStore::load(&storage);
        basket.increment("avocado-egg-toast");
        basket.increment("avocado-egg-toast");
        assert_eq!(basket.quantity("avocado-egg-toast"), 2);
        basket.decrement("avocado-egg-toast");
        basket.decrement("avocado-egg-toast");
        basket.decrement("avocado-egg-toast");
        assert!(basket.items().is_empty());
    }

    #[test]
    fn test_loaded_zero_entries_are_dropped() {
        let storage = shared(MemoryStorage::new());
        storage
            .borrow_mut()
            .set(keys::RECIPES_BASKET, r#"{"a":0,"b":2}"#.to_string())
            .unwrap();
        let basket = BasketStore::load(&storage);
        assert_eq!(basket.items().len(), 1);
        assert_eq!(basket.quantity("b"), 2);
    }

    #[test]
    fn test_groceries_follow_basket() {
        let storage = shared(MemoryStorage::new());
        let mut basket = BasketStore::load(&storage);
        basket.set_quantity("teriyaki-salmon-bowl", 1);
        assert_eq!(basket.groceries().len(), 5);
        basket.clear();
        assert!(basket.groceries().is_empty());
    }
}
