use chrono::NaiveDate;
use ulid::Ulid;

use crate::calendar::{CalendarCell, build_calendar_cells};
use crate::dates::days_between;
use crate::storage::{SharedStorage, Slot};
use crate::stores::keys;
use crate::types::AddictionTracker;

pub struct AddictionStore {
    trackers: Slot<Vec<AddictionTracker>>,
}

impl AddictionStore {
    pub fn load(storage: &SharedStorage) -> Self {
        Self {
            trackers: Slot::load(storage, keys::ADDICTIONS, Vec::new),
        }
    }

    pub fn reload(&mut self) {
        self.trackers.reload(Vec::new);
    }

    pub fn list(&self) -> &[AddictionTracker] {
        self.trackers.get()
    }

    pub fn get(&self, id: &str) -> Option<&AddictionTracker> {
        self.trackers.get().iter().find(|t| t.id == id)
    }

    /// Appends a tracker. Blank names are ignored.
    pub fn add(&mut self, name: &str, reset_at: NaiveDate) -> Option<AddictionTracker> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let tracker = AddictionTracker {
            id: Ulid::new().to_string(),
            name: name.to_string(),
            reset_at,
        };
        tracing::debug!(id = %tracker.id, name, "adding tracker");
        self.trackers.update(|list| list.push(tracker.clone()));
        Some(tracker)
    }

    pub fn reset_today(&mut self, id: &str, today: NaiveDate) -> bool {
        self.set_reset_date(id, today)
    }

    /// Future dates are accepted; they read as a zero-day streak.
    pub fn set_reset_date(&mut self, id: &str, date: NaiveDate) -> bool {
        self.modify(id, |tracker| tracker.reset_at = date)
    }

    pub fn rename(&mut self, id: &str, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }
        self.modify(id, |tracker| tracker.name = new_name.to_string())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.trackers.update(|list| list.retain(|t| t.id != id));
        true
    }

    pub fn calendar(&self, id: &str, span_days: usize, today: NaiveDate) -> Option<Vec<CalendarCell>> {
        self.get(id)
            .map(|tracker| build_calendar_cells(tracker.reset_at, span_days, today))
    }

    fn modify(&mut self, id: &str, f: impl FnOnce(&mut AddictionTracker)) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.trackers.update(|list| {
            if let Some(tracker) = list.iter_mut().find(|t| t.id == id) {
                f(tracker);
            }
        });
        true
    }
}

pub fn streak_days(tracker: &AddictionTracker, today: NaiveDate) -> i64 {
    days_between(&tracker.reset_at, &today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, shared};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> (SharedStorage, AddictionStore) {
        let storage = shared(MemoryStorage::new());
        let store = AddictionStore::load(&storage);
        (storage, store)
    }

    #[test]
    fn test_add_ignores_blank_names() {
        let (_, mut store) = store();
        assert!(store.add("   ", d("2024-01-01")).is_none());
        assert!(store.add("", d("2024-01-01")).is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_add_trims_and_assigns_unique_ids() {
        let (_, mut store) = store();
        let a = store.add("  Nicotine ", d("2024-01-01")).unwrap();
        let b = store.add("Sugar", d("2024-01-01")).unwrap();
        assert_eq!(a.name, "Nicotine");
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let (storage, mut store) = store();
        let t = store.add("Nicotine", d("2024-01-01")).unwrap();
        store.rename(&t.id, "Vaping");
        store.set_reset_date(&t.id, d("2024-02-01"));

        let reloaded = AddictionStore::load(&storage);
        let got = reloaded.get(&t.id).unwrap();
        assert_eq!(got.name, "Vaping");
        assert_eq!(got.reset_at, d("2024-02-01"));
    }

    #[test]
    fn test_reset_date_serializes_as_calendar_date() {
        let (storage, mut store) = store();
        store.add("Nicotine", d("2024-01-05")).unwrap();
        let raw = storage.borrow().get(keys::ADDICTIONS).unwrap().unwrap();
        assert!(raw.contains("\"resetAt\":\"2024-01-05\""), "{raw}");
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (_, mut store) = store();
        store.add("Nicotine", d("2024-01-01")).unwrap();
        assert!(!store.reset_today("nope", d("2024-03-01")));
        assert!(!store.rename("nope", "x"));
        assert!(!store.remove("nope"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_reset_today_and_streak() {
        let (_, mut store) = store();
        let today = d("2024-03-10");
        let t = store.add("Nicotine", d("2024-03-07")).unwrap();
        assert_eq!(streak_days(store.get(&t.id).unwrap(), today), 3);
        store.reset_today(&t.id, today);
        assert_eq!(streak_days(store.get(&t.id).unwrap(), today), 0);
    }

    #[test]
    fn test_future_reset_date_is_zero_streak() {
        let (_, mut store) = store();
        let t = store.add("Nicotine", d("2024-03-07")).unwrap();
        store.set_reset_date(&t.id, d("2025-01-01"));
        assert_eq!(streak_days(store.get(&t.id).unwrap(), d("2024-03-10")), 0);
    }

    #[test]
    fn test_remove() {
        let (_, mut store) = store();
        let t = store.add("Nicotine", d("2024-03-07")).unwrap();
        assert!(store.remove(&t.id));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_calendar_for_tracker() {
        let (_, mut store) = store();
        let t = store.add("Nicotine", d("2024-03-08")).unwrap();
        let cells = store.calendar(&t.id, 7, d("2024-03-10")).unwrap();
        assert_eq!(cells.iter().filter(|c| c.clean).count(), 3);
        assert!(store.calendar("nope", 7, d("2024-03-10")).is_none());
    }
}
