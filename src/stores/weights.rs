use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::clamp_percent;
use crate::storage::{SharedStorage, Slot};
use crate::stores::keys;
use crate::types::WeightEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Down,
    Up,
    Flat,
}

pub struct WeightStore {
    entries: Slot<Vec<WeightEntry>>,
}

impl WeightStore {
    pub fn load(storage: &SharedStorage) -> Self {
        let mut store = Self {
            entries: Slot::load(storage, keys::WEIGHTS, Vec::new),
        };
        store.normalize_loaded();
        store
    }

    pub fn reload(&mut self) {
        self.entries.reload(Vec::new);
        self.normalize_loaded();
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> &[WeightEntry] {
        self.entries.get()
    }

    /// Records `weight` for `date`, replacing any entry already on that day.
    /// Non-positive and non-finite weights are ignored.
    pub fn add_or_update(&mut self, date: NaiveDate, weight: f64) -> bool {
        if !weight.is_finite() || weight <= 0.0 {
            return false;
        }
        tracing::debug!(%date, weight, "recording weight");
        self.entries.update(|list| {
            match list.iter_mut().find(|e| e.date == date) {
                Some(entry) => entry.weight = weight,
                None => list.push(WeightEntry { date, weight }),
            }
            list.sort_by(|a, b| a.date.cmp(&b.date));
        });
        true
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        if !self.entries().iter().any(|e| e.date == date) {
            return false;
        }
        self.entries.update(|list| list.retain(|e| e.date != date));
        true
    }

    pub fn first(&self) -> Option<&WeightEntry> {
        self.entries().first()
    }

    pub fn latest(&self) -> Option<&WeightEntry> {
        self.entries().last()
    }

    pub fn delta(&self) -> Option<f64> {
        Some(self.latest()?.weight - self.first()?.weight)
    }

    pub fn trend(&self) -> Option<Trend> {
        let delta = self.delta()?;
        Some(if delta < 0.0 {
            Trend::Down
        } else if delta > 0.0 {
            Trend::Up
        } else {
            Trend::Flat
        })
    }

    /// Share of the distance from the first entry to `goal` covered so far,
    /// within [0, 100]. Zero when no goal is set or there is nothing to cover.
    pub fn progress_percent(&self, goal: f64) -> f64 {
        let (Some(first), Some(latest)) = (self.first(), self.latest()) else {
            return 0.0;
        };
        if !goal.is_finite() || goal <= 0.0 {
            return 0.0;
        }
        let distance = (first.weight - goal).abs();
        if distance == 0.0 {
            return 0.0;
        }
        clamp_percent((latest.weight - first.weight).abs() / distance * 100.0)
    }

    pub fn chart_points(&self) -> Vec<(NaiveDate, f64)> {
        self.entries().iter().map(|e| (e.date, e.weight)).collect()
    }

    /// Imported data is stored verbatim, so restore ordering and uniqueness
    /// in memory without rewriting storage.
    fn normalize_loaded(&mut self) {
        let list = self.entries.get();
        let sorted = list.windows(2).all(|w| w[0].date < w[1].date);
        if sorted {
            return;
        }
        let mut fixed: Vec<WeightEntry> = Vec::with_capacity(list.len());
        for entry in list {
            match fixed.iter_mut().find(|e| e.date == entry.date) {
                Some(existing) => existing.weight = entry.weight,
                None => fixed.push(entry.clone()),
            }
        }
        fixed.sort_by(|a, b| a.date.cmp(&b.date));
        self.entries.set_in_memory(fixed);
    }
}
