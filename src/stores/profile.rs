use crate::bmi::{BmiReading, compute_bmi, healthy_weight_range};
use crate::storage::{SharedStorage, Slot};
use crate::stores::keys;
use crate::types::{BmiInputs, Theme};

pub const DEFAULT_HEIGHT_FEET: f64 = 5.0;
pub const DEFAULT_HEIGHT_INCHES: f64 = 10.0;
pub const DEFAULT_WEIGHT_POUNDS: f64 = 180.0;
pub const DEFAULT_WEIGHT_GOAL: f64 = 0.0;

/// BMI inputs and the weight goal, each under its own key.
pub struct ProfileStore {
    feet: Slot<f64>,
    inches: Slot<f64>,
    pounds: Slot<f64>,
    goal: Slot<f64>,
}

impl ProfileStore {
    pub fn load(storage: &SharedStorage) -> Self {
        Self {
            feet: Slot::load(storage, keys::HEIGHT_FEET, || DEFAULT_HEIGHT_FEET),
            inches: Slot::load(storage, keys::HEIGHT_INCHES, || DEFAULT_HEIGHT_INCHES),
            pounds: Slot::load(storage, keys::WEIGHT_POUNDS, || DEFAULT_WEIGHT_POUNDS),
            goal: Slot::load(storage, keys::WEIGHT_GOAL, || DEFAULT_WEIGHT_GOAL),
        }
    }

    pub fn reload(&mut self) {
        self.feet.reload(|| DEFAULT_HEIGHT_FEET);
        self.inches.reload(|| DEFAULT_HEIGHT_INCHES);
        self.pounds.reload(|| DEFAULT_WEIGHT_POUNDS);
        self.goal.reload(|| DEFAULT_WEIGHT_GOAL);
    }

    pub fn inputs(&self) -> BmiInputs {
        BmiInputs {
            feet: *self.feet.get(),
            inches: *self.inches.get(),
            pounds: *self.pounds.get(),
        }
    }

    /// Height fields accept zero; they only need to be finite and not negative.
    pub fn set_height(&mut self, feet: f64, inches: f64) -> bool {
        if !is_non_negative(feet) || !is_non_negative(inches) {
            return false;
        }
        self.feet.replace(feet);
        self.inches.replace(inches);
        true
    }

    pub fn set_weight(&mut self, pounds: f64) -> bool {
        if !pounds.is_finite() || pounds <= 0.0 {
            return false;
        }
        self.pounds.replace(pounds);
        true
    }

    pub fn bmi(&self) -> BmiReading {
        let inputs = self.inputs();
        compute_bmi(inputs.feet, inputs.inches, inputs.pounds)
    }

    pub fn healthy_range(&self) -> Option<(f64, f64)> {
        healthy_weight_range(*self.feet.get(), *self.inches.get())
    }

    /// Target weight in pounds; zero when unset.
    pub fn goal(&self) -> f64 {
        *self.goal.get()
    }

    /// Sets the goal. Zero clears it; negative and non-finite are ignored.
    pub fn set_goal(&mut self, pounds: f64) -> bool {
        if !is_non_negative(pounds) {
            return false;
        }
        self.goal.replace(pounds);
        true
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub struct ThemeStore {
    theme: Slot<Theme>,
}

impl ThemeStore {
    pub fn load(storage: &SharedStorage) -> Self {
        Self {
            theme: Slot::load(storage, keys::THEME, Theme::default),
        }
    }

    pub fn reload(&mut self) {
        self.theme.reload(Theme::default);
    }

    pub fn get(&self) -> Theme {
        *self.theme.get()
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme.replace(theme);
    }
}
