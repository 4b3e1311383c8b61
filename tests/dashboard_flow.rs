use chrono::NaiveDate;
use temp_dir::TempDir;

use wellness_tracker::bmi::BmiCategory;
use wellness_tracker::dashboard::{bmi_pill, delta_pill, streak_pill};
use wellness_tracker::stores::addictions::streak_days;
use wellness_tracker::types::{Day, Meal, Theme};
use wellness_tracker::{Dashboard, FileStorage, MemoryStorage};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_first_week_walkthrough() {
    let today = d("2024-03-10");
    let mut dash = Dashboard::new(MemoryStorage::new());

    let tracker = dash.addictions.add("Nicotine", d("2024-03-07")).unwrap();
    assert_eq!(streak_pill(streak_days(&tracker, today)), "3 days clean");

    dash.weights.add_or_update(d("2024-03-01"), 200.0);
    dash.weights.add_or_update(today, 190.0);
    assert_eq!(delta_pill(dash.weights.delta()), "Δ since start: -10.0 lb");

    dash.profile.set_height(5.0, 10.0);
    dash.profile.set_weight(180.0);
    let reading = dash.bmi();
    assert_eq!(reading.category, Some(BmiCategory::Overweight));
    assert_eq!(bmi_pill(reading), "BMI 25.8 · Overweight");

    dash.basket.increment("teriyaki-salmon-bowl");
    let groceries = dash.basket.groceries();
    assert_eq!(groceries.len(), 5);
    assert!(groceries.iter().all(|item| item.quantity == 1));

    dash.addictions.reset_today(&tracker.id, today);
    assert_eq!(dash.summary(today).streaks[0].days, 0);
}

#[test]
fn test_export_import_restores_state() {
    let mut source = Dashboard::new(MemoryStorage::new());
    source.addictions.add("Sugar", d("2024-02-01"));
    source.weights.add_or_update(d("2024-02-01"), 210.5);
    source.weights.add_or_update(d("2024-02-15"), 205.0);
    source.profile.set_height(6.0, 1.0);
    source.profile.set_weight(205.0);
    source.profile.set_goal(190.0);
    source.basket.set_quantity("veggie-omelette", 3);
    source
        .meal_plan
        .set_cell(Day::Fri, Meal::Lunch, Some("chicken-quinoa-salad"));
    let backup = source.export_snapshot().to_json().unwrap();

    let mut target = Dashboard::new(MemoryStorage::new());
    target.theme.set(Theme::Dark);
    let summary = target.import_snapshot(&backup).unwrap();
    assert!(!summary.applied.is_empty());

    assert_eq!(target.export_snapshot(), source.export_snapshot());
    assert_eq!(target.addictions.list(), source.addictions.list());
    assert_eq!(target.profile.goal(), 190.0);
    assert_eq!(
        target.meal_plan.cell(Day::Fri, Meal::Lunch),
        Some("chicken-quinoa-salad")
    );
    // Not part of a backup.
    assert_eq!(target.theme.get(), Theme::Dark);
}

#[test]
fn test_import_with_undecodable_values_falls_back() {
    let mut dash = Dashboard::new(MemoryStorage::new());
    dash.weights.add_or_update(d("2024-01-01"), 150.0);
    dash.import_snapshot(r#"{"weights": "not a list", "bmi": {"ft": 6}}"#)
        .unwrap();
    assert!(dash.weights.entries().is_empty());
    assert_eq!(dash.profile.inputs().feet, 6.0);
    assert_eq!(dash.profile.inputs().inches, 10.0);
}

#[test]
fn test_file_storage_survives_restart() {
    let dir = TempDir::new().unwrap();
    let today = d("2024-05-20");
    {
        let mut dash = Dashboard::new(FileStorage::open(dir.path()));
        dash.addictions.add("Alcohol", d("2024-05-01"));
        dash.weights.add_or_update(today, 172.4);
        dash.basket.increment("lentil-vegetable-soup");
        dash.meal_plan
            .set_cell(Day::Sun, Meal::Dinner, Some("lentil-vegetable-soup"));
        dash.theme.set(Theme::Light);
    }
    assert!(dir.path().join("data.json").exists());

    let dash = Dashboard::new(FileStorage::open(dir.path()));
    assert_eq!(dash.addictions.list()[0].name, "Alcohol");
    assert_eq!(streak_days(&dash.addictions.list()[0], today), 19);
    assert_eq!(dash.weights.latest().map(|e| e.weight), Some(172.4));
    assert_eq!(dash.basket.quantity("lentil-vegetable-soup"), 1);
    assert_eq!(
        dash.meal_plan.cell(Day::Sun, Meal::Dinner),
        Some("lentil-vegetable-soup")
    );
    assert_eq!(dash.theme.get(), Theme::Light);
}

#[test]
fn test_imported_blank_meal_cells_are_not_planned() {
    let mut dash = Dashboard::new(MemoryStorage::new());
    dash.import_snapshot(r#"{"mealplan":{"Mon":{"Breakfast":"","Lunch":"","Dinner":""}}}"#)
        .unwrap();
    assert_eq!(dash.meal_plan.cell(Day::Mon, Meal::Breakfast), None);
    assert_eq!(dash.summary(d("2024-03-10")).planned_meals, 0);
}

#[test]
fn test_corrupt_data_file_is_kept_aside() {
    let dir = TempDir::new().unwrap();
    let broken = r#"{"wellness.addictions": "[{\"id\":\"a\",\"name\":\"Nicotine\",\"resetAt\":\"2024-01-01\"}]",}"#;
    std::fs::write(dir.path().join("data.json"), broken).unwrap();

    let mut dash = Dashboard::new(FileStorage::open(dir.path()));
    assert!(dash.addictions.list().is_empty());
    dash.theme.set(Theme::Dark);

    let kept = std::fs::read_to_string(dir.path().join("data.json.corrupt")).unwrap();
    assert!(kept.contains("Nicotine"));
}
