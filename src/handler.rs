use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::Confirm;
use serde::Serialize;
use strum::VariantArray;

use crate::backup::backup_file_name;
use crate::bmi::category_label;
use crate::calendar::CalendarCell;
use crate::cli::{
    AddictionCommand, BasketCommand, BmiArguments, Cli, Command, GlobalArguments, PlanCommand,
    RecipesCommand, WeightCommand,
};
use crate::config::Settings;
use crate::dashboard::{Dashboard, bmi_pill, delta_pill, progress_pill, streak_pill};
use crate::dates::{format_date, parse_non_negative, parse_positive};
use crate::error::{ServiceError, ServiceResult};
use crate::recipes::{self, Recipe, grocery_list_text, recipes_for};
use crate::storage::FileStorage;
use crate::stores::addictions::streak_days;
use crate::types::{Day, Meal};

/// Per-invocation context: resolved settings, the clock reading and the
/// dashboard over file storage.
pub struct Session {
    pub dashboard: Dashboard,
    pub settings: Settings,
    pub today: NaiveDate,
    pub json: bool,
    pub assume_yes: bool,
}

impl Session {
    pub fn open(global: &GlobalArguments, settings: Settings) -> ServiceResult<Self> {
        let data_dir = settings
            .resolve_data_dir(global.data_dir.clone())
            .ok_or_else(|| ServiceError::FromString("couldn't resolve a data directory".into()))?;
        tracing::debug!(data_dir = %data_dir.display(), "opening storage");
        Ok(Self {
            dashboard: Dashboard::new(FileStorage::open(&data_dir)),
            settings,
            today: global.today.unwrap_or_else(|| Local::now().date_naive()),
            json: global.json,
            assume_yes: global.yes,
        })
    }

    fn confirm(&self, prompt: &str) -> ServiceResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

pub fn run(cli: Cli, settings: Settings) -> ServiceResult<()> {
    if let Command::Version = cli.command {
        println!("{} {}", crate::metadata::PKG_NAME, crate::metadata::PKG_VERSION);
        return Ok(());
    }
    if let Command::Config = cli.command {
        return edit_config(&cli.global, settings);
    }

    let mut session = Session::open(&cli.global, settings)?;
    match cli.command {
        Command::Status => status(&session),
        Command::Addiction(cmd) => addiction(&mut session, cmd),
        Command::Weight(cmd) => weight(&mut session, cmd),
        Command::Bmi(args) => bmi(&mut session, args),
        Command::Recipes(cmd) => recipes_cmd(&session, cmd),
        Command::Basket(cmd) => basket(&mut session, cmd),
        Command::Plan(cmd) => plan(&mut session, cmd),
        Command::Theme { theme } => {
            if let Some(theme) = theme {
                session.dashboard.theme.set(theme);
            }
            println!("Theme: {}", session.dashboard.theme.get());
            Ok(())
        }
        Command::Export { out } => export(&session, out),
        Command::Import { file } => import(&mut session, file),
        Command::Config | Command::Version => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> ServiceResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ignored(what: &str) {
    println!("{}", format!("Nothing changed: {what}").dimmed());
}

fn status(session: &Session) -> ServiceResult<()> {
    let summary = session.dashboard.summary(session.today);
    if session.json {
        return print_json(&summary);
    }
    println!("{}", format!("Wellness for {}", format_date(&session.today)).bold());

    println!("\n{}", "Streaks".underline());
    if summary.streaks.is_empty() {
        println!("  {}", "No trackers yet. Add one with `addiction add <name>`.".dimmed());
    }
    for line in &summary.streaks {
        println!("  {:<20} {}", line.name, streak_pill(line.days).green());
    }

    println!("\n{}", "Weight".underline());
    println!("  {}", delta_pill(summary.weight_delta));
    if summary.goal > 0.0 {
        println!(
            "  Goal {:.1} lb · {}",
            summary.goal,
            progress_pill(summary.goal_progress).cyan()
        );
    }

    println!("\n{}", "BMI".underline());
    println!("  {}", bmi_pill(session.dashboard.bmi()));

    println!(
        "\n{} recipe(s) in basket · {} meal(s) planned",
        summary.basket_recipes, summary.planned_meals
    );
    Ok(())
}

fn addiction(session: &mut Session, cmd: AddictionCommand) -> ServiceResult<()> {
    let today = session.today;
    let store = &mut session.dashboard.addictions;
    match cmd {
        AddictionCommand::Add { name, since } => {
            match store.add(&name, since.unwrap_or(today)) {
                Some(tracker) => println!(
                    "Tracking {} ({}) · {}",
                    tracker.name.bold(),
                    tracker.id,
                    streak_pill(streak_days(&tracker, today))
                ),
                None => ignored("tracker name is empty"),
            }
        }
        AddictionCommand::Reset { id } => {
            if store.reset_today(&id, today) {
                println!("Streak restarted today. Every day counts.");
            } else {
                ignored("no tracker with that id");
            }
        }
        AddictionCommand::SetDate { id, date } => {
            if !store.set_reset_date(&id, date) {
                ignored("no tracker with that id");
            }
        }
        AddictionCommand::Rename { id, name } => {
            if !store.rename(&id, &name) {
                ignored("no tracker with that id, or the name is empty");
            }
        }
        AddictionCommand::Remove { id } => {
            if !store.remove(&id) {
                ignored("no tracker with that id");
            }
        }
        AddictionCommand::List => {
            if session.json {
                return print_json(&store.list());
            }
            for t in store.list() {
                println!(
                    "{}  {:<20} since {}  {}",
                    t.id.dimmed(),
                    t.name,
                    format_date(&t.reset_at),
                    streak_pill(streak_days(t, today)).green()
                );
            }
        }
        AddictionCommand::Calendar { id, days } => {
            let span = days.unwrap_or_else(|| session.settings.span_days());
            let Some(cells) = store.calendar(&id, span, today) else {
                ignored("no tracker with that id");
                return Ok(());
            };
            if session.json {
                return print_json(&cells);
            }
            print_calendar(&cells);
        }
    }
    Ok(())
}

/// Seven cells per row, oldest first.
fn print_calendar(cells: &[CalendarCell]) {
    for week in cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let day = cell.date.format("%d").to_string();
                if cell.clean {
                    day.green().to_string()
                } else {
                    day.red().to_string()
                }
            })
            .collect();
        if let Some(first) = week.first() {
            println!("{}  {}", format_date(&first.date).dimmed(), row.join(" "));
        }
    }
}

fn weight(session: &mut Session, cmd: WeightCommand) -> ServiceResult<()> {
    let today = session.today;
    let dashboard = &mut session.dashboard;
    match cmd {
        WeightCommand::Log { weight, date } => {
            let recorded = parse_positive(&weight)
                .is_some_and(|w| dashboard.weights.add_or_update(date.unwrap_or(today), w));
            if recorded {
                println!("{}", delta_pill(dashboard.weights.delta()));
            } else {
                ignored("weight must be a positive number");
            }
        }
        WeightCommand::Remove { date } => {
            if !dashboard.weights.remove(date) {
                ignored("no entry on that date");
            }
        }
        WeightCommand::List => {
            if session.json {
                return print_json(&dashboard.weights.entries());
            }
            for (date, w) in dashboard.weights.chart_points() {
                println!("{}  {:>7.1} lb", format_date(&date), w);
            }
            println!("{}", delta_pill(dashboard.weights.delta()).bold());
            let goal = dashboard.profile.goal();
            if goal > 0.0 {
                println!("{}", progress_pill(dashboard.weights.progress_percent(goal)));
            }
        }
        WeightCommand::Goal { pounds } => {
            match parse_non_negative(&pounds) {
                Some(goal) if dashboard.profile.set_goal(goal) => {
                    println!(
                        "{}",
                        progress_pill(dashboard.weights.progress_percent(dashboard.profile.goal()))
                    );
                }
                _ => ignored("goal must be a positive number or 0"),
            }
        }
    }
    Ok(())
}

fn bmi(session: &mut Session, args: BmiArguments) -> ServiceResult<()> {
    let profile = &mut session.dashboard.profile;
    if args.feet.is_some() || args.inches.is_some() {
        let current = profile.inputs();
        if !profile.set_height(
            args.feet.unwrap_or(current.feet),
            args.inches.unwrap_or(current.inches),
        ) {
            ignored("height must not be negative");
        }
    }
    if let Some(pounds) = args.pounds {
        if !profile.set_weight(pounds) {
            ignored("weight must be a positive number");
        }
    }

    let reading = session.dashboard.bmi();
    let guidance = session.dashboard.guidance();
    if session.json {
        return print_json(&serde_json::json!({ "reading": reading, "guidance": guidance }));
    }
    let inputs = session.dashboard.profile.inputs();
    println!(
        "{} ft {} in · {} lb",
        inputs.feet, inputs.inches, inputs.pounds
    );
    println!("{}", bmi_pill(reading).bold());
    if let Some((lo, hi)) = session.dashboard.profile.healthy_range() {
        println!("Normal range for your height: {lo:.0}–{hi:.0} lb");
    }
    println!(
        "\nMacros: {}% carbs · {}% protein · {}% fat",
        guidance.carb_percent, guidance.protein_percent, guidance.fat_percent
    );
    println!("{}", guidance.notes);
    for tip in guidance.tips {
        println!("  • {tip}");
    }
    Ok(())
}

fn recipes_cmd(session: &Session, cmd: RecipesCommand) -> ServiceResult<()> {
    match cmd {
        RecipesCommand::List { all } => {
            let category = if all { None } else { session.dashboard.bmi().category };
            let list = recipes_for(category);
            if session.json {
                return print_json(&list);
            }
            if let Some(category) = category {
                println!("{}", format!("Suited to {}", category_label(Some(category))).bold());
            }
            for recipe in list {
                let qty = session.dashboard.basket.quantity(recipe.id);
                let marker = if qty > 0 { format!(" [x{qty}]") } else { String::new() };
                println!(
                    "{:<32} {:>4} kcal  {}{}",
                    recipe.id,
                    recipe.calories,
                    recipe.title,
                    marker.cyan()
                );
            }
        }
        RecipesCommand::Show { id } => match recipes::find(&id) {
            Some(recipe) if session.json => return print_json(recipe),
            Some(recipe) => print_recipe(recipe),
            None => ignored("no recipe with that id"),
        },
    }
    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.title.bold());
    println!(
        "{} kcal · P {} g · C {} g · F {} g · {}",
        recipe.calories,
        recipe.protein_grams,
        recipe.carb_grams,
        recipe.fat_grams,
        recipe.tags.join(", ").dimmed()
    );
    println!("\nIngredients");
    for ingredient in recipe.ingredients {
        println!("  • {ingredient}");
    }
    println!("\nSteps");
    for (n, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {step}", n + 1);
    }
}

fn basket(session: &mut Session, cmd: BasketCommand) -> ServiceResult<()> {
    match cmd {
        BasketCommand::Set { id, qty } => session.dashboard.basket.set_quantity(&id, qty),
        BasketCommand::Add { id } => session.dashboard.basket.increment(&id),
        BasketCommand::Remove { id } => session.dashboard.basket.decrement(&id),
        BasketCommand::Clear => {
            if session.confirm("Empty the basket?")? {
                session.dashboard.basket.clear();
            }
        }
        BasketCommand::Show => {
            if session.json {
                return print_json(session.dashboard.basket.items());
            }
            for (id, qty) in session.dashboard.basket.items() {
                let title = recipes::find(id).map_or("(unknown recipe)", |r| r.title);
                println!("{qty} × {title} {}", id.dimmed());
            }
        }
        BasketCommand::Groceries => {
            let items = session.dashboard.basket.groceries();
            if session.json {
                return print_json(&items);
            }
            if items.is_empty() {
                ignored("basket is empty");
            } else {
                // Printed as plain text so it can be copied from the terminal.
                println!("{}", grocery_list_text(&items));
            }
        }
    }
    Ok(())
}

fn plan(session: &mut Session, cmd: PlanCommand) -> ServiceResult<()> {
    match cmd {
        PlanCommand::Set { day, meal, recipe } => {
            if let Some(id) = recipe.as_deref() {
                if recipes::find(id).is_none() {
                    tracing::warn!(recipe = id, "planning a recipe that is not in the catalog");
                }
            }
            session.dashboard.meal_plan.set_cell(day, meal, recipe.as_deref());
        }
        PlanCommand::Clear => {
            if session.confirm("Clear the whole week?")? {
                session.dashboard.meal_plan.clear();
            }
        }
        PlanCommand::Show => {
            if session.json {
                return print_json(session.dashboard.meal_plan.plan());
            }
            print_plan(session);
        }
    }
    Ok(())
}

fn print_plan(session: &Session) {
    let store = &session.dashboard.meal_plan;
    for day in Day::VARIANTS {
        println!("{}", day.to_string().bold());
        for meal in Meal::VARIANTS {
            let label = match store.cell(*day, *meal) {
                None => "—".dimmed().to_string(),
                Some(id) => match recipes::find(id) {
                    Some(recipe) => recipe.title.to_string(),
                    None => format!("{id} (not in catalog)").dimmed().to_string(),
                },
            };
            println!("  {:<10} {label}", meal.to_string());
        }
    }
}

fn export(session: &Session, out: Option<PathBuf>) -> ServiceResult<()> {
    let path = out.unwrap_or_else(|| PathBuf::from(backup_file_name(session.today)));
    let json = session.dashboard.export_snapshot().to_json()?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "exported backup");
    println!("Backup written to {}", path.display().to_string().bold());
    Ok(())
}

fn import(session: &mut Session, file: PathBuf) -> ServiceResult<()> {
    let text = fs::read_to_string(&file)?;
    if !session.confirm("Importing overwrites the stored values it contains. Continue?")? {
        return Ok(());
    }
    let summary = session.dashboard.import_snapshot(&text)?;
    println!(
        "Imported {} value(s) from {}",
        summary.applied.len(),
        file.display()
    );
    Ok(())
}

fn edit_config(global: &GlobalArguments, mut settings: Settings) -> ServiceResult<()> {
    let path = global
        .settings
        .clone()
        .or_else(Settings::default_path)
        .ok_or_else(|| ServiceError::FromString("couldn't resolve a config directory".into()))?;
    settings.edit_interactive()?;
    settings.save_to(&path)?;
    println!("Saved {}", path.display());
    Ok(())
}
