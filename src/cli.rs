use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::dates::parse_date;
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::types::{Day, Meal, Theme};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArguments,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArguments {
    /// Directory holding data.json
    #[arg(long, env = "WELLNESS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Settings file (defaults to settings.json in the platform config dir)
    #[arg(long, env = "WELLNESS_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Log filter, e.g. "debug" (overrides settings; RUST_LOG wins over both)
    #[arg(long, env = "WELLNESS_LOG", global = true)]
    pub log_level: Option<String>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Print JSON instead of text where supported
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true, default_value_t = false)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show streaks, weight progress and BMI at a glance
    Status,
    /// Manage addiction-free streak trackers
    #[command(subcommand)]
    Addiction(AddictionCommand),
    /// Log body weight and set a goal
    #[command(subcommand)]
    Weight(WeightCommand),
    /// Show or update BMI inputs and the matching guidance
    Bmi(BmiArguments),
    /// Browse the recipe catalog
    #[command(subcommand)]
    Recipes(RecipesCommand),
    /// Select recipes and build a grocery list
    #[command(subcommand)]
    Basket(BasketCommand),
    /// Weekly meal planner
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Show or set the theme preference
    Theme {
        /// light, dark or system
        theme: Option<Theme>,
    },
    /// Write every stored value to a JSON backup file
    Export {
        /// Output path (defaults to wellness-backup-<date>.json)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Restore stored values from a JSON backup file
    Import {
        file: PathBuf,
    },
    /// Open an interactive editor for settings.json
    Config,
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddictionCommand {
    /// Start tracking a new streak
    Add {
        name: String,
        /// Last use date (defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        since: Option<NaiveDate>,
    },
    /// Record a slip: the streak restarts today
    Reset { id: String },
    /// Set the last use date manually
    SetDate {
        id: String,
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    Rename { id: String, name: String },
    Remove { id: String },
    List,
    /// Clean/slipped calendar for one tracker
    Calendar {
        id: String,
        /// Number of days shown (defaults to the configured span)
        #[arg(long)]
        days: Option<usize>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum WeightCommand {
    /// Record a weight in pounds; an entry on the same date is replaced
    Log {
        weight: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    Remove {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// List entries with the change since the first one
    List,
    /// Set the goal weight in pounds (0 clears it)
    Goal { pounds: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BmiArguments {
    #[arg(long)]
    pub feet: Option<f64>,
    #[arg(long)]
    pub inches: Option<f64>,
    /// Body weight in pounds
    #[arg(long)]
    pub pounds: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecipesCommand {
    /// Recipes suited to the current BMI category
    List {
        /// Show the whole catalog
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    Show { id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BasketCommand {
    /// Set a quantity; zero or less removes the recipe
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Add one serving
    Add { id: String },
    /// Remove one serving
    Remove { id: String },
    Clear,
    Show,
    /// Print the combined grocery list
    Groceries,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlanCommand {
    /// Assign a recipe to a slot; omit the recipe to empty it
    Set {
        day: Day,
        meal: Meal,
        recipe: Option<String>,
    },
    Clear,
    Show,
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    parse_date(input).ok_or_else(|| format!("Invalid date '{input}': expected YYYY-MM-DD"))
}
