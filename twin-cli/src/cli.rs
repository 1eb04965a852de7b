use std::path::PathBuf;

use clap::Parser;
use twin_core::{RawAmount, Scenario};
use twin_core::export::CSV_FILE_NAME;

use crate::config::{ExpenseEntry, GoalOverride};

/// Personal savings forecast.
///
/// Projects cumulative savings under base, optimistic and conservative
/// scenarios and reports how many months each needs to reach the target.
/// Values come from the optional config file; flags given here win.
#[derive(Debug, Parser)]
#[command(name = "savings-forecast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML file with salary, expenses, target and service settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Monthly salary (e.g. 5000 or "5,000")
    #[arg(short, long)]
    pub salary: Option<String>,

    /// Monthly expense as category=amount; repeat for each category.
    /// Any use replaces the configured expense list.
    #[arg(short, long = "expense", value_name = "CATEGORY=AMOUNT", value_parser = parse_expense)]
    pub expenses: Vec<ExpenseEntry>,

    /// Savings goal checked against every scenario
    #[arg(short, long)]
    pub target: Option<String>,

    /// Goal for one scenario as scenario=amount (base, optimistic or
    /// conservative); repeatable
    #[arg(short, long = "goal", value_name = "SCENARIO=AMOUNT", value_parser = parse_goal)]
    pub goals: Vec<GoalOverride>,

    /// Start from the per-scenario goals 50000 / 60000 / 40000 instead of
    /// the shared target
    #[arg(long, default_value_t = false)]
    pub scenario_goals: bool,

    /// Forecasting backend ("local" or "http")
    #[arg(long)]
    pub backend: Option<String>,

    /// Endpoint for the http backend
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Months projected by the local backend
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Write the projection as CSV (default file name when no path given)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = CSV_FILE_NAME)]
    pub csv: Option<PathBuf>,

    /// Print the month-by-month balance of every scenario
    #[arg(long, default_value_t = false)]
    pub chart: bool,

    /// Print the PDF report layout
    #[arg(long, default_value_t = false)]
    pub layout: bool,

    /// Log filter, a level ("debug") or full directive
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Hide log output on the terminal
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

/// Parses `category=amount`. The amount is kept raw and validated with
/// the rest of the input.
pub fn parse_expense(arg: &str) -> Result<ExpenseEntry, String> {
    let (category, amount) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{arg}'"))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in '{arg}'"));
    }
    Ok(ExpenseEntry {
        category: category.to_string(),
        amount: RawAmount::from(amount),
    })
}

/// Parses `scenario=amount`.
pub fn parse_goal(arg: &str) -> Result<GoalOverride, String> {
    let (name, amount) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SCENARIO=AMOUNT, got '{arg}'"))?;
    let scenario = Scenario::parse(name.trim().to_lowercase().as_str()).ok_or_else(|| {
        format!("unknown scenario '{}'; expected base, optimistic or conservative", name.trim())
    })?;
    Ok(GoalOverride {
        scenario,
        amount: RawAmount::from(amount),
    })
}
