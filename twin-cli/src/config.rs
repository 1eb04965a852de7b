//! Run configuration: an optional TOML file overlaid with command-line
//! flags.
//!
//! ```toml
//! salary = 5000
//! target_savings = "50,000"
//!
//! [[expenses]]
//! category = "rent"
//! amount = 1000
//!
//! [goals]
//! conservative = 40000
//!
//! [service]
//! backend = "http"
//! endpoint = "http://localhost:8001/forecast"
//! timeout_secs = 10
//!
//! [logging]
//! level = "debug"
//! file = "forecast.log"
//! ```
//!
//! `[goals]` overrides the shared target per scenario; with
//! `scenario_defaults = true` the starting point is 50000 / 60000 / 40000
//! for base / optimistic / conservative instead of `target_savings`.
//!
//! Every key is optional. Missing keys keep their defaults, which
//! match the stock example budget: salary 5000, three expenses, target 50000.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use twin_core::analysis::GoalTargets;
use twin_core::request_builder::parse_amount;
use twin_core::{AmountProblem, RawAmount, Scenario, ServiceConfig};

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid target savings: {0}")]
    Target(AmountProblem),

    #[error("invalid {} goal: {problem}", .scenario.as_str())]
    Goal {
        scenario: Scenario,
        problem: AmountProblem,
    },
}

/// One expense row as entered, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseEntry {
    pub category: String,
    #[serde(default)]
    pub amount: RawAmount,
}

impl ExpenseEntry {
    fn new(
        category: &str,
        amount: f64,
    ) -> Self {
        Self {
            category: category.to_string(),
            amount: RawAmount::Number(amount),
        }
    }
}

/// A `--goal scenario=amount` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalOverride {
    pub scenario: Scenario,
    pub amount: RawAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    pub scenario_defaults: bool,
    pub base: Option<RawAmount>,
    pub optimistic: Option<RawAmount>,
    pub conservative: Option<RawAmount>,
}

impl GoalsConfig {
    fn get(
        &self,
        scenario: Scenario,
    ) -> Option<&RawAmount> {
        match scenario {
            Scenario::Base => self.base.as_ref(),
            Scenario::Optimistic => self.optimistic.as_ref(),
            Scenario::Conservative => self.conservative.as_ref(),
        }
    }

    fn set(
        &mut self,
        scenario: Scenario,
        amount: RawAmount,
    ) {
        let slot = match scenario {
            Scenario::Base => &mut self.base,
            Scenario::Optimistic => &mut self.optimistic,
            Scenario::Conservative => &mut self.conservative,
        };
        *slot = Some(amount);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub salary: RawAmount,
    pub target_savings: RawAmount,
    pub expenses: Vec<ExpenseEntry>,
    pub goals: GoalsConfig,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            salary: RawAmount::Number(5000.0),
            target_savings: RawAmount::Number(50000.0),
            expenses: vec![
                ExpenseEntry::new("rent", 1000.0),
                ExpenseEntry::new("food", 500.0),
                ExpenseEntry::new("entertainment", 300.0),
            ],
            goals: GoalsConfig::default(),
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `cli.config` if given, then applies the remaining flags.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Overwrites every value the command line supplied.
    ///
    /// A non-empty `--expense` list replaces the configured expenses
    /// outright rather than merging by category.
    pub fn apply_cli(
        &mut self,
        cli: &Cli,
    ) {
        if let Some(salary) = &cli.salary {
            self.salary = RawAmount::from(salary.as_str());
        }
        if let Some(target) = &cli.target {
            self.target_savings = RawAmount::from(target.as_str());
        }
        if !cli.expenses.is_empty() {
            self.expenses = cli.expenses.clone();
        }
        if cli.scenario_goals {
            self.goals.scenario_defaults = true;
        }
        for goal in &cli.goals {
            self.goals.set(goal.scenario, goal.amount.clone());
        }
        if let Some(backend) = &cli.backend {
            self.service.backend = backend.clone();
        }
        if let Some(endpoint) = &cli.endpoint {
            self.service.endpoint = endpoint.clone();
        }
        if let Some(horizon) = cli.horizon {
            self.service.horizon_months = horizon;
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = Some(level.clone());
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
    }

    /// `(category, amount)` pairs in entry order, as the request builder
    /// takes them.
    pub fn expense_pairs(&self) -> impl Iterator<Item = (&str, &RawAmount)> {
        self.expenses
            .iter()
            .map(|entry| (entry.category.as_str(), &entry.amount))
    }

    pub fn target(&self) -> Result<Decimal, ConfigError> {
        parse_amount(&self.target_savings).map_err(ConfigError::Target)
    }

    /// Goal per scenario: the shared target (or the per-scenario defaults),
    /// then any `[goals]` entry on top.
    pub fn targets(&self) -> Result<GoalTargets, ConfigError> {
        let mut targets = if self.goals.scenario_defaults {
            GoalTargets::default()
        } else {
            GoalTargets::uniform(self.target()?)
        };
        for scenario in Scenario::ALL {
            if let Some(raw) = self.goals.get(scenario) {
                let goal = parse_amount(raw)
                    .map_err(|problem| ConfigError::Goal { scenario, problem })?;
                targets.set(scenario, goal);
            }
        }
        Ok(targets)
    }
}
