use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{Scenario, ScenarioSeries};

/// Text shown for a scenario that never reaches its target.
pub const GOAL_NOT_REACHED: &str = "Goal not reached";

/// Returns the 1-based month in which `series` first reaches `target`.
///
/// Equality counts as reached. `None` means no month reaches the target,
/// which is always the case for an empty series. Month 1 is `Some(1)`,
/// never confused with "not reached".
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use twin_core::analysis::goal_month;
///
/// assert_eq!(goal_month(&[dec!(100), dec!(250), dec!(400)], dec!(250)), Some(2));
/// assert_eq!(goal_month(&[dec!(50), dec!(90)], dec!(1000)), None);
/// ```
pub fn goal_month(
    series: &[Decimal],
    target: Decimal,
) -> Option<u32> {
    series
        .iter()
        .position(|value| *value >= target)
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// Savings target per scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTargets {
    pub base: Decimal,
    pub optimistic: Decimal,
    pub conservative: Decimal,
}

impl GoalTargets {
    /// The same threshold for every scenario.
    pub fn uniform(target: Decimal) -> Self {
        Self {
            base: target,
            optimistic: target,
            conservative: target,
        }
    }

    pub fn get(
        &self,
        scenario: Scenario,
    ) -> Decimal {
        match scenario {
            Scenario::Base => self.base,
            Scenario::Optimistic => self.optimistic,
            Scenario::Conservative => self.conservative,
        }
    }

    pub fn set(
        &mut self,
        scenario: Scenario,
        target: Decimal,
    ) {
        match scenario {
            Scenario::Base => self.base = target,
            Scenario::Optimistic => self.optimistic = target,
            Scenario::Conservative => self.conservative = target,
        }
    }

    /// The shared threshold, if all three scenarios use the same one.
    pub fn uniform_value(&self) -> Option<Decimal> {
        (self.base == self.optimistic && self.base == self.conservative).then_some(self.base)
    }
}

impl Default for GoalTargets {
    fn default() -> Self {
        Self {
            base: dec!(50000),
            optimistic: dec!(60000),
            conservative: dec!(40000),
        }
    }
}

/// Month each scenario reaches its goal.
///
/// Derived from one set of series and one set of targets; recompute it
/// whenever either changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSimulation {
    pub base: Option<u32>,
    pub optimistic: Option<u32>,
    pub conservative: Option<u32>,
}

impl GoalSimulation {
    /// Evaluates every scenario against one shared target.
    pub fn run(
        scenarios: &ScenarioSeries,
        target: Decimal,
    ) -> Self {
        Self::run_with(scenarios, &GoalTargets::uniform(target))
    }

    /// Evaluates each scenario against its own target.
    pub fn run_with(
        scenarios: &ScenarioSeries,
        targets: &GoalTargets,
    ) -> Self {
        let month = |s: Scenario| goal_month(scenarios.get(s), targets.get(s));
        Self {
            base: month(Scenario::Base),
            optimistic: month(Scenario::Optimistic),
            conservative: month(Scenario::Conservative),
        }
    }

    pub fn get(
        &self,
        scenario: Scenario,
    ) -> Option<u32> {
        match scenario {
            Scenario::Base => self.base,
            Scenario::Optimistic => self.optimistic,
            Scenario::Conservative => self.conservative,
        }
    }

    /// `"<n> month(s)"` or [`GOAL_NOT_REACHED`].
    pub fn describe(
        &self,
        scenario: Scenario,
    ) -> String {
        match self.get(scenario) {
            Some(month) => format!("{month} month(s)"),
            None => GOAL_NOT_REACHED.to_string(),
        }
    }
}

impl fmt::Display for GoalSimulation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for scenario in Scenario::ALL {
            writeln!(f, "{}: {}", scenario.label(), self.describe(scenario))?;
        }
        Ok(())
    }
}
