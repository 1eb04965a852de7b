//! Three-scenario savings projection.
//!
//! # Model
//!
//! For every month `m` in `1..=horizon`, with `S` the salary and `E` the
//! total of all expenses:
//!
//! | Scenario     | Monthly savings                      |
//! |--------------|--------------------------------------|
//! | base         | `S - E`                              |
//! | optimistic   | `S × (1 + gₛ)^m − E × (1 + gₑ)^m`    |
//! | conservative | `S − E × (1 + g꜀)^m`                 |
//!
//! Each monthly value is rounded half-up to cents, then accumulated into a
//! running balance. The summary reads the base balance after 1, 12, 24
//! months and at the horizon (falling back to the horizon when it is
//! shorter than the requested month).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use twin_core::{ExpenseBreakdown, ForecastRequest};
//! use twin_engine::ProjectionModel;
//!
//! let mut expenses = ExpenseBreakdown::new();
//! expenses.insert("rent", dec!(1000)).unwrap();
//! expenses.insert("food", dec!(500)).unwrap();
//! expenses.insert("entertainment", dec!(300)).unwrap();
//! let request = ForecastRequest { salary: dec!(5000), expenses };
//!
//! let response = ProjectionModel::default().project(&request).unwrap();
//!
//! assert_eq!(response.summary.monthly, dec!(3200));
//! assert_eq!(response.summary.five_years, dec!(192000));
//! assert_eq!(response.scenarios.conservative[0], dec!(3191));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use thiserror::Error;
use twin_core::common::round_half_up;
use twin_core::{ForecastRequest, ForecastResponse, SavingsSummary, ScenarioSeries};

/// Longest horizon the model accepts: one hundred years.
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// Advice attached to every locally produced forecast.
pub const DEFAULT_RECOMMENDATION: &str = "Consider saving more on discretionary expenses.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// A zero-month horizon leaves nothing to summarise.
    #[error("projection horizon must be at least one month")]
    ZeroHorizon,

    #[error("projection horizon of {0} months exceeds {MAX_HORIZON_MONTHS}")]
    HorizonTooLong(u32),

    #[error("expense total exceeds the representable range")]
    ExpenseTotalOverflow,

    /// A compounded or accumulated value left the representable range.
    #[error("projection overflowed in month {0}")]
    Overflow(u32),
}

/// Growth assumptions and horizon for the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionModel {
    /// Number of months projected.
    pub horizon_months: u32,

    /// Monthly salary growth in the optimistic scenario.
    pub optimistic_salary_growth: Decimal,

    /// Monthly expense growth in the optimistic scenario.
    pub optimistic_expense_growth: Decimal,

    /// Monthly expense growth in the conservative scenario.
    pub conservative_expense_growth: Decimal,
}

impl Default for ProjectionModel {
    fn default() -> Self {
        Self {
            horizon_months: 60,
            optimistic_salary_growth: dec!(0.003),
            optimistic_expense_growth: dec!(0.002),
            conservative_expense_growth: dec!(0.005),
        }
    }
}

impl ProjectionModel {
    pub fn with_horizon(horizon_months: u32) -> Self {
        Self {
            horizon_months,
            ..Self::default()
        }
    }

    /// Projects cumulative savings for all three scenarios.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] if:
    /// - the horizon is zero or longer than [`MAX_HORIZON_MONTHS`]
    /// - the expense total or a projected value overflows `Decimal`
    pub fn project(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ProjectionError> {
        if self.horizon_months == 0 {
            return Err(ProjectionError::ZeroHorizon);
        }
        if self.horizon_months > MAX_HORIZON_MONTHS {
            return Err(ProjectionError::HorizonTooLong(self.horizon_months));
        }

        let salary = request.salary;
        let expenses = request
            .expenses
            .total()
            .ok_or(ProjectionError::ExpenseTotalOverflow)?;

        let capacity = self.horizon_months as usize;
        let mut base = Vec::with_capacity(capacity);
        let mut optimistic = Vec::with_capacity(capacity);
        let mut conservative = Vec::with_capacity(capacity);

        for month in 1..=self.horizon_months {
            base.push(self.base_monthly(salary, expenses));
            optimistic.push(self.optimistic_monthly(salary, expenses, month)?);
            conservative.push(self.conservative_monthly(salary, expenses, month)?);
        }

        let scenarios = ScenarioSeries {
            base: self.cumulative(&base)?,
            optimistic: self.cumulative(&optimistic)?,
            conservative: self.cumulative(&conservative)?,
        };
        let summary = self.summary(&scenarios.base);

        Ok(ForecastResponse {
            summary,
            scenarios,
            recommendation: DEFAULT_RECOMMENDATION.to_string(),
        })
    }

    /// Base scenario: no growth on either side.
    fn base_monthly(
        &self,
        salary: Decimal,
        expenses: Decimal,
    ) -> Decimal {
        round_half_up(salary - expenses)
    }

    /// Optimistic scenario: salary outgrows expenses.
    fn optimistic_monthly(
        &self,
        salary: Decimal,
        expenses: Decimal,
        month: u32,
    ) -> Result<Decimal, ProjectionError> {
        let income = self.compound(salary, self.optimistic_salary_growth, month)?;
        let spending = self.compound(expenses, self.optimistic_expense_growth, month)?;
        Ok(round_half_up(income - spending))
    }

    /// Conservative scenario: flat salary, inflating expenses.
    fn conservative_monthly(
        &self,
        salary: Decimal,
        expenses: Decimal,
        month: u32,
    ) -> Result<Decimal, ProjectionError> {
        let spending = self.compound(expenses, self.conservative_expense_growth, month)?;
        Ok(round_half_up(salary - spending))
    }

    /// `amount × (1 + rate)^month`.
    fn compound(
        &self,
        amount: Decimal,
        rate: Decimal,
        month: u32,
    ) -> Result<Decimal, ProjectionError> {
        (Decimal::ONE + rate)
            .checked_powu(u64::from(month))
            .and_then(|factor| amount.checked_mul(factor))
            .ok_or(ProjectionError::Overflow(month))
    }

    /// Running total of monthly savings.
    fn cumulative(
        &self,
        monthly: &[Decimal],
    ) -> Result<Vec<Decimal>, ProjectionError> {
        let mut balance = Decimal::ZERO;
        monthly
            .iter()
            .zip(1u32..)
            .map(|(value, month)| {
                balance = balance
                    .checked_add(*value)
                    .ok_or(ProjectionError::Overflow(month))?;
                Ok(balance)
            })
            .collect()
    }

    /// Base balance after `months`, or at the horizon if that comes first.
    fn balance_after(
        &self,
        base: &[Decimal],
        months: usize,
    ) -> Decimal {
        base.get(months - 1)
            .or_else(|| base.last())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn summary(
        &self,
        base: &[Decimal],
    ) -> SavingsSummary {
        SavingsSummary {
            monthly: self.balance_after(base, 1),
            yearly: self.balance_after(base, 12),
            two_years: self.balance_after(base, 24),
            five_years: base.last().copied().unwrap_or(Decimal::ZERO),
        }
    }
}
