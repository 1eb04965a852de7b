//! Turns raw form input into a [`ForecastRequest`].
//!
//! Validation is all-or-nothing: a single bad entry rejects the whole
//! request, and nothing is dispatched. The salary is checked first, then
//! each expense in the order the caller supplies them.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;
use tracing::warn;

use crate::models::{ExpenseBreakdown, ForecastRequest, RawAmount};

/// Why a single raw amount was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountProblem {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("value is not finite")]
    NonFinite,

    #[error("value is too large to represent")]
    OutOfRange,

    #[error("value {0} is negative")]
    Negative(Decimal),
}

/// Raw input that cannot become a [`ForecastRequest`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("invalid salary: {0}")]
    Salary(AmountProblem),

    #[error("invalid expense '{category}': {problem}")]
    Expense {
        category: String,
        problem: AmountProblem,
    },

    #[error("expense category '{0}' appears more than once")]
    DuplicateCategory(String),

    #[error("expenses add up to more than can be represented")]
    ExpenseTotalOutOfRange,
}

/// Removes surrounding whitespace and `,` thousands separators.
fn normalize_amount_text(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Classifies text that did not parse as a [`Decimal`]: plain digits past
/// the representable range are [`AmountProblem::OutOfRange`], anything else
/// is not a number.
fn text_problem(
    normalized: &str,
    raw: &str,
) -> AmountProblem {
    let is_plain_number = normalized
        .strip_prefix('-')
        .unwrap_or(normalized)
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.');
    match normalized.parse::<f64>() {
        Ok(value) if is_plain_number && value.is_finite() => AmountProblem::OutOfRange,
        _ => AmountProblem::NotNumeric(raw.to_string()),
    }
}

/// Converts one raw amount into a non-negative [`Decimal`].
pub fn parse_amount(raw: &RawAmount) -> Result<Decimal, AmountProblem> {
    let value = match raw {
        RawAmount::Empty => return Err(AmountProblem::Empty),
        RawAmount::Number(n) => {
            if !n.is_finite() {
                return Err(AmountProblem::NonFinite);
            }
            Decimal::from_f64(*n).ok_or(AmountProblem::OutOfRange)?
        }
        RawAmount::Text(s) => {
            let normalized = normalize_amount_text(s);
            if normalized.is_empty() {
                return Err(AmountProblem::Empty);
            }
            normalized
                .parse::<Decimal>()
                .map_err(|_| text_problem(&normalized, s))?
        }
    };

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountProblem::Negative(value));
    }
    Ok(value)
}

/// Validates raw salary and expenses and assembles a request.
///
/// `expenses` is every category currently on screen, in display order.
/// The returned request keeps that order.
///
/// # Errors
/// [`InvalidInput`] naming the first offending field.
pub fn build<'a, I>(
    raw_salary: &RawAmount,
    raw_expenses: I,
) -> Result<ForecastRequest, InvalidInput>
where
    I: IntoIterator<Item = (&'a str, &'a RawAmount)>,
{
    let salary = parse_amount(raw_salary).map_err(|problem| {
        warn!(salary = %raw_salary, %problem, "rejecting forecast input");
        InvalidInput::Salary(problem)
    })?;

    let mut expenses = ExpenseBreakdown::new();
    for (category, raw) in raw_expenses {
        let amount = parse_amount(raw).map_err(|problem| {
            warn!(category, value = %raw, %problem, "rejecting forecast input");
            InvalidInput::Expense {
                category: category.to_string(),
                problem,
            }
        })?;
        expenses
            .insert(category, amount)
            .map_err(|dup| InvalidInput::DuplicateCategory(dup.0))?;
    }

    if expenses.total().is_none() {
        warn!(categories = expenses.len(), "rejecting forecast input: expense total out of range");
        return Err(InvalidInput::ExpenseTotalOutOfRange);
    }

    Ok(ForecastRequest { salary, expenses })
}
