use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ForecastResponse, MalformedResponse, Scenario};

/// One month of all three scenarios, ready for a line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// 1-based month number.
    pub month: u32,
    pub base: Decimal,
    pub optimistic: Decimal,
    pub conservative: Decimal,
}

impl ChartPoint {
    pub fn value(
        &self,
        scenario: Scenario,
    ) -> Decimal {
        match scenario {
            Scenario::Base => self.base,
            Scenario::Optimistic => self.optimistic,
            Scenario::Conservative => self.conservative,
        }
    }
}

/// Month-aligned records for every scenario.
pub type ChartSeries = Vec<ChartPoint>;

/// Zips the three scenario series into one record per month.
///
/// The result has exactly as many records as each series has entries.
///
/// # Errors
/// [`MalformedResponse::LengthMismatch`] when the series differ in length.
/// Nothing is truncated.
pub fn align_series(response: &ForecastResponse) -> Result<ChartSeries, MalformedResponse> {
    let scenarios = &response.scenarios;
    scenarios.months()?;

    Ok(scenarios
        .base
        .iter()
        .zip(&scenarios.optimistic)
        .zip(&scenarios.conservative)
        .zip(1u32..)
        .map(|(((base, optimistic), conservative), month)| ChartPoint {
            month,
            base: *base,
            optimistic: *optimistic,
            conservative: *conservative,
        })
        .collect())
}
