use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Scenario;

/// The forecasting service sent something that cannot be rendered.
///
/// Missing values are never guessed or padded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error(
        "scenario series differ in length (base {base}, optimistic {optimistic}, conservative {conservative})"
    )]
    LengthMismatch {
        base: usize,
        optimistic: usize,
        conservative: usize,
    },

    #[error("response could not be decoded: {0}")]
    Undecodable(String),
}

/// Cumulative base-scenario savings at four horizons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub monthly: Decimal,
    pub yearly: Decimal,
    #[serde(rename = "2_years")]
    pub two_years: Decimal,
    #[serde(rename = "5_years")]
    pub five_years: Decimal,
}

impl SavingsSummary {
    /// `(label, value)` pairs in display order.
    pub fn labelled(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Monthly Savings", self.monthly),
            ("Yearly Savings", self.yearly),
            ("2 Years", self.two_years),
            ("5 Years", self.five_years),
        ]
    }
}

/// Cumulative projected savings per month, one series per scenario.
///
/// Index `i` holds the balance at the end of month `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSeries {
    pub base: Vec<Decimal>,
    pub optimistic: Vec<Decimal>,
    pub conservative: Vec<Decimal>,
}

impl ScenarioSeries {
    pub fn get(
        &self,
        scenario: Scenario,
    ) -> &[Decimal] {
        match scenario {
            Scenario::Base => &self.base,
            Scenario::Optimistic => &self.optimistic,
            Scenario::Conservative => &self.conservative,
        }
    }

    /// Common length of the three series.
    ///
    /// # Errors
    /// [`MalformedResponse::LengthMismatch`] when the lengths disagree.
    pub fn months(&self) -> Result<usize, MalformedResponse> {
        let (base, optimistic, conservative) = (
            self.base.len(),
            self.optimistic.len(),
            self.conservative.len(),
        );
        if base == optimistic && base == conservative {
            Ok(base)
        } else {
            Err(MalformedResponse::LengthMismatch {
                base,
                optimistic,
                conservative,
            })
        }
    }
}

/// Everything the forecasting service returns for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub summary: SavingsSummary,
    pub scenarios: ScenarioSeries,
    /// Free text from the service. Displayed as-is, never parsed.
    pub recommendation: String,
}

impl ForecastResponse {
    /// Checks the invariants a response must hold before it is displayed.
    pub fn validate(&self) -> Result<(), MalformedResponse> {
        self.scenarios.months().map(|_| ())
    }
}
