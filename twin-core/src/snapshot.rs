use csv::StringRecord;

use crate::analysis::{ChartSeries, GoalSimulation, GoalTargets, align_series};
use crate::export::{ExportError, PdfLayout, to_csv_rows, to_pdf_sections};
use crate::models::{ForecastRequest, ForecastResponse, MalformedResponse};

/// A dispatched request together with the response it produced.
///
/// Every derived view is computed from one snapshot, so a chart, its goal
/// markers and an export can never mix fields from different responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSnapshot {
    /// Dispatch order of the request; higher is newer.
    pub sequence: u64,
    pub request: ForecastRequest,
    pub response: ForecastResponse,
}

impl ForecastSnapshot {
    pub fn chart_series(&self) -> Result<ChartSeries, MalformedResponse> {
        align_series(&self.response)
    }

    pub fn goals_with(
        &self,
        targets: &GoalTargets,
    ) -> GoalSimulation {
        GoalSimulation::run_with(&self.response.scenarios, targets)
    }

    pub fn csv_rows(&self) -> Result<Vec<StringRecord>, ExportError> {
        to_csv_rows(&self.response)
    }

    pub fn pdf_layout(&self) -> PdfLayout {
        to_pdf_sections(&self.request, &self.response)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ExpenseBreakdown, SavingsSummary, Scenario, ScenarioSeries};

    fn snapshot(conservative: Vec<Decimal>) -> ForecastSnapshot {
        ForecastSnapshot {
            sequence: 3,
            request: ForecastRequest {
                salary: dec!(1000),
                expenses: ExpenseBreakdown::new(),
            },
            response: ForecastResponse {
                summary: SavingsSummary {
                    monthly: dec!(100),
                    yearly: dec!(1200),
                    two_years: dec!(2400),
                    five_years: dec!(6000),
                },
                scenarios: ScenarioSeries {
                    base: vec![dec!(100), dec!(200), dec!(300)],
                    optimistic: vec![dec!(150), dec!(300), dec!(450)],
                    conservative,
                },
                recommendation: String::new(),
            },
        }
    }

    #[test]
    fn chart_series_aligns_months() {
        let chart = snapshot(vec![dec!(50), dec!(100), dec!(150)])
            .chart_series()
            .unwrap();

        assert_eq!(chart.len(), 3);
        assert_eq!(chart[2].month, 3);
        assert_eq!(chart[2].value(Scenario::Optimistic), dec!(450));
        assert_eq!(chart[2].value(Scenario::Conservative), dec!(150));
    }

    #[test]
    fn chart_series_rejects_ragged_snapshot() {
        let result = snapshot(vec![dec!(50)]).chart_series();

        assert!(matches!(result, Err(MalformedResponse::LengthMismatch { .. })));
    }

    #[test]
    fn goals_with_applies_each_target() {
        let targets = GoalTargets {
            base: dec!(300),
            optimistic: dec!(150),
            conservative: dec!(1000),
        };

        let goals = snapshot(vec![dec!(50), dec!(100), dec!(150)]).goals_with(&targets);

        assert_eq!(goals.base, Some(3));
        assert_eq!(goals.optimistic, Some(1));
        assert_eq!(goals.conservative, None);
    }

    #[test]
    fn uniform_targets_share_one_threshold() {
        let goals = snapshot(vec![dec!(50), dec!(100), dec!(150)])
            .goals_with(&GoalTargets::uniform(dec!(200)));

        assert_eq!(goals.base, Some(2));
        assert_eq!(goals.optimistic, Some(2));
        assert_eq!(goals.conservative, None);
    }
}
