//! Plain-text rendering of one forecast for the terminal.

use std::fmt::Write;

use twin_core::analysis::GoalTargets;
use twin_core::common::format_currency;
use twin_core::{MalformedResponse, Scenario, SharedSnapshot};

/// Summary figures, goal months and the recommendation.
///
/// ```text
/// Savings
///   Monthly Savings: $3200.00
///   Yearly Savings: $38400.00
///   2 Years: $76800.00
///   5 Years: $192000.00
///
/// Months to reach $50000.00
///   Base (BG): 16 month(s)
///   Optimistic (OG): 16 month(s)
///   Conservative (CG): 17 month(s)
///
/// Recommendation: Consider saving more on discretionary expenses.
/// ```
///
/// When the scenarios have different goals each line names its own.
pub fn render(
    snapshot: &SharedSnapshot,
    targets: &GoalTargets,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Savings");
    for (label, value) in snapshot.response.summary.labelled() {
        let _ = writeln!(out, "  {label}: {}", format_currency(value));
    }

    let _ = writeln!(out);
    let goals = snapshot.goals_with(targets);
    match targets.uniform_value() {
        Some(target) => {
            let _ = writeln!(out, "Months to reach {}", format_currency(target));
            for scenario in Scenario::ALL {
                let _ = writeln!(out, "  {}: {}", scenario.label(), goals.describe(scenario));
            }
        }
        None => {
            let _ = writeln!(out, "Months to reach goal");
            for scenario in Scenario::ALL {
                let _ = writeln!(
                    out,
                    "  {} ({}): {}",
                    scenario.label(),
                    format_currency(targets.get(scenario)),
                    goals.describe(scenario)
                );
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendation: {}", snapshot.response.recommendation);
    out
}

/// One right-aligned row per month with each scenario's balance.
pub fn render_chart(snapshot: &SharedSnapshot) -> Result<String, MalformedResponse> {
    let chart = snapshot.chart_series()?;
    let mut out = String::new();

    let _ = write!(out, "{:>5}", "Month");
    for scenario in Scenario::ALL {
        let _ = write!(out, " {:>18}", scenario.label());
    }
    let _ = writeln!(out);

    for point in &chart {
        let _ = write!(out, "{:>5}", point.month);
        for scenario in Scenario::ALL {
            let _ = write!(out, " {:>18}", format_currency(point.value(scenario)));
        }
        let _ = writeln!(out);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use twin_core::{
        ExpenseBreakdown, ForecastRequest, ForecastResponse, ForecastSnapshot, SavingsSummary,
        ScenarioSeries,
    };

    use super::*;

    fn snapshot(conservative: Vec<rust_decimal::Decimal>) -> SharedSnapshot {
        Arc::new(ForecastSnapshot {
            sequence: 1,
            request: ForecastRequest {
                salary: dec!(2000),
                expenses: ExpenseBreakdown::new(),
            },
            response: ForecastResponse {
                summary: SavingsSummary {
                    monthly: dec!(100),
                    yearly: dec!(1200),
                    two_years: dec!(2400),
                    five_years: dec!(6000.5),
                },
                scenarios: ScenarioSeries {
                    base: vec![dec!(100), dec!(200), dec!(300)],
                    optimistic: vec![dec!(150), dec!(300), dec!(450)],
                    conservative,
                },
                recommendation: "Spend less.".to_string(),
            },
        })
    }

    fn flat() -> SharedSnapshot {
        snapshot(vec![dec!(50), dec!(100), dec!(150)])
    }

    #[test]
    fn renders_summary_goals_and_advice() {
        let text = render(&flat(), &GoalTargets::uniform(dec!(300)));

        assert_eq!(
            text,
            "Savings\n\
             \x20 Monthly Savings: $100.00\n\
             \x20 Yearly Savings: $1200.00\n\
             \x20 2 Years: $2400.00\n\
             \x20 5 Years: $6000.50\n\
             \n\
             Months to reach $300.00\n\
             \x20 Base (BG): 3 month(s)\n\
             \x20 Optimistic (OG): 2 month(s)\n\
             \x20 Conservative (CG): Goal not reached\n\
             \n\
             Recommendation: Spend less.\n"
        );
    }

    #[test]
    fn renders_each_goal_when_they_differ() {
        let targets = GoalTargets {
            base: dec!(300),
            optimistic: dec!(450),
            conservative: dec!(100),
        };

        let text = render(&flat(), &targets);

        assert!(text.contains("Months to reach goal\n"), "{text}");
        assert!(text.contains("  Base (BG) ($300.00): 3 month(s)\n"), "{text}");
        assert!(text.contains("  Optimistic (OG) ($450.00): 3 month(s)\n"), "{text}");
        assert!(text.contains("  Conservative (CG) ($100.00): 2 month(s)\n"), "{text}");
    }

    #[test]
    fn chart_lists_every_month() {
        let text = render_chart(&flat()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Month"));
        assert!(lines[0].ends_with("Conservative (CG)"));
        assert_eq!(
            lines[3].split_whitespace().collect::<Vec<_>>(),
            vec!["3", "$300.00", "$450.00", "$150.00"]
        );
    }

    #[test]
    fn chart_rejects_ragged_series() {
        let result = render_chart(&snapshot(vec![dec!(50)]));

        assert!(matches!(result, Err(MalformedResponse::LengthMismatch { .. })));
    }
}
