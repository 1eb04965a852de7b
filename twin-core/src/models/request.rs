use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ExpenseBreakdown;

/// A validated request for the forecasting service.
///
/// Only [`crate::request_builder::build`] produces one from user input, so
/// `salary` and every expense are known to be non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Monthly take-home salary.
    pub salary: Decimal,

    /// Monthly expenses by category.
    pub expenses: ExpenseBreakdown,
}

impl ForecastRequest {
    /// Salary left after every expense. May be negative; `None` when the
    /// expense total is out of range.
    pub fn monthly_surplus(&self) -> Option<Decimal> {
        self.expenses
            .total()
            .and_then(|total| self.salary.checked_sub(total))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn request() -> ForecastRequest {
        let mut expenses = ExpenseBreakdown::new();
        expenses.insert("rent", dec!(1000)).unwrap();
        expenses.insert("food", dec!(500)).unwrap();
        ForecastRequest {
            salary: dec!(3000),
            expenses,
        }
    }

    #[test]
    fn monthly_surplus_subtracts_all_expenses() {
        assert_eq!(request().monthly_surplus(), Some(dec!(1500)));
    }

    #[test]
    fn monthly_surplus_is_none_when_total_overflows() {
        let mut expenses = ExpenseBreakdown::new();
        expenses.insert("rent", Decimal::MAX).unwrap();
        expenses.insert("food", dec!(1)).unwrap();
        let request = ForecastRequest {
            salary: dec!(3000),
            expenses,
        };

        assert_eq!(request.monthly_surplus(), None);
    }

    #[test]
    fn serializes_to_wire_shape() {
        let json = serde_json::to_value(request()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "salary": 3000.0,
                "expenses": { "rent": 1000.0, "food": 500.0 }
            })
        );
    }
}
