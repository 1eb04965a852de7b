mod amount;
mod expenses;
mod request;
mod response;
mod scenario;

pub use amount::RawAmount;
pub use expenses::{DuplicateCategory, ExpenseBreakdown, ExpenseItem};
pub use request::ForecastRequest;
pub use response::{ForecastResponse, MalformedResponse, SavingsSummary, ScenarioSeries};
pub use scenario::Scenario;
