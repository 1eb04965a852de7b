//! Remote forecasting over HTTP.
//!
//! The request is POSTed as JSON:
//!
//! ```json
//! { "salary": 5000.0, "expenses": { "rent": 1000.0, "food": 500.0 } }
//! ```
//!
//! and the body of a 2xx reply must be a complete forecast:
//!
//! ```json
//! {
//!   "summary": { "monthly": 3500, "yearly": 42000, "2_years": 84000, "5_years": 210000 },
//!   "scenarios": { "base": [...], "optimistic": [...], "conservative": [...] },
//!   "recommendation": "..."
//! }
//! ```

pub mod client;
pub mod factory;

pub use client::HttpForecastService;
pub use factory::HttpServiceFactory;
