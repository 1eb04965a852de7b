pub mod analysis;
pub mod common;
pub mod error;
pub mod export;
pub mod models;
pub mod request_builder;
pub mod service;
pub mod session;
pub mod slot;
pub mod snapshot;

pub use error::ForecastError;
pub use models::*;
pub use request_builder::{AmountProblem, InvalidInput};
pub use service::{ForecastService, ServiceConfig, ServiceError, ServiceFactory, ServiceRegistry};
pub use session::{ArrivalPolicy, ForecastSession};
pub use slot::{ForecastSlot, SharedSnapshot};
pub use snapshot::ForecastSnapshot;
