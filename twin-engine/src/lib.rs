pub mod factory;
pub mod model;
pub mod service;

pub use factory::LocalServiceFactory;
pub use model::{DEFAULT_RECOMMENDATION, MAX_HORIZON_MONTHS, ProjectionError, ProjectionModel};
pub use service::LocalForecastService;
