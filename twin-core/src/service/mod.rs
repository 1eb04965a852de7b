mod client;
mod factory;

pub use client::{ForecastService, ServiceError};
pub use factory::{ServiceConfig, ServiceFactory, ServiceRegistry};
