use async_trait::async_trait;
use twin_core::{ForecastService, ServiceConfig, ServiceError, ServiceFactory};

use crate::model::{MAX_HORIZON_MONTHS, ProjectionModel};
use crate::service::LocalForecastService;

/// [`ServiceFactory`] for the in-process projection model.
///
/// Register this with a [`twin_core::ServiceRegistry`] to make the
/// `"local"` backend available:
///
/// ```rust
/// use twin_core::ServiceRegistry;
/// use twin_engine::LocalServiceFactory;
///
/// let mut registry = ServiceRegistry::new();
/// registry.register(Box::new(LocalServiceFactory));
/// assert_eq!(registry.available_backends(), vec!["local"]);
/// ```
pub struct LocalServiceFactory;

#[async_trait]
impl ServiceFactory for LocalServiceFactory {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    /// Builds a model projecting `config.horizon_months` months with the
    /// default growth assumptions.
    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn ForecastService>, ServiceError> {
        if !(1..=MAX_HORIZON_MONTHS).contains(&config.horizon_months) {
            return Err(ServiceError::Configuration(format!(
                "horizon_months must be between 1 and {MAX_HORIZON_MONTHS}, got {}",
                config.horizon_months
            )));
        }
        let model = ProjectionModel::with_horizon(config.horizon_months);
        Ok(Box::new(LocalForecastService::new(model)))
    }
}
