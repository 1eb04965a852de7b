use std::time::Duration;

use async_trait::async_trait;
use twin_core::{ForecastService, ServiceConfig, ServiceError, ServiceFactory};

use crate::client::HttpForecastService;

/// [`ServiceFactory`] for a remote forecasting endpoint.
///
/// Reads `endpoint` and `timeout_secs` from the [`ServiceConfig`].
pub struct HttpServiceFactory;

#[async_trait]
impl ServiceFactory for HttpServiceFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn ForecastService>, ServiceError> {
        if config.timeout_secs == 0 {
            return Err(ServiceError::Configuration(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        let service = HttpForecastService::new(
            &config.endpoint,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Box::new(service))
    }
}
