use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{ForecastService, ServiceError};

/// Backend-agnostic forecasting service configuration.
///
/// `backend` must match the [`ServiceFactory::backend_name`] of a
/// registered factory. The remaining fields are read by whichever backends
/// need them.
///
/// | backend | uses                          |
/// |---------|-------------------------------|
/// | `local` | `horizon_months`              |
/// | `http`  | `endpoint`, `timeout_secs`    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"local"`).
    pub backend: String,
    /// URL the request body is POSTed to.
    pub endpoint: String,
    /// Whole-request timeout for remote backends.
    pub timeout_secs: u64,
    /// Number of months an in-process model projects.
    pub horizon_months: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            endpoint: "http://localhost:8001/forecast".to_string(),
            timeout_secs: 30,
            horizon_months: 60,
        }
    }
}

/// One implementation per forecasting backend. Each backend crate exports a
/// unit struct implementing this trait, registered with a
/// [`ServiceRegistry`] at startup.
#[async_trait]
pub trait ServiceFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn ForecastService>, ServiceError>;
}

/// Registry of [`ServiceFactory`] instances, keyed by backend name.
pub struct ServiceRegistry {
    factories: HashMap<&'static str, Box<dyn ServiceFactory>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn ServiceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`ServiceError::Configuration`]: no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn ForecastService>, ServiceError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                ServiceError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
