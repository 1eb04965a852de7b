use async_trait::async_trait;
use tracing::debug;
use twin_core::{ForecastRequest, ForecastResponse, ForecastService, ServiceError};

use crate::model::{ProjectionError, ProjectionModel};

/// Forecasts in-process with a [`ProjectionModel`].
#[derive(Debug, Clone, Default)]
pub struct LocalForecastService {
    model: ProjectionModel,
}

impl LocalForecastService {
    pub fn new(model: ProjectionModel) -> Self {
        Self { model }
    }
}

impl From<ProjectionError> for ServiceError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::ZeroHorizon | ProjectionError::HorizonTooLong(_) => {
                ServiceError::Configuration(err.to_string())
            }
            ProjectionError::ExpenseTotalOverflow | ProjectionError::Overflow(_) => {
                ServiceError::Model(err.to_string())
            }
        }
    }
}

#[async_trait]
impl ForecastService for LocalForecastService {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ServiceError> {
        debug!(
            horizon = self.model.horizon_months,
            salary = %request.salary,
            categories = request.expenses.len(),
            "projecting locally"
        );
        Ok(self.model.project(request)?)
    }
}
