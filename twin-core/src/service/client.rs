use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ForecastRequest, ForecastResponse, MalformedResponse};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("forecasting service unreachable: {0}")]
    Transport(String),

    #[error("forecasting service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode forecast: {0}")]
    Decode(String),

    #[error("malformed forecast: {0}")]
    Malformed(#[from] MalformedResponse),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("projection failed: {0}")]
    Model(String),
}

/// Produces a forecast for one request.
///
/// One call yields one complete response or fails outright. Implementations
/// do not retry; callers decide what to do with a failure.
#[async_trait]
pub trait ForecastService: Send + Sync {
    /// Backend identifier, used in logs.
    fn name(&self) -> &'static str;

    async fn forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ServiceError>;
}
