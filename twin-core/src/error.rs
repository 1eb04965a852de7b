use thiserror::Error;

use crate::models::MalformedResponse;
use crate::request_builder::InvalidInput;
use crate::service::ServiceError;

/// Why one forecast cycle did not complete.
///
/// Every variant is recoverable: the previously displayed forecast stays
/// as it was.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponse),

    #[error(transparent)]
    Transport(ServiceError),
}

impl From<ServiceError> for ForecastError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Malformed(inner) => Self::MalformedResponse(inner),
            other => Self::Transport(other),
        }
    }
}
