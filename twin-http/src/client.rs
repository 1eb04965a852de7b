use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};
use twin_core::{
    ForecastRequest, ForecastResponse, ForecastService, MalformedResponse, ServiceError,
};

/// [`ForecastService`] backed by a remote endpoint.
///
/// Each call is a single POST. Failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct HttpForecastService {
    http: Client,
    endpoint: Url,
}

impl HttpForecastService {
    /// # Errors
    /// [`ServiceError::Configuration`] if `endpoint` is not an absolute URL
    /// or the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            ServiceError::Configuration(format!("invalid endpoint '{endpoint}': {e}"))
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, endpoint })
    }
}

/// Decodes a 2xx body.
///
/// Text that is not JSON at all is a [`ServiceError::Decode`]; JSON missing
/// a field or carrying unequal series is [`ServiceError::Malformed`].
fn decode_forecast(text: &str) -> Result<ForecastResponse, ServiceError> {
    let raw = serde_json::from_str::<serde_json::Value>(text)
        .map_err(|e| ServiceError::Decode(format!("{e}: {text}")))?;
    let response = serde_json::from_value::<ForecastResponse>(raw)
        .map_err(|e| MalformedResponse::Undecodable(e.to_string()))?;
    response.validate()?;
    Ok(response)
}

#[async_trait]
impl ForecastService for HttpForecastService {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ServiceError> {
        debug!(endpoint = %self.endpoint, "posting forecast request");

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ServiceError::Transport(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "forecasting service rejected request");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_forecast(&text)
    }
}
