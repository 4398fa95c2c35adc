use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::api::{self, Validate, ValidationError};
use crate::config::PasClientConfig;
use crate::models::{
    AlarmStatus, ConversionError, ExternalAlarmStatus, Measurement, Patch, Threshold,
};
use crate::problems::{Problem, decode_problem};

const JSON_CONTENT_TYPE: &str = "application/json";
const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";
const MIN_TIMEOUT_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum PasClientError {
    #[error("pas_client_base_url_missing")]
    BaseUrlMissing,
    #[error("pas_client_invalid_path")]
    InvalidPath,
    #[error("pas_client_build_failed:{message}")]
    Build { message: String },
    #[error("pas_token_failed:{message}")]
    Token { message: String },
    #[error("pas_request_invalid:{0}")]
    Validation(#[from] ValidationError),
    #[error("pas_json_encode_failed:{source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("pas_request_failed:{message}")]
    Request { message: String },
    #[error("pas_read_failed:{message}")]
    Read { message: String },
    #[error("pas_http_{status}:{body}")]
    Http { status: StatusCode, body: String },
    #[error("pas_problem_{status}:{problem}")]
    Problem { status: StatusCode, problem: Problem },
    #[error("pas_json_decode_failed:{source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
    #[error("pas_conversion_failed:{0}")]
    Conversion(#[from] ConversionError),
}

impl PasClientError {
    /// HTTP status of a failed response, if the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } | Self::Problem { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        match self {
            Self::Problem { problem, .. } => Some(problem),
            _ => None,
        }
    }
}

/// Supplies the bearer token attached to every request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<String, PasClientError>;
}

/// A token fixed at construction time.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(<redacted>)")
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String, PasClientError> {
        Ok(self.0.clone())
    }
}

/// Operations of the point alarm status service.
#[async_trait]
pub trait PointAlarmStatusApi: Send + Sync {
    async fn get_threshold(&self, node_id: Uuid) -> Result<Threshold, PasClientError>;

    async fn set_threshold(
        &self,
        node_id: Uuid,
        threshold: &Threshold,
    ) -> Result<(), PasClientError>;

    /// Applies a JSON Patch and returns the threshold as stored afterwards.
    async fn patch_threshold(
        &self,
        node_id: Uuid,
        patch: &Patch,
    ) -> Result<Threshold, PasClientError>;

    async fn get_alarm_status(&self, node_id: Uuid) -> Result<AlarmStatus, PasClientError>;

    /// Feeds a measurement to the service, which recomputes the alarm status.
    async fn update_alarm_status(
        &self,
        node_id: Uuid,
        measurement: &Measurement,
    ) -> Result<(), PasClientError>;

    async fn set_external_alarm_status(
        &self,
        node_id: Uuid,
        status: &ExternalAlarmStatus,
    ) -> Result<(), PasClientError>;
}

#[derive(Clone)]
pub struct PasClient {
    base_url: String,
    timeout: Duration,
    request_attempts: usize,
    http: reqwest::Client,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl fmt::Debug for PasClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("request_attempts", &self.request_attempts)
            .field("authenticated", &self.token_provider.is_some())
            .finish_non_exhaustive()
    }
}

struct RequestBody {
    bytes: Vec<u8>,
    content_type: &'static str,
}

impl PasClient {
    pub fn new(config: PasClientConfig) -> Result<Self, PasClientError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("pas-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| PasClientError::Build {
                message: error.to_string(),
            })?;
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(config.timeout_ms.max(MIN_TIMEOUT_MS)),
            request_attempts: config.request_attempts.max(1),
            http,
            token_provider: None,
        })
    }

    #[must_use]
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.base_url, trimmed))
        }
    }

    #[must_use]
    pub fn threshold_path(node_id: Uuid) -> String {
        format!("v1/point-alarm-threshold/{node_id}")
    }

    #[must_use]
    pub fn alarm_status_path(node_id: Uuid) -> String {
        format!("v1/point-alarm-status/{node_id}")
    }

    #[must_use]
    pub fn external_alarm_status_path(node_id: Uuid) -> String {
        format!("v1/point-alarm-status/{node_id}/external")
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, PasClientError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let body = self.send(Method::GET, path, None).await?;
        decode_json(&body)
    }

    async fn put_json<Req>(&self, path: &str, payload: &Req) -> Result<(), PasClientError>
    where
        Req: Serialize + Validate + ?Sized,
    {
        payload.validate()?;
        let body = encode_body(payload, JSON_CONTENT_TYPE)?;
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<Vec<u8>, PasClientError> {
        let url = self.endpoint(path).ok_or(PasClientError::InvalidPath)?;
        let token = match &self.token_provider {
            Some(provider) => Some(provider.token().await?),
            None => None,
        };
        let attempts = if method == Method::GET || method == Method::PUT {
            self.request_attempts
        } else {
            1
        };
        let mut last_error: Option<String> = None;

        for attempt in 0..attempts {
            tracing::debug!(method = %method, url = %url, attempt, "pas request");

            let mut request = self
                .http
                .request(method.clone(), url.as_str())
                .header(ACCEPT, JSON_CONTENT_TYPE)
                .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()))
                .timeout(self.timeout);
            if let Some(token) = &token {
                request = request.header(AUTHORIZATION, format!("Bearer {token}"));
            }
            if let Some(body) = &body {
                request = request
                    .header(CONTENT_TYPE, body.content_type)
                    .body(body.bytes.clone());
            }

            match request.send().await {
                Ok(response) => return read_response(&method, &url, response).await,
                Err(error) => {
                    last_error = Some(error.to_string());
                    if attempt + 1 >= attempts {
                        break;
                    }
                    tracing::debug!(
                        method = %method,
                        url = %url,
                        attempt,
                        reason = %error,
                        "pas request failed, retrying"
                    );
                }
            }
        }

        Err(PasClientError::Request {
            message: last_error.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[async_trait]
impl PointAlarmStatusApi for PasClient {
    async fn get_threshold(&self, node_id: Uuid) -> Result<Threshold, PasClientError> {
        let response: api::GetPointAlarmThresholdResponse =
            self.get_json(&Self::threshold_path(node_id)).await?;
        Ok(Threshold::try_from(response)?)
    }

    async fn set_threshold(
        &self,
        node_id: Uuid,
        threshold: &Threshold,
    ) -> Result<(), PasClientError> {
        let request = api::SetPointAlarmThresholdRequest::from(threshold);
        self.put_json(&Self::threshold_path(node_id), &request)
            .await
    }

    async fn patch_threshold(
        &self,
        node_id: Uuid,
        patch: &Patch,
    ) -> Result<Threshold, PasClientError> {
        let operations = Vec::<api::Operation>::from(patch);
        operations.as_slice().validate()?;
        let body = encode_body(&operations, JSON_PATCH_CONTENT_TYPE)?;
        let bytes = self
            .send(Method::PATCH, &Self::threshold_path(node_id), Some(body))
            .await?;
        let response: api::GetPointAlarmThresholdResponse = decode_json(&bytes)?;
        Ok(Threshold::try_from(response)?)
    }

    async fn get_alarm_status(&self, node_id: Uuid) -> Result<AlarmStatus, PasClientError> {
        let response: api::GetAlarmStatusResponse =
            self.get_json(&Self::alarm_status_path(node_id)).await?;
        Ok(AlarmStatus::try_from(response)?)
    }

    async fn update_alarm_status(
        &self,
        node_id: Uuid,
        measurement: &Measurement,
    ) -> Result<(), PasClientError> {
        let request = api::UpdateAlarmStatusRequest::from(measurement);
        self.put_json(&Self::alarm_status_path(node_id), &request)
            .await
    }

    async fn set_external_alarm_status(
        &self,
        node_id: Uuid,
        status: &ExternalAlarmStatus,
    ) -> Result<(), PasClientError> {
        let request = api::SetExternalAlarmStatusRequest::from(status);
        self.put_json(&Self::external_alarm_status_path(node_id), &request)
            .await
    }
}

/// Maps a failed response to an error, preferring the problem document when
/// the body carries one.
pub fn format_http_error(status: StatusCode, body: &[u8]) -> PasClientError {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PasClientError::Http {
            status,
            body: "<empty>".to_string(),
        };
    }
    match decode_problem(status, body) {
        Ok(problem) => PasClientError::Problem { status, problem },
        Err(_) => PasClientError::Http {
            status,
            body: trimmed.to_string(),
        },
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, PasClientError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(PasClientError::BaseUrlMissing);
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn encode_body<T>(payload: &T, content_type: &'static str) -> Result<RequestBody, PasClientError>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(payload).map_err(|source| PasClientError::Encode { source })?;
    Ok(RequestBody {
        bytes,
        content_type,
    })
}

async fn read_response(
    method: &Method,
    url: &str,
    response: reqwest::Response,
) -> Result<Vec<u8>, PasClientError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|error| PasClientError::Read {
            message: error.to_string(),
        })?;

    if !status.is_success() {
        let error = format_http_error(status, &bytes);
        tracing::warn!(method = %method, url = %url, status = %status, reason = %error, "pas request rejected");
        return Err(error);
    }

    Ok(bytes.to_vec())
}

fn decode_json<T>(bytes: &[u8]) -> Result<T, PasClientError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    serde_json::from_slice::<T>(bytes).map_err(|source| PasClientError::Decode { source })
}
