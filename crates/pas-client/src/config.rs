use std::env;

use thiserror::Error;

pub const PRODUCTION_STAGE: &str = "prod";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REQUEST_ATTEMPTS: usize = 2;

const ENV_STAGE: &str = "PAS_STAGE";
const ENV_BASE_URL: &str = "PAS_BASE_URL";
const ENV_TIMEOUT_MS: &str = "PAS_TIMEOUT_MS";
const ENV_REQUEST_ATTEMPTS: &str = "PAS_REQUEST_ATTEMPTS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PAS_STAGE: {0}")]
    InvalidStage(String),
    #[error("invalid PAS_TIMEOUT_MS: {0}")]
    InvalidTimeoutMs(String),
    #[error("invalid PAS_REQUEST_ATTEMPTS: {0}")]
    InvalidRequestAttempts(String),
}

/// Connection settings for [`crate::PasClient`].
///
/// The default targets the production stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub request_attempts: usize,
}

impl Default for PasClientConfig {
    fn default() -> Self {
        Self::for_stage(PRODUCTION_STAGE)
    }
}

impl PasClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            request_attempts: DEFAULT_REQUEST_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn for_stage(stage: &str) -> Self {
        Self::new(stage_base_url(stage))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Points the config at `stage`, keeping timeout and attempts.
    pub fn with_stage(mut self, stage: &str) -> Result<Self, ConfigError> {
        self.base_url = stage_base_url(checked_stage(stage)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_request_attempts(mut self, request_attempts: usize) -> Self {
        self.request_attempts = request_attempts;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `PAS_BASE_URL` wins over `PAS_STAGE` when both are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stage = lookup(ENV_STAGE).unwrap_or_else(|| PRODUCTION_STAGE.to_string());
        let mut config = Self::for_stage(checked_stage(&stage)?);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|error| ConfigError::InvalidTimeoutMs(format!("{raw}: {error}")))?;
        }

        if let Some(raw) = lookup(ENV_REQUEST_ATTEMPTS) {
            let attempts = raw
                .trim()
                .parse::<usize>()
                .map_err(|error| ConfigError::InvalidRequestAttempts(format!("{raw}: {error}")))?;
            if attempts == 0 {
                return Err(ConfigError::InvalidRequestAttempts(
                    "must be at least 1".to_string(),
                ));
            }
            config.request_attempts = attempts;
        }

        Ok(config)
    }
}

fn checked_stage(stage: &str) -> Result<&str, ConfigError> {
    let stage = stage.trim();
    if stage.is_empty() || stage.contains(['/', '.', ' ']) {
        return Err(ConfigError::InvalidStage(stage.to_string()));
    }
    Ok(stage)
}

/// Base URL of the service deployed on `stage`.
#[must_use]
pub fn stage_base_url(stage: &str) -> String {
    if stage == PRODUCTION_STAGE {
        return "https://api.point-alarm-status.iot.enlight.skf.com".to_string();
    }
    format!("https://api.point-alarm-status.{stage}.iot.enlight.skf.com")
}
