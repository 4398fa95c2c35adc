//! Client for the point alarm status (PAS) service.
//!
//! Callers work with the types in [`models`]. The JSON request/response
//! shapes the service speaks live in [`api`], and the event-sourcing envelopes
//! that carry embedded protobuf payloads live in [`events`].

pub mod api;
pub mod client;
pub mod config;
pub mod events;
pub mod models;
pub mod problems;

pub use client::{PasClient, PasClientError, PointAlarmStatusApi, StaticToken, TokenProvider};
pub use config::{ConfigError, PasClientConfig, stage_base_url};
pub use models::ConversionError;
pub use problems::{BasicProblem, Problem, ProblemReason, ValidationProblem};
