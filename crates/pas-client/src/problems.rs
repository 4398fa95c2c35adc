//! RFC 7807 problem documents returned on non-success responses.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicProblem {
    #[serde(rename = "type", default)]
    pub problem_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub instance: String,
    /// Identifier for tracing this occurrence in the service logs.
    #[serde(default)]
    pub correlation_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReason {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationProblem {
    #[serde(flatten)]
    pub problem: BasicProblem,
    #[serde(default)]
    pub reasons: Vec<ProblemReason>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Basic(BasicProblem),
    Validation(ValidationProblem),
}

impl Problem {
    #[must_use]
    pub fn basic(&self) -> &BasicProblem {
        match self {
            Self::Basic(problem) => problem,
            Self::Validation(problem) => &problem.problem,
        }
    }

    #[must_use]
    pub fn reasons(&self) -> &[ProblemReason] {
        match self {
            Self::Basic(_) => &[],
            Self::Validation(problem) => &problem.reasons,
        }
    }

    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        let id = self.basic().correlation_id.as_str();
        (!id.is_empty()).then_some(id)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let basic = self.basic();
        let title = if basic.title.is_empty() {
            "<untitled>"
        } else {
            basic.title.as_str()
        };
        f.write_str(title)?;
        if !basic.detail.is_empty() {
            write!(f, ":{}", basic.detail)?;
        }
        for reason in self.reasons() {
            write!(f, " [{}:{}]", reason.name, reason.reason)?;
        }
        if let Some(correlation_id) = self.correlation_id() {
            write!(f, " (correlation_id={correlation_id})")?;
        }
        Ok(())
    }
}

/// Decodes the problem body of a failed response.
///
/// 400 and 409 carry validation reasons, every other status is a basic
/// problem.
pub fn decode_problem(status: StatusCode, body: &[u8]) -> Result<Problem, serde_json::Error> {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
            serde_json::from_slice::<ValidationProblem>(body).map(Problem::Validation)
        }
        _ => serde_json::from_slice::<BasicProblem>(body).map(Problem::Basic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_objects_decode_for_every_status() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::CONFLICT,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::UNAUTHORIZED,
        ] {
            decode_problem(status, b"{}").expect("empty problem should decode");
        }
    }

    #[test]
    fn status_selects_problem_shape() {
        let body = br#"{
            "type": "/problems/validation",
            "title": "Validation failed",
            "status": 400,
            "correlationId": "c0ffee",
            "reasons": [{"name": "thresholdType", "reason": "is required"}]
        }"#;

        let problem = decode_problem(StatusCode::BAD_REQUEST, body).expect("validation problem");
        assert_eq!(problem.reasons().len(), 1);
        assert_eq!(problem.correlation_id(), Some("c0ffee"));
        assert_eq!(
            problem.to_string(),
            "Validation failed [thresholdType:is required] (correlation_id=c0ffee)"
        );

        let problem = decode_problem(StatusCode::NOT_FOUND, body).expect("basic problem");
        assert!(matches!(problem, Problem::Basic(_)));
        assert!(problem.reasons().is_empty());
    }

    #[test]
    fn non_json_bodies_fail() {
        assert!(decode_problem(StatusCode::BAD_GATEWAY, b"upstream timeout").is_err());
        assert!(decode_problem(StatusCode::BAD_GATEWAY, b"").is_err());
    }
}
