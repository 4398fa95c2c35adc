use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// A single schema violation, addressed by its JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.reason)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|violation| violation.path.as_str())
            .collect()
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Schema checks for request bodies.
pub trait Validate {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        self.collect_violations("", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

impl<T: Validate> Validate for Option<T> {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        if let Some(value) = self {
            value.collect_violations(path, violations);
        }
    }
}

impl<T: Validate> Validate for [T] {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        for (index, item) in self.iter().enumerate() {
            item.collect_violations(&join(path, &index.to_string()), violations);
        }
    }
}

pub(crate) fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

pub(crate) fn push(violations: &mut Vec<Violation>, path: String, reason: impl Into<String>) {
    violations.push(Violation {
        path,
        reason: reason.into(),
    });
}

pub(crate) fn required<T>(
    value: Option<&T>,
    prefix: &str,
    field: &str,
    violations: &mut Vec<Violation>,
) -> bool {
    if value.is_none() {
        push(violations, join(prefix, field), "is required");
        return false;
    }
    true
}

pub(crate) fn int_in_range(
    value: Option<i32>,
    min: i32,
    max: i32,
    prefix: &str,
    field: &str,
    violations: &mut Vec<Violation>,
) {
    let Some(value) = value else {
        push(violations, join(prefix, field), "is required");
        return;
    };
    if value < min {
        push(
            violations,
            join(prefix, field),
            format!("should be greater than or equal to {min}"),
        );
    } else if value > max {
        push(
            violations,
            join(prefix, field),
            format!("should be less than or equal to {max}"),
        );
    }
}

pub(crate) fn one_of(
    value: &str,
    allowed: &[&str],
    prefix: &str,
    field: &str,
    violations: &mut Vec<Violation>,
) {
    if !allowed.contains(&value) {
        push(
            violations,
            join(prefix, field),
            format!("should be one of [{}]", allowed.join(" ")),
        );
    }
}

pub(crate) fn uuid_format(value: &str, prefix: &str, field: &str, violations: &mut Vec<Violation>) {
    if Uuid::parse_str(value).is_err() {
        push(violations, join(prefix, field), "must be of type uuid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_with_dots() {
        assert_eq!(join("", "thresholdType"), "thresholdType");
        assert_eq!(join("bandAlarms.0", "minFrequency"), "bandAlarms.0.minFrequency");
    }

    #[test]
    fn range_checks_report_bounds() {
        let mut violations = Vec::new();
        int_in_range(Some(4), 0, 3, "", "thresholdType", &mut violations);
        int_in_range(Some(0), 1, 2, "minFrequency", "valueType", &mut violations);
        int_in_range(None, 0, 4, "", "status", &mut violations);

        let error = ValidationError { violations };
        assert_eq!(
            error.paths(),
            vec!["thresholdType", "minFrequency.valueType", "status"]
        );
        assert_eq!(
            error.to_string(),
            "thresholdType should be less than or equal to 3; \
             minFrequency.valueType should be greater than or equal to 1; \
             status is required"
        );
    }
}
