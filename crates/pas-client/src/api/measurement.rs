use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;
use super::validate::{Validate, Violation, join, one_of, push, required, uuid_format};

const CONTENT_TYPES: &[&str] = &["DATA_POINT", "SPECTRUM", "QUESTION_ANSWERS"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlarmStatusRequest {
    pub content_type: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    pub measurement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_point: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<Spectrum>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub question_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_of_change: Option<f64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub tags: Map<String, Value>,
}

impl Validate for UpdateAlarmStatusRequest {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        match &self.content_type {
            Some(content_type) => {
                one_of(content_type, CONTENT_TYPES, path, "contentType", violations);
            }
            None => push(violations, join(path, "contentType"), "is required"),
        }
        if let Some(created_at) = &self.created_at {
            if DateTime::parse_from_rfc3339(created_at).is_err() {
                push(violations, join(path, "createdAt"), "must be of type date-time");
            }
        } else {
            push(violations, join(path, "createdAt"), "is required");
        }
        self.data_point
            .collect_violations(&join(path, "dataPoint"), violations);
        if let Some(measurement_id) = &self.measurement_id {
            uuid_format(measurement_id, path, "measurementId", violations);
        } else {
            push(violations, join(path, "measurementId"), "is required");
        }
        self.spectrum
            .collect_violations(&join(path, "spectrum"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub coordinate: Option<Coordinate>,
    pub x_unit: Option<String>,
    pub y_unit: Option<String>,
}

impl Validate for DataPoint {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        if required(self.coordinate.as_ref(), path, "coordinate", violations) {
            self.coordinate
                .collect_violations(&join(path, "coordinate"), violations);
        }
        required(self.x_unit.as_ref(), path, "xUnit", violations);
        required(self.y_unit.as_ref(), path, "yUnit", violations);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Validate for Coordinate {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        required(self.x.as_ref(), path, "x", violations);
        required(self.y.as_ref(), path, "y", violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spectrum {
    pub x_unit: Option<String>,
    pub y_unit: Option<String>,
    pub speed: Option<f64>,
}

impl Validate for Spectrum {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        required(self.speed.as_ref(), path, "speed", violations);
        required(self.x_unit.as_ref(), path, "xUnit", violations);
        required(self.y_unit.as_ref(), path, "yUnit", violations);
    }
}
