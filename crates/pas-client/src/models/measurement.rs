use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::ContentType;
use crate::api;

/// A measurement fed to the service to recompute the alarm status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub measurement_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub content_type: ContentType,
    pub data_point: Option<DataPoint>,
    pub spectrum: Option<Spectrum>,
    pub question_answers: Vec<String>,
    pub rate_of_change: Option<f64>,
    pub tags: Map<String, Value>,
}

impl Measurement {
    #[must_use]
    pub fn data_point(measurement_id: Uuid, created_at: DateTime<Utc>, point: DataPoint) -> Self {
        Self {
            measurement_id,
            created_at,
            content_type: ContentType::DataPoint,
            data_point: Some(point),
            spectrum: None,
            question_answers: Vec::new(),
            rate_of_change: None,
            tags: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub coordinate: Coordinate,
    pub x_unit: String,
    pub y_unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spectrum {
    pub x_unit: String,
    pub y_unit: String,
    pub speed: f64,
}

impl From<&Measurement> for api::UpdateAlarmStatusRequest {
    fn from(value: &Measurement) -> Self {
        Self {
            content_type: Some(value.content_type.as_str().to_string()),
            created_at: Some(value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            measurement_id: Some(value.measurement_id.to_string()),
            data_point: value.data_point.as_ref().map(|point| api::DataPoint {
                coordinate: Some(api::Coordinate {
                    x: Some(point.coordinate.x),
                    y: Some(point.coordinate.y),
                }),
                x_unit: Some(point.x_unit.clone()),
                y_unit: Some(point.y_unit.clone()),
            }),
            spectrum: value.spectrum.as_ref().map(|spectrum| api::Spectrum {
                x_unit: Some(spectrum.x_unit.clone()),
                y_unit: Some(spectrum.y_unit.clone()),
                speed: Some(spectrum.speed),
            }),
            question_answers: value.question_answers.clone(),
            rate_of_change: value.rate_of_change,
            tags: value.tags.clone(),
        }
    }
}
