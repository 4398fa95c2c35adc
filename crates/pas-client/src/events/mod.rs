//! Event-sourcing envelopes published by the PAS backend.
//!
//! Threshold parts travel as base64-encoded `pas` protobuf messages. Alarm
//! status events are plain JSON. The public views of these envelopes are
//! [`crate::models::ThresholdEvent`] and [`crate::models::AlarmStatusEvent`].

pub mod encoding;

use serde::{Deserialize, Serialize};

use crate::api::null_as_default;

/// Fields shared by every event in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEvent {
    #[serde(default)]
    pub aggregate_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub sequence_id: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Milliseconds since the Unix epoch. Informational only, so values that
    /// are not a number decode as 0.
    #[serde(default, deserialize_with = "encoding::lenient_millis")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPointAlarmThresholdEvent {
    #[serde(flatten)]
    pub base: BaseEvent,
    #[serde(default)]
    pub threshold_type: i32,
    #[serde(default, with = "encoding::bytes")]
    pub inspection: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_full_scale: Option<f64>,
    #[serde(
        default,
        with = "encoding::bytes_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub threshold_band_alarms: Vec<Vec<u8>>,
    #[serde(
        default,
        with = "encoding::bytes_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub threshold_hal_alarms: Vec<Vec<u8>>,
    #[serde(default, with = "encoding::bytes")]
    pub threshold_overall: Vec<u8>,
    #[serde(default, with = "encoding::bytes", skip_serializing_if = "Vec::is_empty")]
    pub threshold_rate_of_change: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointAlarmStatusEvent {
    #[serde(flatten)]
    pub base: BaseEvent,
    #[serde(default)]
    pub alarm_status: i32,
    #[serde(default)]
    pub alarms_changed: bool,
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band_alarms: Vec<BandAlarmStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hal_alarms: Vec<HalAlarmStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_alarm: Option<GenericAlarm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_alarm: Option<ExternalAlarm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_alarm: Option<GenericAlarm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_of_change_alarm: Option<GenericAlarm>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericAlarm {
    #[serde(default)]
    pub triggering_measurement: String,
    #[serde(default)]
    pub status: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAlarm {
    #[serde(default)]
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    #[serde(default)]
    pub value_type: i32,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedOverall {
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmStatus {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub min_frequency: Frequency,
    #[serde(default)]
    pub max_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_overall: Option<CalculatedOverall>,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub triggering_measurement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bearing {
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalAlarmStatus {
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub triggering_measurement: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<Bearing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hal_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_harmonics_used: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}
