use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::threshold::{BandAlarmFrequency, Bearing};
use super::validate::{Validate, Violation, int_in_range, uuid_format};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAlarmStatusResponse {
    #[serde(default)]
    pub status: Option<i32>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub overall_alarm: Option<GenericAlarmStatus>,
    #[serde(default)]
    pub rate_of_change_alarm: Option<GenericAlarmStatus>,
    #[serde(default)]
    pub inspection_alarm: Option<GenericAlarmStatus>,
    #[serde(default)]
    pub external_alarm: Option<ExternalAlarmStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band_alarms: Vec<BandAlarmStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hal_alarms: Vec<HalAlarmStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericAlarmStatus {
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub triggering_measurement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAlarmStatus {
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub set_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmStatus {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub triggering_measurement: Option<String>,
    #[serde(default)]
    pub min_frequency: Option<BandAlarmFrequency>,
    #[serde(default)]
    pub max_frequency: Option<BandAlarmFrequency>,
    #[serde(default)]
    pub calculated_overall: Option<CalculatedOverall>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedOverall {
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalAlarmStatus {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub triggering_measurement: Option<String>,
    #[serde(default)]
    pub bearing: Option<Bearing>,
    #[serde(default)]
    pub hal_index: Option<f64>,
    #[serde(default)]
    pub fault_frequency: Option<f64>,
    #[serde(default)]
    pub rpm_factor: Option<f64>,
    #[serde(default)]
    pub number_of_harmonics_used: Option<i64>,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetExternalAlarmStatusRequest {
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_by: Option<String>,
}

impl Validate for SetExternalAlarmStatusRequest {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        if let Some(set_by) = &self.set_by {
            uuid_format(set_by, path, "setBy", violations);
        }
        int_in_range(self.status, 0, 4, path, "status", violations);
    }
}
