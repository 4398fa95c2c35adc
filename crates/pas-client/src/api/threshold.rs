use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::validate::{Validate, Violation, int_in_range, join, one_of, push, required};

const HAL_ALARM_TYPES: &[&str] = &["GLOBAL", "FREQUENCY"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPointAlarmThresholdResponse {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub threshold_type: Option<i32>,
    #[serde(default)]
    pub overall: Option<Overall>,
    #[serde(default)]
    pub rate_of_change: Option<RateOfChange>,
    #[serde(default)]
    pub inspection: Option<Inspection>,
    #[serde(default)]
    pub full_scale: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band_alarms: Vec<BandAlarm>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hal_alarms: Vec<HalAlarm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPointAlarmThresholdRequest {
    pub threshold_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<Overall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_of_change: Option<RateOfChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection: Option<Inspection>,
    /// Left out when unset or zero; the service reads both as "no full scale".
    #[serde(default, skip_serializing_if = "is_unset_or_zero")]
    pub full_scale: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band_alarms: Vec<BandAlarm>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hal_alarms: Vec<HalAlarm>,
}

fn is_unset_or_zero(value: &Option<f64>) -> bool {
    value.is_none_or(|value| value == 0.0)
}

impl Validate for SetPointAlarmThresholdRequest {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        int_in_range(self.threshold_type, 0, 3, path, "thresholdType", violations);
        self.inspection
            .collect_violations(&join(path, "inspection"), violations);
        self.band_alarms
            .collect_violations(&join(path, "bandAlarms"), violations);
        self.hal_alarms
            .collect_violations(&join(path, "halAlarms"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overall {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_low: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOfChange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_low: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<InspectionChoice>,
}

impl Validate for Inspection {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        self.choices
            .collect_violations(&join(path, "choices"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionChoice {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub answer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instruction: String,
    #[serde(default)]
    pub status: Option<i32>,
}

impl Validate for InspectionChoice {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        int_in_range(self.status, 0, 4, path, "status", violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarm {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub min_frequency: Option<BandAlarmFrequency>,
    #[serde(default)]
    pub max_frequency: Option<BandAlarmFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_threshold: Option<BandAlarmOverallThreshold>,
}

impl Validate for BandAlarm {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        if required(self.min_frequency.as_ref(), path, "minFrequency", violations) {
            self.min_frequency
                .collect_violations(&join(path, "minFrequency"), violations);
        }
        if required(self.max_frequency.as_ref(), path, "maxFrequency", violations) {
            self.max_frequency
                .collect_violations(&join(path, "maxFrequency"), violations);
        }
        self.overall_threshold
            .collect_violations(&join(path, "overallThreshold"), violations);
    }
}

/// Frequency bound of a band. Shared by threshold and alarm status bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmFrequency {
    #[serde(default)]
    pub value_type: Option<i32>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl Validate for BandAlarmFrequency {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        required(self.value.as_ref(), path, "value", violations);
        int_in_range(self.value_type, 1, 2, path, "valueType", violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmOverallThreshold {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_alert: Option<BandAlarmThreshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_danger: Option<BandAlarmThreshold>,
}

impl Validate for BandAlarmOverallThreshold {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        self.upper_alert
            .collect_violations(&join(path, "upperAlert"), violations);
        self.upper_danger
            .collect_violations(&join(path, "upperDanger"), violations);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmThreshold {
    #[serde(default)]
    pub value_type: Option<i32>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl Validate for BandAlarmThreshold {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        required(self.value.as_ref(), path, "value", violations);
        int_in_range(self.value_type, 1, 3, path, "valueType", violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalAlarm {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<Bearing>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hal_alarm_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_alert: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_danger: Option<f64>,
}

impl Validate for HalAlarm {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        if !self.hal_alarm_type.is_empty() {
            one_of(
                &self.hal_alarm_type,
                HAL_ALARM_TYPES,
                path,
                "halAlarmType",
                violations,
            );
        }
        self.bearing
            .collect_violations(&join(path, "bearing"), violations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bearing {
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
}

impl Validate for Bearing {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        required(self.manufacturer.as_ref(), path, "manufacturer", violations);
        required(self.model_number.as_ref(), path, "modelNumber", violations);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_tolerates_missing_and_null_collections() {
        let response: GetPointAlarmThresholdResponse = serde_json::from_value(json!({
            "nodeId": "2a1b3c4d-0000-4000-8000-000000000001",
            "thresholdType": 1,
            "bandAlarms": null
        }))
        .expect("threshold response should decode");

        assert_eq!(response.threshold_type, Some(1));
        assert!(response.band_alarms.is_empty());
        assert!(response.hal_alarms.is_empty());
        assert!(response.overall.is_none());
    }

    #[test]
    fn request_always_serializes_collections_and_threshold_type() {
        let request = SetPointAlarmThresholdRequest {
            threshold_type: Some(0),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).expect("request should encode");

        assert_eq!(
            value,
            json!({"thresholdType": 0, "bandAlarms": [], "halAlarms": []})
        );
    }

    #[test]
    fn zero_full_scale_is_left_out() {
        let mut request = SetPointAlarmThresholdRequest {
            threshold_type: Some(1),
            full_scale: Some(0.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).expect("request should encode");
        assert!(value.get("fullScale").is_none());

        request.full_scale = Some(25.0);
        let value = serde_json::to_value(&request).expect("request should encode");
        assert_eq!(value["fullScale"], json!(25.0));
    }

    #[test]
    fn validation_reports_nested_paths() {
        let request = SetPointAlarmThresholdRequest {
            threshold_type: Some(5),
            inspection: Some(Inspection {
                choices: vec![InspectionChoice {
                    answer: "ok".to_string(),
                    instruction: String::new(),
                    status: None,
                }],
            }),
            band_alarms: vec![BandAlarm {
                label: "band".to_string(),
                min_frequency: Some(BandAlarmFrequency {
                    value_type: Some(0),
                    value: Some(10.0),
                }),
                max_frequency: None,
                overall_threshold: Some(BandAlarmOverallThreshold {
                    unit: "gE".to_string(),
                    upper_alert: Some(BandAlarmThreshold {
                        value_type: Some(1),
                        value: None,
                    }),
                    upper_danger: None,
                }),
            }],
            hal_alarms: vec![HalAlarm {
                label: "hal".to_string(),
                hal_alarm_type: "LOCAL".to_string(),
                bearing: Some(Bearing {
                    manufacturer: Some("SKF".to_string()),
                    model_number: None,
                }),
                ..Default::default()
            }],
            ..Default::default()
        };

        let error = request.validate().expect_err("request should be rejected");
        assert_eq!(
            error.paths(),
            vec![
                "thresholdType",
                "inspection.choices.0.status",
                "bandAlarms.0.minFrequency.valueType",
                "bandAlarms.0.maxFrequency",
                "bandAlarms.0.overallThreshold.upperAlert.value",
                "halAlarms.0.halAlarmType",
                "halAlarms.0.bearing.modelNumber",
            ]
        );
    }

    #[test]
    fn valid_request_passes() {
        let request = SetPointAlarmThresholdRequest {
            threshold_type: Some(2),
            overall: Some(Overall {
                unit: "mm/s".to_string(),
                outer_high: Some(7.1),
                ..Default::default()
            }),
            band_alarms: vec![BandAlarm {
                label: "1x".to_string(),
                min_frequency: Some(BandAlarmFrequency {
                    value_type: Some(2),
                    value: Some(0.8),
                }),
                max_frequency: Some(BandAlarmFrequency {
                    value_type: Some(2),
                    value: Some(1.2),
                }),
                overall_threshold: None,
            }],
            hal_alarms: vec![HalAlarm {
                label: "global".to_string(),
                hal_alarm_type: "GLOBAL".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(request.validate(), Ok(()));
    }
}
