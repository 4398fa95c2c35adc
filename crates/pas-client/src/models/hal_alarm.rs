use pas_proto::wire;
use serde::Serialize;

use super::{ConversionError, HalAlarmType, decode_proto};
use crate::api;

/// Health assessment level (HAL) alarm.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalAlarm {
    pub label: String,
    pub bearing: Option<Bearing>,
    pub hal_alarm_type: Option<HalAlarmType>,
    pub upper_alert: Option<f64>,
    pub upper_danger: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bearing {
    pub manufacturer: String,
    pub model_number: String,
}

impl HalAlarm {
    pub fn from_proto(buf: &[u8]) -> Result<Self, ConversionError> {
        decode_proto::<wire::HalAlarm>(buf, "hal alarm").map(Self::from)
    }
}

impl From<api::HalAlarm> for HalAlarm {
    fn from(value: api::HalAlarm) -> Self {
        Self {
            label: value.label,
            bearing: value.bearing.map(Bearing::from),
            hal_alarm_type: HalAlarmType::parse(&value.hal_alarm_type),
            upper_alert: value.upper_alert,
            upper_danger: value.upper_danger,
        }
    }
}

impl From<&HalAlarm> for api::HalAlarm {
    fn from(value: &HalAlarm) -> Self {
        Self {
            label: value.label.clone(),
            bearing: value.bearing.as_ref().map(api::Bearing::from),
            hal_alarm_type: value
                .hal_alarm_type
                .as_ref()
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
            upper_alert: value.upper_alert,
            upper_danger: value.upper_danger,
        }
    }
}

impl From<wire::HalAlarm> for HalAlarm {
    fn from(value: wire::HalAlarm) -> Self {
        Self {
            label: value.label,
            bearing: value.bearing.map(Bearing::from),
            hal_alarm_type: HalAlarmType::parse(&value.hal_alarm_type),
            upper_alert: value.upper_alert.map(|limit| limit.value),
            upper_danger: value.upper_danger.map(|limit| limit.value),
        }
    }
}

impl From<api::Bearing> for Bearing {
    fn from(value: api::Bearing) -> Self {
        Self {
            manufacturer: value.manufacturer.unwrap_or_default(),
            model_number: value.model_number.unwrap_or_default(),
        }
    }
}

impl From<&Bearing> for api::Bearing {
    fn from(value: &Bearing) -> Self {
        Self {
            manufacturer: Some(value.manufacturer.clone()),
            model_number: Some(value.model_number.clone()),
        }
    }
}

impl From<wire::Bearing> for Bearing {
    fn from(value: wire::Bearing) -> Self {
        Self {
            manufacturer: value.manufacturer,
            model_number: value.model_number,
        }
    }
}
