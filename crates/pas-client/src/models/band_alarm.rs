use pas_proto::wire;
use serde::Serialize;

use super::{BandAlarmFrequencyValueType, BandAlarmThresholdType, ConversionError, decode_proto};
use crate::api;

/// Alarm on the energy inside a frequency band of a spectrum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarm {
    pub label: String,
    pub min_frequency: BandAlarmFrequency,
    pub max_frequency: BandAlarmFrequency,
    pub overall_threshold: Option<BandAlarmOverallThreshold>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmFrequency {
    pub value_type: BandAlarmFrequencyValueType,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmOverallThreshold {
    pub unit: String,
    pub upper_alert: Option<BandAlarmThreshold>,
    pub upper_danger: Option<BandAlarmThreshold>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmThreshold {
    pub value_type: BandAlarmThresholdType,
    pub value: f64,
}

impl BandAlarm {
    pub fn from_proto(buf: &[u8]) -> Result<Self, ConversionError> {
        decode_proto::<wire::BandAlarm>(buf, "band alarm").map(Self::from)
    }
}

impl From<api::BandAlarm> for BandAlarm {
    fn from(value: api::BandAlarm) -> Self {
        Self {
            label: value.label,
            min_frequency: value.min_frequency.map(Into::into).unwrap_or_default(),
            max_frequency: value.max_frequency.map(Into::into).unwrap_or_default(),
            overall_threshold: value.overall_threshold.map(Into::into),
        }
    }
}

impl From<&BandAlarm> for api::BandAlarm {
    fn from(value: &BandAlarm) -> Self {
        Self {
            label: value.label.clone(),
            min_frequency: Some(value.min_frequency.into()),
            max_frequency: Some(value.max_frequency.into()),
            overall_threshold: value.overall_threshold.as_ref().map(Into::into),
        }
    }
}

impl From<wire::BandAlarm> for BandAlarm {
    fn from(value: wire::BandAlarm) -> Self {
        Self {
            label: value.label,
            min_frequency: value.min_frequency.map(Into::into).unwrap_or_default(),
            max_frequency: value.max_frequency.map(Into::into).unwrap_or_default(),
            overall_threshold: value.overall_threshold.map(Into::into),
        }
    }
}

impl From<api::BandAlarmFrequency> for BandAlarmFrequency {
    fn from(value: api::BandAlarmFrequency) -> Self {
        Self {
            value_type: value.value_type.map(Into::into).unwrap_or_default(),
            value: value.value.unwrap_or_default(),
        }
    }
}

impl From<BandAlarmFrequency> for api::BandAlarmFrequency {
    fn from(value: BandAlarmFrequency) -> Self {
        Self {
            value_type: Some(value.value_type.into()),
            value: Some(value.value),
        }
    }
}

impl From<wire::Frequency> for BandAlarmFrequency {
    fn from(value: wire::Frequency) -> Self {
        Self {
            value_type: BandAlarmFrequencyValueType::from_proto(value.value_type),
            value: value.value.map(|value| value.value).unwrap_or_default(),
        }
    }
}

impl From<api::BandAlarmOverallThreshold> for BandAlarmOverallThreshold {
    fn from(value: api::BandAlarmOverallThreshold) -> Self {
        Self {
            unit: value.unit,
            upper_alert: value.upper_alert.map(Into::into),
            upper_danger: value.upper_danger.map(Into::into),
        }
    }
}

impl From<&BandAlarmOverallThreshold> for api::BandAlarmOverallThreshold {
    fn from(value: &BandAlarmOverallThreshold) -> Self {
        Self {
            unit: value.unit.clone(),
            upper_alert: value.upper_alert.map(Into::into),
            upper_danger: value.upper_danger.map(Into::into),
        }
    }
}

impl From<wire::BandAlarmOverallThreshold> for BandAlarmOverallThreshold {
    fn from(value: wire::BandAlarmOverallThreshold) -> Self {
        Self {
            unit: value.unit,
            upper_alert: value.upper_alert.map(Into::into),
            upper_danger: value.upper_danger.map(Into::into),
        }
    }
}

impl From<api::BandAlarmThreshold> for BandAlarmThreshold {
    fn from(value: api::BandAlarmThreshold) -> Self {
        Self {
            value_type: value.value_type.map(Into::into).unwrap_or_default(),
            value: value.value.unwrap_or_default(),
        }
    }
}

impl From<BandAlarmThreshold> for api::BandAlarmThreshold {
    fn from(value: BandAlarmThreshold) -> Self {
        Self {
            value_type: Some(value.value_type.into()),
            value: Some(value.value),
        }
    }
}

impl From<wire::ThresholdValue> for BandAlarmThreshold {
    fn from(value: wire::ThresholdValue) -> Self {
        Self {
            value_type: BandAlarmThresholdType::from_proto(value.value_type),
            value: value.value.map(|value| value.value).unwrap_or_default(),
        }
    }
}
