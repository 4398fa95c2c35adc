use pas_proto::wire;
use serde::Serialize;
use uuid::Uuid;

use super::{
    AlarmStatusType, BandAlarm, ConversionError, HalAlarm, ThresholdType, decode_proto,
    parse_optional_uuid,
};
use crate::api;

/// Alarm thresholds configured on a measurement point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub node_id: Option<Uuid>,
    pub threshold_type: ThresholdType,
    pub overall: Option<Overall>,
    pub rate_of_change: Option<RateOfChange>,
    pub inspection: Option<Inspection>,
    pub full_scale: Option<f64>,
    pub band_alarms: Vec<BandAlarm>,
    pub hal_alarms: Vec<HalAlarm>,
}

impl TryFrom<api::GetPointAlarmThresholdResponse> for Threshold {
    type Error = ConversionError;

    fn try_from(value: api::GetPointAlarmThresholdResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            node_id: parse_optional_uuid(
                value.node_id.as_deref(),
                "GetPointAlarmThresholdResponse",
                "nodeId",
            )?,
            threshold_type: value
                .threshold_type
                .map(ThresholdType::from)
                .unwrap_or_default(),
            overall: value.overall.map(Overall::from),
            rate_of_change: value.rate_of_change.map(RateOfChange::from),
            inspection: value.inspection.map(Inspection::from),
            full_scale: value.full_scale,
            band_alarms: value.band_alarms.into_iter().map(BandAlarm::from).collect(),
            hal_alarms: value.hal_alarms.into_iter().map(HalAlarm::from).collect(),
        })
    }
}

impl From<&Threshold> for api::SetPointAlarmThresholdRequest {
    fn from(value: &Threshold) -> Self {
        Self {
            threshold_type: Some(value.threshold_type.into()),
            overall: value.overall.as_ref().map(api::Overall::from),
            rate_of_change: value.rate_of_change.as_ref().map(api::RateOfChange::from),
            inspection: value.inspection.as_ref().map(api::Inspection::from),
            full_scale: value.full_scale,
            band_alarms: value.band_alarms.iter().map(api::BandAlarm::from).collect(),
            hal_alarms: value.hal_alarms.iter().map(api::HalAlarm::from).collect(),
        }
    }
}

/// Window thresholds on the overall level. `None` limits are not configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overall {
    pub unit: String,
    pub outer_high: Option<f64>,
    pub inner_high: Option<f64>,
    pub inner_low: Option<f64>,
    pub outer_low: Option<f64>,
}

impl Overall {
    pub fn from_proto(buf: &[u8]) -> Result<Self, ConversionError> {
        decode_proto::<wire::Overall>(buf, "overall alarm").map(Self::from)
    }
}

impl From<api::Overall> for Overall {
    fn from(value: api::Overall) -> Self {
        Self {
            unit: value.unit,
            outer_high: value.outer_high,
            inner_high: value.inner_high,
            inner_low: value.inner_low,
            outer_low: value.outer_low,
        }
    }
}

impl From<&Overall> for api::Overall {
    fn from(value: &Overall) -> Self {
        Self {
            unit: value.unit.clone(),
            outer_high: value.outer_high,
            inner_high: value.inner_high,
            inner_low: value.inner_low,
            outer_low: value.outer_low,
        }
    }
}

impl From<wire::Overall> for Overall {
    fn from(value: wire::Overall) -> Self {
        Self {
            unit: value.unit,
            outer_high: value.outer_high.map(|limit| limit.value),
            inner_high: value.inner_high.map(|limit| limit.value),
            inner_low: value.inner_low.map(|limit| limit.value),
            outer_low: value.outer_low.map(|limit| limit.value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOfChange {
    pub unit: String,
    pub outer_high: Option<f64>,
    pub inner_high: Option<f64>,
    pub inner_low: Option<f64>,
    pub outer_low: Option<f64>,
}

impl RateOfChange {
    pub fn from_proto(buf: &[u8]) -> Result<Self, ConversionError> {
        decode_proto::<wire::RateOfChange>(buf, "rate of change alarm").map(Self::from)
    }
}

impl From<api::RateOfChange> for RateOfChange {
    fn from(value: api::RateOfChange) -> Self {
        Self {
            unit: value.unit,
            outer_high: value.outer_high,
            inner_high: value.inner_high,
            inner_low: value.inner_low,
            outer_low: value.outer_low,
        }
    }
}

impl From<&RateOfChange> for api::RateOfChange {
    fn from(value: &RateOfChange) -> Self {
        Self {
            unit: value.unit.clone(),
            outer_high: value.outer_high,
            inner_high: value.inner_high,
            inner_low: value.inner_low,
            outer_low: value.outer_low,
        }
    }
}

impl From<wire::RateOfChange> for RateOfChange {
    fn from(value: wire::RateOfChange) -> Self {
        Self {
            unit: value.unit,
            outer_high: value.outer_high.map(|limit| limit.value),
            inner_high: value.inner_high.map(|limit| limit.value),
            inner_low: value.inner_low.map(|limit| limit.value),
            outer_low: value.outer_low.map(|limit| limit.value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inspection {
    pub choices: Vec<InspectionChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectionChoice {
    pub answer: String,
    pub instruction: String,
    pub status: AlarmStatusType,
}

impl Inspection {
    pub fn from_proto(buf: &[u8]) -> Result<Self, ConversionError> {
        decode_proto::<wire::Inspection>(buf, "inspection alarm").map(Self::from)
    }
}

impl From<api::Inspection> for Inspection {
    fn from(value: api::Inspection) -> Self {
        Self {
            choices: value
                .choices
                .into_iter()
                .map(|choice| InspectionChoice {
                    answer: choice.answer,
                    instruction: choice.instruction,
                    status: choice.status.map(AlarmStatusType::from).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

impl From<&Inspection> for api::Inspection {
    fn from(value: &Inspection) -> Self {
        Self {
            choices: value
                .choices
                .iter()
                .map(|choice| api::InspectionChoice {
                    answer: choice.answer.clone(),
                    instruction: choice.instruction.clone(),
                    status: Some(choice.status.into()),
                })
                .collect(),
        }
    }
}

impl From<wire::Inspection> for Inspection {
    fn from(value: wire::Inspection) -> Self {
        Self {
            choices: value
                .choices
                .into_iter()
                .map(|choice| InspectionChoice {
                    answer: choice.answer,
                    instruction: choice.instruction,
                    status: AlarmStatusType::from_proto(choice.status),
                })
                .collect(),
        }
    }
}
