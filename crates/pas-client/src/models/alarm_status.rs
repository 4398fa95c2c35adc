use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{
    AlarmStatusType, BandAlarmFrequency, Bearing, ConversionError, datetime_from_millis,
    parse_optional_uuid,
};
use crate::api;

/// Current alarm state of a measurement point, broken down per alarm kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmStatus {
    pub status: AlarmStatusType,
    pub updated_at: DateTime<Utc>,
    pub overall: Option<GenericAlarmStatus>,
    pub rate_of_change: Option<GenericAlarmStatus>,
    pub inspection: Option<GenericAlarmStatus>,
    pub band: Vec<BandAlarmStatus>,
    pub hal: Vec<HalAlarmStatus>,
    pub external: Option<ExternalAlarmStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericAlarmStatus {
    pub triggering_measurement: Option<Uuid>,
    pub status: AlarmStatusType,
}

/// Status set by hand from outside the measurement pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAlarmStatus {
    pub status: AlarmStatusType,
    pub set_by: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandAlarmStatus {
    pub triggering_measurement: Option<Uuid>,
    pub status: AlarmStatusType,
    pub label: String,
    pub min_frequency: BandAlarmFrequency,
    pub max_frequency: BandAlarmFrequency,
    pub calculated_overall: Option<BandAlarmStatusCalculatedOverall>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandAlarmStatusCalculatedOverall {
    pub unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalAlarmStatus {
    pub triggering_measurement: Option<Uuid>,
    pub status: AlarmStatusType,
    pub label: String,
    pub bearing: Option<Bearing>,
    pub hal_index: Option<f64>,
    pub fault_frequency: Option<f64>,
    pub rpm_factor: Option<f64>,
    pub number_of_harmonics_used: Option<i64>,
    pub error_description: Option<String>,
}

fn status_or_default(status: Option<i32>) -> AlarmStatusType {
    status.map(AlarmStatusType::from).unwrap_or_default()
}

impl TryFrom<api::GetAlarmStatusResponse> for AlarmStatus {
    type Error = ConversionError;

    fn try_from(value: api::GetAlarmStatusResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            status: status_or_default(value.status),
            updated_at: datetime_from_millis(
                value.updated_at,
                "GetAlarmStatusResponse",
                "updatedAt",
            )?,
            overall: value
                .overall_alarm
                .map(|alarm| generic_from_api(alarm, "overallAlarm"))
                .transpose()?,
            rate_of_change: value
                .rate_of_change_alarm
                .map(|alarm| generic_from_api(alarm, "rateOfChangeAlarm"))
                .transpose()?,
            inspection: value
                .inspection_alarm
                .map(|alarm| generic_from_api(alarm, "inspectionAlarm"))
                .transpose()?,
            band: value
                .band_alarms
                .into_iter()
                .map(BandAlarmStatus::try_from)
                .collect::<Result<_, _>>()?,
            hal: value
                .hal_alarms
                .into_iter()
                .map(HalAlarmStatus::try_from)
                .collect::<Result<_, _>>()?,
            external: value
                .external_alarm
                .map(ExternalAlarmStatus::try_from)
                .transpose()?,
        })
    }
}

fn generic_from_api(
    value: api::GenericAlarmStatus,
    field: &'static str,
) -> Result<GenericAlarmStatus, ConversionError> {
    Ok(GenericAlarmStatus {
        triggering_measurement: parse_optional_uuid(
            value.triggering_measurement.as_deref(),
            field,
            "triggeringMeasurement",
        )?,
        status: status_or_default(value.status),
    })
}

impl TryFrom<api::ExternalAlarmStatus> for ExternalAlarmStatus {
    type Error = ConversionError;

    fn try_from(value: api::ExternalAlarmStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            status: status_or_default(value.status),
            set_by: parse_optional_uuid(value.set_by.as_deref(), "externalAlarm", "setBy")?,
        })
    }
}

impl From<&ExternalAlarmStatus> for api::SetExternalAlarmStatusRequest {
    fn from(value: &ExternalAlarmStatus) -> Self {
        Self {
            status: Some(value.status.into()),
            set_by: value.set_by.map(|id| id.to_string()),
        }
    }
}

impl TryFrom<api::BandAlarmStatus> for BandAlarmStatus {
    type Error = ConversionError;

    fn try_from(value: api::BandAlarmStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            triggering_measurement: parse_optional_uuid(
                value.triggering_measurement.as_deref(),
                "bandAlarms",
                "triggeringMeasurement",
            )?,
            status: status_or_default(value.status),
            label: value.label,
            min_frequency: value.min_frequency.map(Into::into).unwrap_or_default(),
            max_frequency: value.max_frequency.map(Into::into).unwrap_or_default(),
            calculated_overall: value.calculated_overall.map(|overall| {
                BandAlarmStatusCalculatedOverall {
                    unit: overall.unit,
                    value: overall.value.unwrap_or_default(),
                }
            }),
        })
    }
}

impl TryFrom<api::HalAlarmStatus> for HalAlarmStatus {
    type Error = ConversionError;

    fn try_from(value: api::HalAlarmStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            triggering_measurement: parse_optional_uuid(
                value.triggering_measurement.as_deref(),
                "halAlarms",
                "triggeringMeasurement",
            )?,
            status: status_or_default(value.status),
            label: value.label.unwrap_or_default(),
            bearing: value.bearing.map(Bearing::from),
            hal_index: value.hal_index,
            fault_frequency: value.fault_frequency,
            rpm_factor: value.rpm_factor,
            number_of_harmonics_used: value.number_of_harmonics_used,
            error_description: value.error_description,
        })
    }
}
