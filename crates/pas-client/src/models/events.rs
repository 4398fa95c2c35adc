use serde::Serialize;
use uuid::Uuid;

use super::{
    AlarmStatus, AlarmStatusType, BandAlarm, BandAlarmFrequency, BandAlarmFrequencyValueType,
    BandAlarmStatus, BandAlarmStatusCalculatedOverall, Bearing, ConversionError,
    ExternalAlarmStatus, GenericAlarmStatus, HalAlarm, HalAlarmStatus, Inspection, Overall,
    RateOfChange, Threshold, ThresholdType, datetime_from_millis, parse_optional_uuid,
};
use crate::events;

/// Message attribute carrying the event type name.
pub const EVENT_ATTRIBUTE_EVENT_TYPE: &str = "SKF.Hierarchy.EventType";
/// Message attribute carrying the aggregate (node) id.
pub const EVENT_ATTRIBUTE_AGGREGATE: &str = "SKF.Hierarchy.Aggregate";

pub const EVENT_TYPE_THRESHOLD: &str = "SetPointAlarmThresholdEvent";
pub const EVENT_TYPE_ALARM_STATUS: &str = "PointAlarmStatusEvent";

/// Thresholds of a node were replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdEvent {
    pub aggregate_id: Uuid,
    pub user_id: Option<Uuid>,
    pub threshold: Threshold,
}

/// The alarm status of a node was recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmStatusEvent {
    pub aggregate_id: Uuid,
    pub user_id: Option<Uuid>,
    /// Whether the recomputation changed any alarm.
    pub changed: bool,
    pub alarm_status: AlarmStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "event")]
pub enum PasEvent {
    #[serde(rename = "SetPointAlarmThresholdEvent")]
    Threshold(ThresholdEvent),
    #[serde(rename = "PointAlarmStatusEvent")]
    AlarmStatus(AlarmStatusEvent),
}

impl PasEvent {
    /// Decodes an event body given the value of its
    /// [`EVENT_ATTRIBUTE_EVENT_TYPE`] attribute.
    pub fn decode(event_type: &str, buf: &[u8]) -> Result<Self, ConversionError> {
        match event_type {
            EVENT_TYPE_THRESHOLD => ThresholdEvent::decode(buf).map(Self::Threshold),
            EVENT_TYPE_ALARM_STATUS => AlarmStatusEvent::decode(buf).map(Self::AlarmStatus),
            other => Err(ConversionError::UnknownEventType {
                event_type: other.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            Self::Threshold(event) => event.aggregate_id,
            Self::AlarmStatus(event) => event.aggregate_id,
        }
    }
}

fn decode_envelope<T>(buf: &[u8]) -> Result<T, ConversionError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    serde_json::from_slice(buf).map_err(|source| ConversionError::Event { source })
}

fn base_ids(
    base: &events::BaseEvent,
    message: &'static str,
) -> Result<(Uuid, Option<Uuid>), ConversionError> {
    let aggregate_id = Uuid::parse_str(base.aggregate_id.trim()).map_err(|_| {
        ConversionError::InvalidUuid {
            message,
            field: "aggregateId",
            value: base.aggregate_id.clone(),
        }
    })?;
    let user_id = parse_optional_uuid(Some(base.user_id.as_str()), message, "userId")?;
    Ok((aggregate_id, user_id))
}

fn non_empty(buf: &[u8]) -> Option<&[u8]> {
    (!buf.is_empty()).then_some(buf)
}

impl ThresholdEvent {
    pub fn decode(buf: &[u8]) -> Result<Self, ConversionError> {
        let envelope: events::SetPointAlarmThresholdEvent = decode_envelope(buf)?;
        let (aggregate_id, user_id) = base_ids(&envelope.base, EVENT_TYPE_THRESHOLD)?;

        let band_alarms = envelope
            .threshold_band_alarms
            .iter()
            .enumerate()
            .map(|(index, payload)| {
                BandAlarm::from_proto(payload).map_err(|source| ConversionError::ThresholdPayload {
                    kind: "band alarm",
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let hal_alarms = envelope
            .threshold_hal_alarms
            .iter()
            .enumerate()
            .map(|(index, payload)| {
                HalAlarm::from_proto(payload).map_err(|source| ConversionError::ThresholdPayload {
                    kind: "HAL alarm",
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let threshold = Threshold {
            node_id: Some(aggregate_id),
            threshold_type: ThresholdType::from(envelope.threshold_type),
            overall: non_empty(&envelope.threshold_overall)
                .map(Overall::from_proto)
                .transpose()?,
            rate_of_change: non_empty(&envelope.threshold_rate_of_change)
                .map(RateOfChange::from_proto)
                .transpose()?,
            inspection: non_empty(&envelope.inspection)
                .map(Inspection::from_proto)
                .transpose()?,
            full_scale: envelope.threshold_full_scale,
            band_alarms,
            hal_alarms,
        };

        Ok(Self {
            aggregate_id,
            user_id,
            threshold,
        })
    }
}

impl AlarmStatusEvent {
    pub fn decode(buf: &[u8]) -> Result<Self, ConversionError> {
        let envelope: events::PointAlarmStatusEvent = decode_envelope(buf)?;
        let (aggregate_id, user_id) = base_ids(&envelope.base, EVENT_TYPE_ALARM_STATUS)?;

        let alarm_status = AlarmStatus {
            status: AlarmStatusType::from(envelope.alarm_status),
            updated_at: datetime_from_millis(
                envelope.updated_at,
                EVENT_TYPE_ALARM_STATUS,
                "updatedAt",
            )?,
            overall: envelope
                .overall_alarm
                .map(|alarm| generic_from_event(alarm, "overallAlarm"))
                .transpose()?,
            rate_of_change: envelope
                .rate_of_change_alarm
                .map(|alarm| generic_from_event(alarm, "rateOfChangeAlarm"))
                .transpose()?,
            inspection: envelope
                .inspection_alarm
                .map(|alarm| generic_from_event(alarm, "inspectionAlarm"))
                .transpose()?,
            band: envelope
                .band_alarms
                .into_iter()
                .map(BandAlarmStatus::try_from)
                .collect::<Result<_, _>>()?,
            hal: envelope
                .hal_alarms
                .into_iter()
                .map(HalAlarmStatus::try_from)
                .collect::<Result<_, _>>()?,
            external: envelope
                .external_alarm
                .map(ExternalAlarmStatus::try_from)
                .transpose()?,
        };

        Ok(Self {
            aggregate_id,
            user_id,
            changed: envelope.alarms_changed,
            alarm_status,
        })
    }
}

fn generic_from_event(
    value: events::GenericAlarm,
    field: &'static str,
) -> Result<GenericAlarmStatus, ConversionError> {
    Ok(GenericAlarmStatus {
        triggering_measurement: parse_optional_uuid(
            Some(value.triggering_measurement.as_str()),
            field,
            "triggeringMeasurement",
        )?,
        status: AlarmStatusType::from(value.status),
    })
}

impl TryFrom<events::ExternalAlarm> for ExternalAlarmStatus {
    type Error = ConversionError;

    fn try_from(value: events::ExternalAlarm) -> Result<Self, Self::Error> {
        Ok(Self {
            status: AlarmStatusType::from(value.status),
            set_by: parse_optional_uuid(value.set_by.as_deref(), "externalAlarm", "setBy")?,
        })
    }
}

impl From<events::Frequency> for BandAlarmFrequency {
    fn from(value: events::Frequency) -> Self {
        Self {
            value_type: BandAlarmFrequencyValueType::from(value.value_type),
            value: value.value,
        }
    }
}

impl TryFrom<events::BandAlarmStatus> for BandAlarmStatus {
    type Error = ConversionError;

    fn try_from(value: events::BandAlarmStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            triggering_measurement: parse_optional_uuid(
                Some(value.triggering_measurement.as_str()),
                "bandAlarms",
                "triggeringMeasurement",
            )?,
            status: AlarmStatusType::from(value.status),
            label: value.label,
            min_frequency: value.min_frequency.into(),
            max_frequency: value.max_frequency.into(),
            calculated_overall: value.calculated_overall.map(|overall| {
                BandAlarmStatusCalculatedOverall {
                    unit: overall.unit,
                    value: overall.value,
                }
            }),
        })
    }
}

impl TryFrom<events::HalAlarmStatus> for HalAlarmStatus {
    type Error = ConversionError;

    fn try_from(value: events::HalAlarmStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            triggering_measurement: parse_optional_uuid(
                Some(value.triggering_measurement.as_str()),
                "halAlarms",
                "triggeringMeasurement",
            )?,
            status: AlarmStatusType::from(value.status),
            label: value.label,
            bearing: value.bearing.map(|bearing| Bearing {
                manufacturer: bearing.manufacturer,
                model_number: bearing.model_number,
            }),
            hal_index: value.hal_index,
            fault_frequency: value.fault_frequency,
            rpm_factor: value.rpm_factor,
            number_of_harmonics_used: value.number_of_harmonics_used,
            error_description: value.error_description,
        })
    }
}
