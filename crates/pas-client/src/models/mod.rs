//! Public models and their translations to and from the wire formats.

mod alarm_status;
mod band_alarm;
mod error;
mod events;
mod hal_alarm;
mod measurement;
mod patch;
mod threshold;
mod types;

pub use alarm_status::{
    AlarmStatus, BandAlarmStatus, BandAlarmStatusCalculatedOverall, ExternalAlarmStatus,
    GenericAlarmStatus, HalAlarmStatus,
};
pub use band_alarm::{
    BandAlarm, BandAlarmFrequency, BandAlarmOverallThreshold, BandAlarmThreshold,
};
pub use error::ConversionError;
pub use events::{
    AlarmStatusEvent, EVENT_ATTRIBUTE_AGGREGATE, EVENT_ATTRIBUTE_EVENT_TYPE,
    EVENT_TYPE_ALARM_STATUS, EVENT_TYPE_THRESHOLD, PasEvent, ThresholdEvent,
};
pub use hal_alarm::{Bearing, HalAlarm};
pub use measurement::{Coordinate, DataPoint, Measurement, Spectrum};
pub use patch::{Patch, PatchOp, PatchOperation};
pub use threshold::{Inspection, InspectionChoice, Overall, RateOfChange, Threshold};
pub use types::{
    AlarmStatusType, BandAlarmFrequencyValueType, BandAlarmThresholdType, ContentType,
    HalAlarmType, ThresholdType,
};

use chrono::{DateTime, Utc};
use prost::Message;
use uuid::Uuid;

/// Parses an optional UUID string. Missing and empty strings mean "unset".
pub(crate) fn parse_optional_uuid(
    value: Option<&str>,
    message: &'static str,
    field: &'static str,
) -> Result<Option<Uuid>, ConversionError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| ConversionError::InvalidUuid {
                message,
                field,
                value: raw.to_string(),
            }),
    }
}

pub(crate) fn datetime_from_millis(
    millis: i64,
    message: &'static str,
    field: &'static str,
) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::from_timestamp_millis(millis).ok_or(ConversionError::InvalidTimestamp {
        message,
        field,
        value: millis,
    })
}

/// Decodes an embedded protobuf payload. An empty buffer is the default message.
pub(crate) fn decode_proto<M>(buf: &[u8], message: &'static str) -> Result<M, ConversionError>
where
    M: Message + Default,
{
    M::decode(buf).map_err(|source| ConversionError::Proto { message, source })
}
