//! JSON request and response bodies of the PAS REST API.
//!
//! These mirror the service schema field for field, so almost everything the
//! service may leave out is an `Option`. Request bodies implement
//! [`Validate`] and are checked before they are sent.

mod alarm_status;
mod measurement;
mod operation;
mod threshold;
pub mod validate;

pub use alarm_status::{
    BandAlarmStatus, CalculatedOverall, ExternalAlarmStatus, GenericAlarmStatus,
    GetAlarmStatusResponse, HalAlarmStatus, SetExternalAlarmStatusRequest,
};
pub use measurement::{Coordinate, DataPoint, Spectrum, UpdateAlarmStatusRequest};
pub use operation::Operation;
pub use threshold::{
    BandAlarm, BandAlarmFrequency, BandAlarmOverallThreshold, BandAlarmThreshold, Bearing,
    GetPointAlarmThresholdResponse, HalAlarm, Inspection, InspectionChoice, Overall, RateOfChange,
    SetPointAlarmThresholdRequest,
};
pub use validate::{Validate, ValidationError, Violation};

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
