//! Hand-maintained prost types for the `pas` protobuf package.
//!
//! Tags match `proto/pas/v2/pas.proto`, which must itself be kept in sync
//! with the upstream schema (see the crate docs). Enumeration fields are
//! stored as raw `i32` the way prost-build emits them, so unknown values
//! survive decoding.

use prost::{Enumeration, Message};

/// Nullable double. A missing `DoubleObject` means "not configured", which is
/// different from a configured zero.
#[derive(Clone, Copy, PartialEq, Message)]
pub struct DoubleObject {
    #[prost(double, tag = "1")]
    pub value: f64,
}

impl DoubleObject {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum AlarmStatus {
    NotConfigured = 0,
    NoData = 1,
    Good = 2,
    Alert = 3,
    Danger = 4,
}

#[derive(Clone, PartialEq, Message)]
pub struct Overall {
    #[prost(string, tag = "1")]
    pub unit: String,
    #[prost(message, optional, tag = "2")]
    pub outer_high: Option<DoubleObject>,
    #[prost(message, optional, tag = "3")]
    pub inner_high: Option<DoubleObject>,
    #[prost(message, optional, tag = "4")]
    pub inner_low: Option<DoubleObject>,
    #[prost(message, optional, tag = "5")]
    pub outer_low: Option<DoubleObject>,
}

#[derive(Clone, PartialEq, Message)]
pub struct RateOfChange {
    #[prost(string, tag = "1")]
    pub unit: String,
    #[prost(message, optional, tag = "2")]
    pub outer_high: Option<DoubleObject>,
    #[prost(message, optional, tag = "3")]
    pub inner_high: Option<DoubleObject>,
    #[prost(message, optional, tag = "4")]
    pub inner_low: Option<DoubleObject>,
    #[prost(message, optional, tag = "5")]
    pub outer_low: Option<DoubleObject>,
}

#[derive(Clone, PartialEq, Message)]
pub struct InspectionChoice {
    #[prost(string, tag = "1")]
    pub answer: String,
    #[prost(string, tag = "2")]
    pub instruction: String,
    #[prost(enumeration = "AlarmStatus", tag = "3")]
    pub status: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct Inspection {
    #[prost(message, repeated, tag = "1")]
    pub choices: Vec<InspectionChoice>,
}

pub mod frequency {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum ValueType {
        Unknown = 0,
        Fixed = 1,
        SpeedMultiple = 2,
    }
}

#[derive(Clone, PartialEq, Message)]
pub struct Frequency {
    #[prost(enumeration = "frequency::ValueType", tag = "1")]
    pub value_type: i32,
    #[prost(message, optional, tag = "2")]
    pub value: Option<DoubleObject>,
}

pub mod threshold_value {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum ValueType {
        Unknown = 0,
        Absolute = 1,
        RelativeFullscale = 2,
    }
}

#[derive(Clone, PartialEq, Message)]
pub struct ThresholdValue {
    #[prost(enumeration = "threshold_value::ValueType", tag = "1")]
    pub value_type: i32,
    #[prost(message, optional, tag = "2")]
    pub value: Option<DoubleObject>,
}

#[derive(Clone, PartialEq, Message)]
pub struct BandAlarmOverallThreshold {
    #[prost(string, tag = "1")]
    pub unit: String,
    #[prost(message, optional, tag = "2")]
    pub upper_alert: Option<ThresholdValue>,
    #[prost(message, optional, tag = "3")]
    pub upper_danger: Option<ThresholdValue>,
}

#[derive(Clone, PartialEq, Message)]
pub struct BandAlarm {
    #[prost(string, tag = "1")]
    pub label: String,
    #[prost(message, optional, tag = "2")]
    pub min_frequency: Option<Frequency>,
    #[prost(message, optional, tag = "3")]
    pub max_frequency: Option<Frequency>,
    #[prost(message, optional, tag = "4")]
    pub overall_threshold: Option<BandAlarmOverallThreshold>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Bearing {
    #[prost(string, tag = "1")]
    pub manufacturer: String,
    #[prost(string, tag = "2")]
    pub model_number: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct HalAlarm {
    #[prost(string, tag = "1")]
    pub label: String,
    #[prost(message, optional, tag = "2")]
    pub bearing: Option<Bearing>,
    #[prost(string, tag = "3")]
    pub hal_alarm_type: String,
    #[prost(message, optional, tag = "4")]
    pub upper_alert: Option<DoubleObject>,
    #[prost(message, optional, tag = "5")]
    pub upper_danger: Option<DoubleObject>,
}
