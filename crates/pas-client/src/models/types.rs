use std::fmt;
use std::str::FromStr;

use pas_proto::wire;
use serde::{Serialize, Serializer};

use super::ConversionError;

/// Severity of an alarm, ordered from "not configured" to "danger".
///
/// Values the client does not know are kept in `Unknown` so they survive a
/// read-modify-write cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatusType {
    #[default]
    NotConfigured,
    NoData,
    Good,
    Alert,
    Danger,
    Unknown(i32),
}

impl From<i32> for AlarmStatusType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::NotConfigured,
            1 => Self::NoData,
            2 => Self::Good,
            3 => Self::Alert,
            4 => Self::Danger,
            other => Self::Unknown(other),
        }
    }
}

impl From<AlarmStatusType> for i32 {
    fn from(value: AlarmStatusType) -> Self {
        match value {
            AlarmStatusType::NotConfigured => 0,
            AlarmStatusType::NoData => 1,
            AlarmStatusType::Good => 2,
            AlarmStatusType::Alert => 3,
            AlarmStatusType::Danger => 4,
            AlarmStatusType::Unknown(other) => other,
        }
    }
}

impl From<wire::AlarmStatus> for AlarmStatusType {
    fn from(value: wire::AlarmStatus) -> Self {
        match value {
            wire::AlarmStatus::NotConfigured => Self::NotConfigured,
            wire::AlarmStatus::NoData => Self::NoData,
            wire::AlarmStatus::Good => Self::Good,
            wire::AlarmStatus::Alert => Self::Alert,
            wire::AlarmStatus::Danger => Self::Danger,
        }
    }
}

impl TryFrom<AlarmStatusType> for wire::AlarmStatus {
    type Error = ConversionError;

    fn try_from(value: AlarmStatusType) -> Result<Self, Self::Error> {
        match value {
            AlarmStatusType::NotConfigured => Ok(Self::NotConfigured),
            AlarmStatusType::NoData => Ok(Self::NoData),
            AlarmStatusType::Good => Ok(Self::Good),
            AlarmStatusType::Alert => Ok(Self::Alert),
            AlarmStatusType::Danger => Ok(Self::Danger),
            AlarmStatusType::Unknown(value) => Err(ConversionError::InvalidEnum {
                message: "AlarmStatus",
                field: "status",
                value,
            }),
        }
    }
}

impl AlarmStatusType {
    /// Maps a raw protobuf `pas.AlarmStatus` value.
    #[must_use]
    pub fn from_proto(value: i32) -> Self {
        wire::AlarmStatus::try_from(value).map_or(Self::Unknown(value), Self::from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdType {
    #[default]
    None,
    OverallInWindow,
    OverallOutOfWindow,
    Inspection,
    Unknown(i32),
}

impl From<i32> for ThresholdType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::OverallInWindow,
            2 => Self::OverallOutOfWindow,
            3 => Self::Inspection,
            other => Self::Unknown(other),
        }
    }
}

impl From<ThresholdType> for i32 {
    fn from(value: ThresholdType) -> Self {
        match value {
            ThresholdType::None => 0,
            ThresholdType::OverallInWindow => 1,
            ThresholdType::OverallOutOfWindow => 2,
            ThresholdType::Inspection => 3,
            ThresholdType::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandAlarmFrequencyValueType {
    #[default]
    Unspecified,
    Fixed,
    SpeedMultiple,
    Unknown(i32),
}

impl From<i32> for BandAlarmFrequencyValueType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Unspecified,
            1 => Self::Fixed,
            2 => Self::SpeedMultiple,
            other => Self::Unknown(other),
        }
    }
}

impl From<BandAlarmFrequencyValueType> for i32 {
    fn from(value: BandAlarmFrequencyValueType) -> Self {
        match value {
            BandAlarmFrequencyValueType::Unspecified => 0,
            BandAlarmFrequencyValueType::Fixed => 1,
            BandAlarmFrequencyValueType::SpeedMultiple => 2,
            BandAlarmFrequencyValueType::Unknown(other) => other,
        }
    }
}

impl From<wire::frequency::ValueType> for BandAlarmFrequencyValueType {
    fn from(value: wire::frequency::ValueType) -> Self {
        match value {
            wire::frequency::ValueType::Unknown => Self::Unspecified,
            wire::frequency::ValueType::Fixed => Self::Fixed,
            wire::frequency::ValueType::SpeedMultiple => Self::SpeedMultiple,
        }
    }
}

impl TryFrom<BandAlarmFrequencyValueType> for wire::frequency::ValueType {
    type Error = ConversionError;

    fn try_from(value: BandAlarmFrequencyValueType) -> Result<Self, Self::Error> {
        match value {
            BandAlarmFrequencyValueType::Unspecified => Ok(Self::Unknown),
            BandAlarmFrequencyValueType::Fixed => Ok(Self::Fixed),
            BandAlarmFrequencyValueType::SpeedMultiple => Ok(Self::SpeedMultiple),
            BandAlarmFrequencyValueType::Unknown(value) => Err(ConversionError::InvalidEnum {
                message: "Frequency",
                field: "value_type",
                value,
            }),
        }
    }
}

impl BandAlarmFrequencyValueType {
    /// Maps a raw protobuf `pas.Frequency.ValueType` value.
    #[must_use]
    pub fn from_proto(value: i32) -> Self {
        wire::frequency::ValueType::try_from(value).map_or(Self::Unknown(value), Self::from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandAlarmThresholdType {
    #[default]
    Unspecified,
    Absolute,
    RelativeFullscale,
    Unknown(i32),
}

impl From<i32> for BandAlarmThresholdType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Unspecified,
            1 => Self::Absolute,
            2 => Self::RelativeFullscale,
            other => Self::Unknown(other),
        }
    }
}

impl From<BandAlarmThresholdType> for i32 {
    fn from(value: BandAlarmThresholdType) -> Self {
        match value {
            BandAlarmThresholdType::Unspecified => 0,
            BandAlarmThresholdType::Absolute => 1,
            BandAlarmThresholdType::RelativeFullscale => 2,
            BandAlarmThresholdType::Unknown(other) => other,
        }
    }
}

impl From<wire::threshold_value::ValueType> for BandAlarmThresholdType {
    fn from(value: wire::threshold_value::ValueType) -> Self {
        match value {
            wire::threshold_value::ValueType::Unknown => Self::Unspecified,
            wire::threshold_value::ValueType::Absolute => Self::Absolute,
            wire::threshold_value::ValueType::RelativeFullscale => Self::RelativeFullscale,
        }
    }
}

impl TryFrom<BandAlarmThresholdType> for wire::threshold_value::ValueType {
    type Error = ConversionError;

    fn try_from(value: BandAlarmThresholdType) -> Result<Self, Self::Error> {
        match value {
            BandAlarmThresholdType::Unspecified => Ok(Self::Unknown),
            BandAlarmThresholdType::Absolute => Ok(Self::Absolute),
            BandAlarmThresholdType::RelativeFullscale => Ok(Self::RelativeFullscale),
            BandAlarmThresholdType::Unknown(value) => Err(ConversionError::InvalidEnum {
                message: "ThresholdValue",
                field: "value_type",
                value,
            }),
        }
    }
}

impl BandAlarmThresholdType {
    /// Maps a raw protobuf `pas.ThresholdValue.ValueType` value.
    #[must_use]
    pub fn from_proto(value: i32) -> Self {
        wire::threshold_value::ValueType::try_from(value).map_or(Self::Unknown(value), Self::from)
    }
}

/// How a HAL alarm picks its frequencies. Coded as a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HalAlarmType {
    Global,
    FaultFrequency,
    Other(String),
}

impl HalAlarmType {
    /// Reads the wire string. The empty string means "not set".
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "GLOBAL" => Some(Self::Global),
            "FREQUENCY" => Some(Self::FaultFrequency),
            other => Some(Self::Other(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Global => "GLOBAL",
            Self::FaultFrequency => "FREQUENCY",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for HalAlarmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HalAlarmType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Kind of measurement submitted to update an alarm status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    #[default]
    DataPoint,
    Spectrum,
    QuestionAnswers,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataPoint => "DATA_POINT",
            Self::Spectrum => "SPECTRUM",
            Self::QuestionAnswers => "QUESTION_ANSWERS",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ConversionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DATA_POINT" => Ok(Self::DataPoint),
            "SPECTRUM" => Ok(Self::Spectrum),
            "QUESTION_ANSWERS" => Ok(Self::QuestionAnswers),
            other => Err(ConversionError::InvalidContentType {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_enums_keep_unknown_values() {
        assert_eq!(AlarmStatusType::from(3), AlarmStatusType::Alert);
        assert_eq!(i32::from(AlarmStatusType::from(17)), 17);
        assert_eq!(ThresholdType::from(-1), ThresholdType::Unknown(-1));
        assert_eq!(i32::from(ThresholdType::Inspection), 3);
        assert_eq!(
            BandAlarmThresholdType::from(3),
            BandAlarmThresholdType::Unknown(3)
        );
    }

    #[test]
    fn proto_enums_map_by_name() {
        assert_eq!(AlarmStatusType::from_proto(4), AlarmStatusType::Danger);
        assert_eq!(AlarmStatusType::from_proto(12), AlarmStatusType::Unknown(12));
        assert_eq!(
            BandAlarmFrequencyValueType::from_proto(0),
            BandAlarmFrequencyValueType::Unspecified
        );
        assert_eq!(
            BandAlarmThresholdType::from_proto(2),
            BandAlarmThresholdType::RelativeFullscale
        );

        assert_eq!(
            wire::AlarmStatus::try_from(AlarmStatusType::NoData).ok(),
            Some(wire::AlarmStatus::NoData)
        );
        assert_eq!(
            wire::frequency::ValueType::try_from(BandAlarmFrequencyValueType::SpeedMultiple).ok(),
            Some(wire::frequency::ValueType::SpeedMultiple)
        );
        assert!(matches!(
            wire::threshold_value::ValueType::try_from(BandAlarmThresholdType::Unknown(9)),
            Err(ConversionError::InvalidEnum {
                message: "ThresholdValue",
                field: "value_type",
                value: 9,
            })
        ));
    }

    #[test]
    fn hal_alarm_type_treats_empty_as_unset() {
        assert_eq!(HalAlarmType::parse(""), None);
        assert_eq!(HalAlarmType::parse("GLOBAL"), Some(HalAlarmType::Global));
        assert_eq!(
            HalAlarmType::parse("FREQUENCY"),
            Some(HalAlarmType::FaultFrequency)
        );
        let other = HalAlarmType::parse("BEARING").expect("non-empty type is kept");
        assert_eq!(other.as_str(), "BEARING");
    }

    #[test]
    fn content_type_parses_wire_names() {
        assert_eq!("SPECTRUM".parse::<ContentType>().ok(), Some(ContentType::Spectrum));
        assert_eq!(ContentType::QuestionAnswers.to_string(), "QUESTION_ANSWERS");
        assert!("spectrum".parse::<ContentType>().is_err());
    }
}
