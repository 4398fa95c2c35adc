use thiserror::Error;

/// Failure to translate between the wire, protobuf and public models.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("{message}.{field} is not a valid uuid: {value}")]
    InvalidUuid {
        message: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("{message}.{field} is out of range for a timestamp: {value}")]
    InvalidTimestamp {
        message: &'static str,
        field: &'static str,
        value: i64,
    },
    #[error("{message}.{field} has invalid enum value: {value}")]
    InvalidEnum {
        message: &'static str,
        field: &'static str,
        value: i32,
    },
    #[error("invalid content type: {value}")]
    InvalidContentType { value: String },
    #[error("decoding {message} failed: {source}")]
    Proto {
        message: &'static str,
        #[source]
        source: prost::DecodeError,
    },
    #[error("decoding {kind} threshold {index} failed: {source}")]
    ThresholdPayload {
        kind: &'static str,
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },
    #[error("failed to decode event: {source}")]
    Event {
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown event type: {event_type}")]
    UnknownEventType { event_type: String },
}
