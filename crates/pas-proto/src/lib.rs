//! Point alarm status protobuf wire contracts.
//!
//! The service embeds serialized `pas` messages inside its event envelopes.
//! This crate only owns the wire types; the richer public models and the
//! conversions into them live in `pas-client`.
//!
//! # Field numbers
//!
//! The message and field names follow the upstream `pas` schema, but the tag
//! numbers in `proto/pas/v2/pas.proto` are not taken from it and are not
//! authoritative. Sync them with the upstream `.proto` before decoding
//! payloads produced by a live deployment; a mismatched tag decodes as a
//! missing or wrong field rather than failing.

pub mod wire;

pub use prost::{DecodeError, Message};
