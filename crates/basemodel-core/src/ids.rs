//! `ObjectId` helpers: generation, parsing, and the unset sentinel.
//!
//! Ids are 12 bytes: a 4-byte big-endian seconds timestamp, a 5-byte random
//! value fixed per process, and a 3-byte counter. Generation needs no
//! coordination between processes.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::errors::CoreError;

/// Hex rendering of an id that was never assigned.
pub const UNSET_ID_HEX: &str = "000000000000000000000000";

/// The all-zero id carried by a record before insert.
#[must_use]
pub fn unset_id() -> ObjectId {
    ObjectId::from_bytes([0; 12])
}

#[must_use]
pub fn is_unset(id: &ObjectId) -> bool {
    id.bytes() == [0; 12]
}

/// Generate a fresh id whose timestamp bytes carry `now`.
///
/// The process value and counter still come from the `bson` generator, so
/// two ids produced at the same instant remain distinct. Instants outside the
/// `u32` seconds range are clamped.
#[must_use]
pub fn generate_at(now: DateTime<Utc>) -> ObjectId {
    let mut bytes = ObjectId::new().bytes();
    let secs = u32::try_from(now.timestamp().clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    ObjectId::from_bytes(bytes)
}

/// Parse a 24-character hex id, e.g. one read back from storage.
///
/// # Errors
///
/// Returns `CoreError::InvalidId` when the text is not valid hex or not
/// exactly 24 characters long.
pub fn parse_id(value: &str) -> Result<ObjectId, CoreError> {
    ObjectId::parse_str(value).map_err(|source| CoreError::InvalidId {
        value: value.to_string(),
        source,
    })
}

/// Creation second embedded in an id.
#[must_use]
pub fn embedded_timestamp(id: &ObjectId) -> DateTime<Utc> {
    id.timestamp().to_chrono()
}
