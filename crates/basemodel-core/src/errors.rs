//! Error types for basemodel-core.
//!
//! The lifecycle operations themselves are total. Errors only come from the
//! edges where data enters or leaves the record: parsing an id supplied by a
//! persistence layer, and converting to or from a BSON document.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Text supplied as an id is not a 24-character hex `ObjectId`.
    #[error("Invalid object id '{value}': {source}")]
    InvalidId {
        value: String,
        #[source]
        source: bson::oid::Error,
    },

    /// Serializing a record into a BSON document failed.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    /// Deserializing a record from a BSON document failed.
    #[error("Failed to decode document: {0}")]
    Decode(#[from] bson::de::Error),
}
