//! BSON document conversion for records and the entities embedding them.
//!
//! Entities flatten [`LifecycleMetadata`](crate::LifecycleMetadata) into their
//! own struct, so the lifecycle fields land at the top level of the document.
//! There `_id` is stored as a native `ObjectId` and the timestamps as BSON
//! dates. BSON dates hold milliseconds; finer precision is dropped.

use bson::{Document, oid::ObjectId};
use chrono::DateTime;
use serde::{Serialize, de::DeserializeOwned};

use crate::errors::CoreError;
use crate::lifecycle::{CREATED_AT_FIELD, DELETED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};

/// Encode a value (usually an entity) into a BSON document.
///
/// # Errors
///
/// Returns `CoreError::Encode` if the value does not serialize to a document
/// (for example, a bare scalar).
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, CoreError> {
    let mut document = bson::to_document(value)?;
    store_natively(&mut document);
    Ok(document)
}

/// Decode a BSON document produced by the store back into a value.
///
/// Missing lifecycle fields decode to their unset values.
///
/// # Errors
///
/// Returns `CoreError::Decode` when a field has the wrong type or a required
/// entity field is missing.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, CoreError> {
    Ok(bson::from_document(document)?)
}

fn store_natively(document: &mut Document) {
    let id = document
        .get_str(ID_FIELD)
        .ok()
        .and_then(|hex| ObjectId::parse_str(hex).ok());
    if let Some(id) = id {
        document.insert(ID_FIELD, id);
    }

    for field in [CREATED_AT_FIELD, UPDATED_AT_FIELD, DELETED_AT_FIELD] {
        let at = document
            .get_str(field)
            .ok()
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok());
        if let Some(at) = at {
            document.insert(field, bson::DateTime::from_chrono(at));
        }
    }
}
