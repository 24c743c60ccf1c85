//! The lifecycle metadata record and the trait entities use to embed it.
//!
//! ```text
//! new ──insert──▶ inserted ──update──▶ updated ◀─┐
//!                    │                    │  └────┘ update
//!                    └──────delete────────┴──▶ deleted (delete refreshes)
//! ```
//!
//! Ordering is the caller's job: insert once before the first write, update
//! or delete only after that. Nothing here rejects misuse.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::ids;

/// Stored name of the id field.
pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";
/// Presence of this field marks a record as soft-deleted.
pub const DELETED_AT_FIELD: &str = "deleted_at";

/// Identity and audit timestamps for one stored record.
///
/// Optional timestamps are skipped when absent rather than written as null,
/// so "field exists" queries can separate live and soft-deleted records. An
/// unset id is skipped too, leaving assignment to the store.
///
/// Serde writes the id as 24 hex characters and timestamps as RFC 3339 text.
/// [`crate::document::to_document`] stores them as a native `ObjectId` and
/// BSON dates instead; decoding accepts either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LifecycleMetadata {
    /// 24 lowercase hex characters.
    #[serde(
        rename = "_id",
        default = "ids::unset_id",
        skip_serializing_if = "ids::is_unset",
        serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string",
        deserialize_with = "stored::deserialize_id"
    )]
    #[schemars(with = "String")]
    id: ObjectId,

    #[serde(default, deserialize_with = "stored::deserialize_timestamp")]
    #[schemars(with = "DateTime<Utc>")]
    created_at: DateTime<Utc>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "stored::deserialize_optional_timestamp"
    )]
    #[schemars(with = "Option<DateTime<Utc>>")]
    updated_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "stored::deserialize_optional_timestamp"
    )]
    #[schemars(with = "Option<DateTime<Utc>>")]
    deleted_at: Option<DateTime<Utc>>,
}

/// Decoders accepting both the text form and the native BSON form.
mod stored {
    use bson::{Bson, oid::ObjectId};
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize_id<'de, D>(deserializer: D) -> Result<ObjectId, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::ObjectId(id) => Ok(id),
            Bson::String(hex) => ObjectId::parse_str(&hex).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected an ObjectId or hex string, found {:?}",
                other.element_type()
            ))),
        }
    }

    pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        timestamp(Bson::deserialize(deserializer)?)
    }

    pub fn deserialize_optional_timestamp<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::Null => Ok(None),
            value => timestamp(value).map(Some),
        }
    }

    fn timestamp<E: Error>(value: Bson) -> Result<DateTime<Utc>, E> {
        match value {
            Bson::DateTime(at) => Ok(at.to_chrono()),
            Bson::String(text) => DateTime::parse_from_rfc3339(&text)
                .map(|at| at.with_timezone(&Utc))
                .map_err(E::custom),
            other => Err(E::custom(format!(
                "expected a date or RFC 3339 string, found {:?}",
                other.element_type()
            ))),
        }
    }
}

impl Default for LifecycleMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleMetadata {
    /// A record with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ids::unset_id(),
            created_at: DateTime::<Utc>::default(),
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Assign a fresh id and stamp `created_at`.
    ///
    /// Every call regenerates both values. Call exactly once per logical
    /// record, right before the first insert.
    pub fn apply_insert_metadata(&mut self) {
        self.apply_insert_metadata_with(&SystemClock);
    }

    pub fn apply_insert_metadata_with(&mut self, clock: &impl Clock) {
        let now = clock.now();
        self.id = ids::generate_at(now);
        self.created_at = now;
        tracing::trace!(id = %self.id, created_at = %now, "applied insert metadata");
    }

    /// Stamp `updated_at` with the current time.
    pub fn apply_update_metadata(&mut self) {
        self.apply_update_metadata_with(&SystemClock);
    }

    pub fn apply_update_metadata_with(&mut self, clock: &impl Clock) {
        let now = clock.now();
        self.updated_at = Some(now);
        tracing::trace!(id = %self.id, updated_at = %now, "applied update metadata");
    }

    /// Soft-delete: stamp `deleted_at`. Repeated calls refresh the stamp.
    pub fn apply_delete_metadata(&mut self) {
        self.apply_delete_metadata_with(&SystemClock);
    }

    pub fn apply_delete_metadata_with(&mut self, clock: &impl Clock) {
        let now = clock.now();
        if self.deleted_at.is_some() {
            tracing::debug!(id = %self.id, "refreshing deleted_at on already deleted record");
        }
        self.deleted_at = Some(now);
        tracing::trace!(id = %self.id, deleted_at = %now, "applied delete metadata");
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Hex form of the id; [`ids::UNSET_ID_HEX`] before insert.
    #[must_use]
    pub fn id(&self) -> String {
        self.id.to_hex()
    }

    #[must_use]
    pub const fn object_id(&self) -> ObjectId {
        self.id
    }

    /// Whether insert metadata has been applied (the id is not the zero value).
    #[must_use]
    pub fn has_id(&self) -> bool {
        !ids::is_unset(&self.id)
    }

    /// Creation time; the Unix epoch before insert.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Delegation for entities that embed a [`LifecycleMetadata`] field.
///
/// Implementors supply the two accessors (or use [`impl_lifecycle!`](crate::impl_lifecycle));
/// the lifecycle operations come for free.
pub trait Lifecycle {
    fn metadata(&self) -> &LifecycleMetadata;

    fn metadata_mut(&mut self) -> &mut LifecycleMetadata;

    fn apply_insert_metadata(&mut self) {
        self.metadata_mut().apply_insert_metadata();
    }

    fn apply_update_metadata(&mut self) {
        self.metadata_mut().apply_update_metadata();
    }

    fn apply_delete_metadata(&mut self) {
        self.metadata_mut().apply_delete_metadata();
    }

    fn is_deleted(&self) -> bool {
        self.metadata().is_deleted()
    }

    fn id(&self) -> String {
        self.metadata().id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.metadata().created_at()
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.metadata().updated_at()
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.metadata().deleted_at()
    }
}

/// Implement [`Lifecycle`] for an entity by naming its metadata field.
///
/// ```
/// use basemodel_core::{LifecycleMetadata, impl_lifecycle};
///
/// struct Product {
///     meta: LifecycleMetadata,
///     sku: String,
/// }
///
/// impl_lifecycle!(Product, meta);
/// ```
#[macro_export]
macro_rules! impl_lifecycle {
    ($ty:ty, $field:ident) => {
        impl $crate::Lifecycle for $ty {
            fn metadata(&self) -> &$crate::LifecycleMetadata {
                &self.$field
            }

            fn metadata_mut(&mut self) -> &mut $crate::LifecycleMetadata {
                &mut self.$field
            }
        }
    };
}
