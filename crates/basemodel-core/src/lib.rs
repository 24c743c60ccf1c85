//! # basemodel-core
//!
//! Lifecycle metadata for document entities.
//!
//! This crate provides the identity and audit substrate that domain entities
//! embed instead of re-implementing it per collection:
//! - [`LifecycleMetadata`]: an `ObjectId` plus created/updated/deleted timestamps
//! - [`Lifecycle`]: delegation trait for entities that embed the record
//! - [`Clock`] implementations for wall-clock and deterministic time
//! - Id helpers (generation, parsing, the unset sentinel)
//! - BSON document encoding that keeps the field-presence contract
//!
//! # Usage
//!
//! ```
//! use basemodel_core::{Lifecycle, LifecycleMetadata, impl_lifecycle};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct User {
//!     #[serde(flatten)]
//!     meta: LifecycleMetadata,
//!     name: String,
//! }
//!
//! impl_lifecycle!(User, meta);
//!
//! let mut user = User { name: "Ada".into(), ..User::default() };
//! user.apply_insert_metadata();
//! assert!(!user.is_deleted());
//! user.apply_delete_metadata();
//! assert!(user.is_deleted());
//! ```

pub mod clock;
pub mod document;
pub mod errors;
pub mod ids;
pub mod lifecycle;

pub use bson::oid::ObjectId;
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::CoreError;
pub use lifecycle::{
    CREATED_AT_FIELD, DELETED_AT_FIELD, ID_FIELD, Lifecycle, LifecycleMetadata, UPDATED_AT_FIELD,
};
