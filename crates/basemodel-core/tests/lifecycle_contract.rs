//! Lifecycle contract tests against the system clock, JSON layout, and the
//! generated JSON Schema.

use std::thread::sleep;
use std::time::Duration;

use basemodel_core::document::{from_document, to_document};
use basemodel_core::ids::UNSET_ID_HEX;
use basemodel_core::{
    CREATED_AT_FIELD, DELETED_AT_FIELD, ID_FIELD, Lifecycle, LifecycleMetadata, ObjectId,
    UPDATED_AT_FIELD, impl_lifecycle,
};
use bson::doc;
use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct TestUser {
    #[serde(flatten)]
    meta: LifecycleMetadata,
    name: String,
    email: String,
}

impl_lifecycle!(TestUser, meta);

fn user() -> TestUser {
    TestUser {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        ..TestUser::default()
    }
}

fn assert_recent(ts: chrono::DateTime<Utc>) {
    let age = Utc::now() - ts;
    assert!(
        age >= TimeDelta::zero() && age < TimeDelta::seconds(1),
        "timestamp {ts} is not within one second of now"
    );
}

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn fresh_entity_reads_as_unset() {
    let user = user();
    assert_eq!(user.id(), UNSET_ID_HEX);
    assert_eq!(user.created_at().timestamp(), 0);
    assert_eq!(user.updated_at(), None);
    assert_eq!(user.deleted_at(), None);
    assert!(!user.is_deleted());
}

#[test]
fn insert_assigns_recent_metadata() {
    let mut user = user();
    user.apply_insert_metadata();

    assert_ne!(user.id(), UNSET_ID_HEX);
    assert_eq!(user.id().len(), 24);
    assert_eq!(user.id(), user.meta.object_id().to_hex());
    assert_recent(user.created_at());
    assert_eq!(user.updated_at(), None);
    assert_eq!(user.deleted_at(), None);
}

#[test]
fn update_after_insert_is_later_and_keeps_identity() {
    let mut user = user();
    user.apply_insert_metadata();
    let id = user.id();
    let created_at = user.created_at();

    sleep(Duration::from_millis(10));
    user.apply_update_metadata();

    let updated_at = user.updated_at().expect("updated_at should be set");
    assert_recent(updated_at);
    assert!(updated_at > created_at);
    assert_eq!(user.id(), id);
    assert_eq!(user.created_at(), created_at);
    assert_eq!(user.deleted_at(), None);
}

#[test]
fn delete_marks_entity_deleted() {
    let mut user = user();
    user.apply_insert_metadata();
    let created_at = user.created_at();

    user.apply_delete_metadata();

    assert!(user.is_deleted());
    assert_recent(user.deleted_at().expect("deleted_at should be set"));
    assert_eq!(user.created_at(), created_at);
    assert_eq!(user.updated_at(), None);
}

#[test]
fn full_lifecycle() {
    let mut user = user();
    user.apply_insert_metadata();
    let original_id = user.id();
    let original_created_at = user.created_at();
    assert!(!user.is_deleted());

    sleep(Duration::from_millis(10));
    user.apply_update_metadata();
    let first_update = user.updated_at().unwrap();
    assert!(!user.is_deleted());

    sleep(Duration::from_millis(10));
    user.apply_update_metadata();
    let second_update = user.updated_at().unwrap();
    assert!(!user.is_deleted());

    sleep(Duration::from_millis(10));
    user.apply_delete_metadata();

    assert_eq!(user.id(), original_id);
    assert_eq!(user.created_at(), original_created_at);
    assert!(second_update > first_update);
    assert!(user.deleted_at().unwrap() > second_update);
    assert!(user.is_deleted());
}

#[test]
fn json_layout_omits_absent_fields() {
    let mut user = user();
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("_id").is_none());
    assert!(json.get("created_at").is_some());

    user.apply_insert_metadata();
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["_id"], serde_json::json!(user.id()));
    assert_eq!(json["name"], "John Doe");
    assert!(json.get("updated_at").is_none());
    assert!(json.get("deleted_at").is_none());

    user.apply_update_metadata();
    user.apply_delete_metadata();
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("updated_at").is_some());
    assert!(json.get("deleted_at").is_some());
}

#[test]
fn flattened_entity_json_roundtrip() {
    let mut user = user();
    user.apply_insert_metadata();
    user.apply_update_metadata();

    let json = serde_json::to_string(&user).unwrap();
    let recovered: TestUser = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, user);
}

#[test]
fn entity_survives_bson_document_roundtrip() {
    let mut user = user();
    user.apply_insert_metadata();
    user.apply_delete_metadata();

    let document = to_document(&user).unwrap();
    assert!(document.contains_key(DELETED_AT_FIELD));
    assert!(!document.contains_key(UPDATED_AT_FIELD));
    assert_eq!(
        document.get_object_id(ID_FIELD).unwrap(),
        user.meta.object_id()
    );
    assert_eq!(
        document.get_datetime(CREATED_AT_FIELD).unwrap().timestamp_millis(),
        user.created_at().timestamp_millis()
    );

    let recovered: TestUser = from_document(document).unwrap();
    assert_eq!(recovered.id(), user.id());
    assert_eq!(recovered.name, user.name);
    assert_eq!(
        recovered.created_at().timestamp_millis(),
        user.created_at().timestamp_millis()
    );
    assert_eq!(
        recovered.deleted_at().map(|at| at.timestamp_millis()),
        user.deleted_at().map(|at| at.timestamp_millis())
    );
    assert_eq!(recovered.updated_at(), None);
}

#[test]
fn entity_decodes_from_stored_document() {
    let id = ObjectId::new();
    let now = bson::DateTime::now();
    let document = doc! {
        "_id": id,
        "created_at": now,
        "deleted_at": now,
        "name": "Jane Roe",
        "email": "jane@example.com",
    };

    let user: TestUser = from_document(document).unwrap();
    assert_eq!(user.id(), id.to_hex());
    assert_eq!(user.created_at(), now.to_chrono());
    assert_eq!(user.deleted_at(), Some(now.to_chrono()));
    assert_eq!(user.updated_at(), None);
    assert!(user.is_deleted());
    assert_eq!(user.name, "Jane Roe");
}

#[test]
fn json_id_is_plain_hex_and_extended_json_still_decodes() {
    let mut user = user();
    user.apply_insert_metadata();
    let hex = user.id();

    let json = serde_json::to_value(&user).unwrap();
    assert!(json["_id"].is_string());

    let legacy = serde_json::json!({
        "_id": { "$oid": hex },
        "created_at": json["created_at"],
        "name": "John Doe",
        "email": "john@example.com",
    });
    let recovered: TestUser = serde_json::from_value(legacy).unwrap();
    assert_eq!(recovered, user);
}

#[test]
fn serialized_records_match_schema() {
    let schema = serde_json::to_value(schema_for!(LifecycleMetadata)).unwrap();

    let mut meta = LifecycleMetadata::new();
    let mut snapshots = vec![meta];
    meta.apply_insert_metadata();
    snapshots.push(meta);
    meta.apply_update_metadata();
    snapshots.push(meta);
    meta.apply_delete_metadata();
    snapshots.push(meta);

    for snapshot in snapshots {
        let instance = serde_json::to_value(snapshot).unwrap();
        let errors = validate_against_schema(&schema, &instance);
        assert!(errors.is_empty(), "schema validation failed: {errors:?}");
    }
}
