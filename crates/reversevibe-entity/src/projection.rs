//! Field projections over serialized documents.
//!
//! Handlers return documents as JSON, keeping only a named subset of fields
//! or replacing a reference with a projected copy of the referenced user.

use serde_json::{Map, Value};

/// Fields shown in user listings and profile lookups.
pub const USER_PROFILE: &[&str] = &[
    "username",
    "email",
    "role",
    "profilePicture",
    "bio",
    "createdAt",
];

/// Fields shown for the author of a post or the sender of a notification.
pub const USER_AUTHOR: &[&str] = &["username", "email", "profilePicture"];

/// Fields shown in follower and following lists.
pub const USER_CONTACT: &[&str] = &["username", "email", "phone", "profilePicture", "bio"];

/// Keeps `id` plus the listed fields of a JSON object. Non-objects pass through.
pub fn select(document: &Value, fields: &[&str]) -> Value {
    let Value::Object(source) = document else {
        return document.clone();
    };

    let mut projected = Map::new();
    if let Some(id) = source.get("id") {
        projected.insert("id".to_string(), id.clone());
    }
    for field in fields {
        if let Some(value) = source.get(*field) {
            projected.insert((*field).to_string(), value.clone());
        }
    }
    Value::Object(projected)
}

/// Removes the listed fields from a JSON object.
pub fn exclude(document: &Value, fields: &[&str]) -> Value {
    let mut document = document.clone();
    if let Value::Object(map) = &mut document {
        for field in fields {
            map.remove(*field);
        }
    }
    document
}
