//! Generic in-process document collection.

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_core::types::{FollowId, MediaId, NotificationId, PostId, UserId};
use reversevibe_entity::{Follow, Media, Notification, Post, User};

/// A record that can live in a [`Collection`].
pub trait Document: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Primary key type.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Primary key of this document.
    fn id(&self) -> Self::Id;

    /// Creation timestamp, used for newest-first ordering.
    fn created_at(&self) -> DateTime<Utc>;
}

macro_rules! impl_document {
    ($model:ty, $id:ty) => {
        impl Document for $model {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        }
    };
}

impl_document!(User, UserId);
impl_document!(Post, PostId);
impl_document!(Follow, FollowId);
impl_document!(Notification, NotificationId);
impl_document!(Media, MediaId);

/// A named set of documents keyed by id.
///
/// Every method touches at most one document under its shard lock, so
/// single-document operations are atomic. Nothing spans documents.
pub struct Collection<D: Document> {
    name: &'static str,
    documents: DashMap<D::Id, D>,
}

impl<D: Document> fmt::Debug for Collection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("len", &self.documents.len())
            .finish()
    }
}

impl<D: Document> Collection<D> {
    /// Creates an empty collection.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            documents: DashMap::new(),
        }
    }

    /// Collection name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Inserts or replaces a document and returns it.
    pub fn insert(&self, document: D) -> D {
        self.documents.insert(document.id(), document.clone());
        document
    }

    /// Fetches a document by id.
    pub fn get(&self, id: D::Id) -> Option<D> {
        self.documents.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns every matching document, newest first.
    pub fn find(&self, predicate: impl Fn(&D) -> bool) -> Vec<D> {
        let mut found: Vec<D> = self
            .documents
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|d| std::cmp::Reverse(d.created_at()));
        found
    }

    /// Applies `f` to a document in place and returns the updated copy.
    pub fn update(&self, id: D::Id, f: impl FnOnce(&mut D)) -> Option<D> {
        self.documents.get_mut(&id).map(|mut entry| {
            f(entry.value_mut());
            entry.value().clone()
        })
    }

    /// Overlays arbitrary JSON fields onto a document.
    ///
    /// The document is re-serialized, every key except `id` is replaced,
    /// and the result is deserialized back. Returns `Ok(None)` when no
    /// document has that id.
    pub fn patch(&self, id: D::Id, fields: &Map<String, Value>) -> AppResult<Option<D>> {
        let Some(mut entry) = self.documents.get_mut(&id) else {
            return Ok(None);
        };

        let mut value = serde_json::to_value(entry.value())?;
        if let Value::Object(map) = &mut value {
            for (key, field) in fields {
                if key != "id" {
                    map.insert(key.clone(), field.clone());
                }
            }
        }

        let patched: D = serde_json::from_value(value).map_err(|e| {
            AppError::validation(format!("{} validation failed: {e}", self.name))
        })?;
        *entry.value_mut() = patched.clone();
        Ok(Some(patched))
    }

    /// Removes a document and returns it.
    pub fn remove(&self, id: D::Id) -> Option<D> {
        self.documents.remove(&id).map(|(_, document)| document)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Removes every document.
    pub fn clear(&self) {
        self.documents.clear();
    }
}
