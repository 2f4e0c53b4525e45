//! Document store abstraction.
//!
//! Handlers never talk to a driver directly: they receive a [`Database`]
//! built once at startup and ask it for a named [`Collection`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::RecordId;
use crate::errors::AppError;

/// A JSON document. Documents read from the store carry their id under `_id`.
pub type Document = Map<String, Value>;

/// Key under which a document's identifier is exposed.
pub const ID_FIELD: &str = "_id";

/// Exact string equality on one top-level field.
#[derive(Debug, Clone, Copy)]
pub struct FieldFilter<'a> {
    pub field: &'a str,
    pub value: &'a str,
}

impl<'a> FieldFilter<'a> {
    pub fn eq(field: &'a str, value: &'a str) -> Self {
        Self { field, value }
    }
}

/// Result of a full-document replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Operations a document database must provide. Each call is one round-trip
/// and is never retried.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<RecordId, AppError>;

    async fn find(
        &self,
        collection: &str,
        filter: Option<FieldFilter<'_>>,
    ) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, id: RecordId)
        -> Result<Option<Document>, AppError>;

    /// Overwrite the whole document. `modified` is 0 when the replacement
    /// equals what is stored.
    async fn replace_one(
        &self,
        collection: &str,
        id: RecordId,
        document: Document,
    ) -> Result<UpdateOutcome, AppError>;

    /// Set top-level fields on the document and return the result. Fields not
    /// in `set` are kept; a null in `set` stores null.
    async fn find_one_and_update(
        &self,
        collection: &str,
        id: RecordId,
        set: Document,
    ) -> Result<Option<Document>, AppError>;

    /// Returns the number of documents removed.
    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, AppError>;
}

/// Shared handle to the document store.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn collection(&self, name: &'static str) -> Collection {
        Collection {
            store: Arc::clone(&self.store),
            name,
        }
    }
}

/// A named collection with typed helpers over [`DocumentStore`].
#[derive(Clone)]
pub struct Collection {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
}

impl Collection {
    pub async fn insert_one<T: Serialize>(&self, record: &T) -> Result<RecordId, AppError> {
        self.store.insert_one(self.name, to_document(record)?).await
    }

    pub async fn find<T: DeserializeOwned>(
        &self,
        filter: Option<FieldFilter<'_>>,
    ) -> Result<Vec<T>, AppError> {
        self.store
            .find(self.name, filter)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn find_one<T: DeserializeOwned>(&self, id: RecordId) -> Result<Option<T>, AppError> {
        self.store
            .find_one(self.name, id)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn replace_one<T: Serialize>(
        &self,
        id: RecordId,
        record: &T,
    ) -> Result<UpdateOutcome, AppError> {
        self.store
            .replace_one(self.name, id, to_document(record)?)
            .await
    }

    pub async fn find_one_and_update<T: DeserializeOwned>(
        &self,
        id: RecordId,
        set: Document,
    ) -> Result<Option<T>, AppError> {
        self.store
            .find_one_and_update(self.name, id, set)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn delete_one(&self, id: RecordId) -> Result<u64, AppError> {
        self.store.delete_one(self.name, id).await
    }
}

/// Serialize a record into a document, dropping any `_id` key.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, AppError> {
    match serde_json::to_value(record)? {
        Value::Object(mut map) => {
            map.remove(ID_FIELD);
            Ok(map)
        }
        other => Err(AppError::Store(format!(
            "Expected a JSON object document, got {}",
            other
        ))),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
