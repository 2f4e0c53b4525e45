//! SQLite-backed document store.
//!
//! Every collection shares the `documents` table; a document's body is stored
//! as canonical JSON text without its identifier.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use super::store::{Document, DocumentStore, FieldFilter, UpdateOutcome, ID_FIELD};
use super::RecordId;
use crate::errors::AppError;

/// Document store over a shared SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<RecordId, AppError> {
        let id = RecordId::new();
        document.remove(ID_FIELD);
        let body = serde_json::to_string(&document)?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(id.to_string())
            .bind(&body)
            .execute(&self.pool)
            .await?;

        tracing::debug!(collection, %id, "Inserted document");
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Option<FieldFilter<'_>>,
    ) -> Result<Vec<Document>, AppError> {
        let rows = match filter {
            None => {
                sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY seq")
                    .bind(collection)
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(filter) => {
                sqlx::query(
                    "SELECT id, body FROM documents WHERE collection = ? AND json_extract(body, ?) = ? ORDER BY seq",
                )
                .bind(collection)
                .bind(json_path(filter.field))
                .bind(filter.value)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(document_from_row).collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Document>, AppError> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn replace_one(
        &self,
        collection: &str,
        id: RecordId,
        mut document: Document,
    ) -> Result<UpdateOutcome, AppError> {
        document.remove(ID_FIELD);
        let body = serde_json::to_string(&document)?;

        let result = sqlx::query(
            "UPDATE documents SET body = ? WHERE collection = ? AND id = ? AND body <> ?",
        )
        .bind(&body)
        .bind(collection)
        .bind(id.to_string())
        .bind(&body)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(UpdateOutcome {
                matched: result.rows_affected(),
                modified: result.rows_affected(),
            });
        }

        // Nothing changed: tell "no such document" apart from "already equal".
        let existing = sqlx::query("SELECT 1 FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(UpdateOutcome {
            matched: u64::from(existing.is_some()),
            modified: 0,
        })
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        id: RecordId,
        mut set: Document,
    ) -> Result<Option<Document>, AppError> {
        set.remove(ID_FIELD);
        // json_patch deletes keys patched with null, so those go through json_set.
        let null_paths: Vec<String> = set
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(field, _)| json_path(field))
            .collect();
        set.retain(|_, value| !value.is_null());
        let patch = serde_json::to_string(&set)?;

        let body = null_paths
            .iter()
            .fold("json_patch(body, ?)".to_string(), |expr, _| {
                format!("json_set({}, ?, NULL)", expr)
            });
        let sql = format!(
            "UPDATE documents SET body = {} WHERE collection = ? AND id = ? RETURNING id, body",
            body
        );

        let mut query = sqlx::query(&sql).bind(patch);
        for path in null_paths {
            query = query.bind(path);
        }
        let row = query
            .bind(collection)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// Helper functions for row conversion

fn document_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Document, AppError> {
    let id: String = row.get("id");
    let body: String = row.get("body");

    let mut document = match serde_json::from_str(&body)? {
        Value::Object(map) => map,
        other => {
            return Err(AppError::Store(format!(
                "Stored document {} is not an object: {}",
                id, other
            )))
        }
    };
    document.insert(ID_FIELD.to_string(), Value::String(id));
    Ok(document)
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde_json::json;
    use tempfile::TempDir;

    async fn store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("store.sqlite"))
            .await
            .expect("Failed to init DB");
        (SqliteStore::new(pool), temp_dir)
    }

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_one() {
        let (store, _dir) = store().await;

        let id = store
            .insert_one("gifts", doc(json!({ "name": "Scarf", "price": 25.0 })))
            .await
            .unwrap();

        let found = store.find_one("gifts", id).await.unwrap().unwrap();
        assert_eq!(found["_id"], json!(id.to_string()));
        assert_eq!(found["name"], "Scarf");

        // Collections are isolated from each other.
        assert!(store.find_one("dishes", id).await.unwrap().is_none());
        assert!(store
            .find_one("gifts", RecordId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order_and_filters() {
        let (store, _dir) = store().await;

        for (name, category) in [("Salad", "side"), ("Roast", "main"), ("Rolls", "side")] {
            store
                .insert_one("dishes", doc(json!({ "name": name, "categoryId": category })))
                .await
                .unwrap();
        }

        let all = store.find("dishes", None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|d| d["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Salad", "Roast", "Rolls"]);

        let sides = store
            .find("dishes", Some(FieldFilter::eq("categoryId", "side")))
            .await
            .unwrap();
        assert_eq!(sides.len(), 2);

        let desserts = store
            .find("dishes", Some(FieldFilter::eq("categoryId", "dessert")))
            .await
            .unwrap();
        assert!(desserts.is_empty());
    }

    #[tokio::test]
    async fn test_replace_reports_modified_counts() {
        let (store, _dir) = store().await;
        let id = store
            .insert_one("gifts", doc(json!({ "name": "Scarf" })))
            .await
            .unwrap();

        let changed = store
            .replace_one("gifts", id, doc(json!({ "name": "Hat" })))
            .await
            .unwrap();
        assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1 });

        let unchanged = store
            .replace_one("gifts", id, doc(json!({ "name": "Hat" })))
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateOutcome { matched: 1, modified: 0 });

        let missing = store
            .replace_one("gifts", RecordId::new(), doc(json!({ "name": "Hat" })))
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn test_find_one_and_update_merges_fields() {
        let (store, _dir) = store().await;
        let id = store
            .insert_one(
                "dishes",
                doc(json!({ "name": "Pie", "serves": 6, "description": "" })),
            )
            .await
            .unwrap();

        let updated = store
            .find_one_and_update(
                "dishes",
                id,
                doc(json!({ "description": "Apple", "serves": null, "_id": "ignored" })),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["description"], "Apple");
        assert_eq!(updated["serves"], Value::Null);
        assert!(updated.contains_key("serves"));
        assert_eq!(updated["name"], "Pie");
        assert_eq!(updated["_id"], json!(id.to_string()));

        let missing = store
            .find_one_and_update("dishes", RecordId::new(), doc(json!({ "name": "X" })))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_one() {
        let (store, _dir) = store().await;
        let id = store
            .insert_one("gifts", doc(json!({ "name": "Scarf" })))
            .await
            .unwrap();

        assert_eq!(store.delete_one("gifts", id).await.unwrap(), 1);
        assert_eq!(store.delete_one("gifts", id).await.unwrap(), 0);
    }
}
