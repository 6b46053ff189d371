use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use chrono::{NaiveDateTime, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::migrations;
use crate::db::store::{Backend, Collection, Document, DocumentStore, Query};

/// Fixed-width so that text ordering in SQL matches chronological ordering.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// SQLite used as a document store: one JSON blob per row, grouped by
/// collection name.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database, apply migrations and ping it. Any failure here is
    /// the signal for the caller to fall back to in-memory storage.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("failed to open database")?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("failed to set database pragmas")?;

        migrations::run_migrations(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ping()?;
        Ok(store)
    }

    pub fn ping(&self) -> anyhow::Result<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .context("database ping failed")?;
        Ok(())
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database mutex poisoned"))
    }
}

/// Map a JSON filter value onto what `json_extract` yields for it.
/// `None` means the filter is an `IS NULL` check.
fn to_sql_value(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        }),
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        other => Some(SqlValue::Text(other.to_string())),
    }
}

fn parse_document(id: String, data: &str, created_at: &str) -> anyhow::Result<Document> {
    let fields: Map<String, Value> = serde_json::from_str(data)
        .with_context(|| format!("corrupt document data for {id}"))?;
    let created_at = NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
        .with_context(|| format!("corrupt created_at for {id}"))?;
    Ok(Document {
        id,
        created_at,
        fields,
    })
}

impl DocumentStore for SqliteStore {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn insert(&self, collection: Collection, fields: Map<String, Value>) -> anyhow::Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let created_at = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
        let data = serde_json::to_string(&fields)?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO documents (collection, id, data, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![collection.as_str(), id, data, created_at],
        )?;
        Ok(id)
    }

    fn find(&self, collection: Collection, query: &Query) -> anyhow::Result<Vec<Document>> {
        let mut sql =
            String::from("SELECT id, data, created_at FROM documents WHERE collection = ?1");
        let mut values = vec![SqlValue::Text(collection.as_str().to_string())];

        for (field, value) in &query.filter {
            values.push(SqlValue::Text(format!("$.{field}")));
            let path_idx = values.len();
            match to_sql_value(value) {
                Some(v) => {
                    values.push(v);
                    sql.push_str(&format!(
                        " AND json_extract(data, ?{path_idx}) = ?{}",
                        values.len()
                    ));
                }
                None => {
                    sql.push_str(&format!(" AND json_extract(data, ?{path_idx}) IS NULL"));
                }
            }
        }

        if query.newest_first {
            sql.push_str(" ORDER BY created_at DESC, seq DESC");
        } else {
            sql.push_str(" ORDER BY seq ASC");
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut docs = vec![];
        for row in rows {
            let (id, data, created_at) = row?;
            docs.push(parse_document(id, &data, &created_at)?);
        }
        Ok(docs)
    }

    fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let data: Option<String> = tx
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(data) = data else {
            return Ok(false);
        };

        let mut stored: Map<String, Value> = serde_json::from_str(&data)
            .with_context(|| format!("corrupt document data for {id}"))?;
        stored.extend(fields);

        tx.execute(
            "UPDATE documents SET data = ?1 WHERE collection = ?2 AND id = ?3",
            params![serde_json::to_string(&stored)?, collection.as_str(), id],
        )?;
        tx.commit()?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn store() -> SqliteStore {
        SqliteStore::open(":memory:").unwrap()
    }

    #[test]
    fn test_open_fails_for_unreachable_path() {
        assert!(SqliteStore::open("/nonexistent-dir/for/sure/site.db").is_err());
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let store = store();
        let a = store
            .insert(Collection::Appointments, fields(json!({"name": "A"})))
            .unwrap();
        let b = store
            .insert(Collection::Appointments, fields(json!({"name": "B"})))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_find_filters_on_bool_and_string() {
        let store = store();
        store
            .insert(
                Collection::BlogPosts,
                fields(json!({"title": "one", "is_published": true, "category": "news"})),
            )
            .unwrap();
        store
            .insert(
                Collection::BlogPosts,
                fields(json!({"title": "two", "is_published": false, "category": "news"})),
            )
            .unwrap();
        store
            .insert(
                Collection::BlogPosts,
                fields(json!({"title": "three", "is_published": true, "category": "guides"})),
            )
            .unwrap();

        let published = store
            .find(
                Collection::BlogPosts,
                &Query::all().filter_eq("is_published", true).newest_first(),
            )
            .unwrap();
        let titles: Vec<_> = published.iter().map(|d| d.fields["title"].clone()).collect();
        assert_eq!(titles, vec![json!("three"), json!("one")]);

        let news = store
            .find(
                Collection::BlogPosts,
                &Query::all().filter_eq("is_published", true).filter_eq("category", "news"),
            )
            .unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].fields["title"], json!("one"));
    }

    #[test]
    fn test_find_filters_on_number() {
        let store = store();
        store
            .insert(Collection::Testimonials, fields(json!({"rating": 5})))
            .unwrap();
        store
            .insert(Collection::Testimonials, fields(json!({"rating": 3})))
            .unwrap();
        let fives = store
            .find(Collection::Testimonials, &Query::all().filter_eq("rating", 5))
            .unwrap();
        assert_eq!(fives.len(), 1);
    }

    #[test]
    fn test_collections_are_isolated() {
        let store = store();
        store
            .insert(Collection::Appointments, fields(json!({"name": "A"})))
            .unwrap();
        assert!(store
            .find(Collection::ContactMessages, &Query::all())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_merges_and_keeps_identity() {
        let store = store();
        let id = store
            .insert(
                Collection::Testimonials,
                fields(json!({"name": "A", "is_approved": false})),
            )
            .unwrap();
        let before = store.find(Collection::Testimonials, &Query::all()).unwrap();

        assert!(store
            .update_by_id(Collection::Testimonials, &id, fields(json!({"is_approved": true})))
            .unwrap());

        let after = store.find(Collection::Testimonials, &Query::all()).unwrap();
        assert_eq!(after[0].id, id);
        assert_eq!(after[0].created_at, before[0].created_at);
        assert_eq!(after[0].fields["name"], json!("A"));
        assert_eq!(after[0].fields["is_approved"], json!(true));
    }

    #[test]
    fn test_update_missing_id_reports_false() {
        let store = store();
        assert!(!store
            .update_by_id(Collection::Appointments, "nope", fields(json!({"status": "confirmed"})))
            .unwrap());
    }
}
