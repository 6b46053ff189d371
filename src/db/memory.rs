use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde_json::{Map, Value};

use crate::db::store::{Backend, Collection, Document, DocumentStore, Query};

/// Process-local fallback used when the database can't be reached.
///
/// Documents are kept in insertion order per collection. Ids come from a
/// counter shared by all collections, so they are unique for the life of the
/// process but start over at `1` on restart.
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, HashMap<Collection, Vec<Document>>>> {
        self.collections
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store mutex poisoned"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    fn insert(&self, collection: Collection, fields: Map<String, Value>) -> anyhow::Result<String> {
        let mut collections = self.lock()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        collections.entry(collection).or_default().push(Document {
            id: id.clone(),
            created_at: Utc::now().naive_utc(),
            fields,
        });
        Ok(id)
    }

    fn find(&self, collection: Collection, query: &Query) -> anyhow::Result<Vec<Document>> {
        let collections = self.lock()?;
        let Some(docs) = collections.get(&collection) else {
            return Ok(vec![]);
        };

        let mut found: Vec<Document> = docs
            .iter()
            .filter(|doc| query.matches(&doc.fields))
            .cloned()
            .collect();

        if query.newest_first {
            // Reverse first so the stable sort keeps later inserts ahead on equal timestamps.
            found.reverse();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        Ok(found)
    }

    fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<bool> {
        let mut collections = self.lock()?;
        let doc = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id));

        match doc {
            Some(doc) => {
                doc.fields.extend(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
