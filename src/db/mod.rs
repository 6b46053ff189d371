pub mod memory;
pub mod migrations;
pub mod queries;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{Backend, Collection, Document, DocumentStore, Query};

/// Pick the storage backend for the lifetime of the process.
///
/// A database that can't be opened, migrated or pinged is not fatal: the
/// site keeps running on in-memory storage, which is lost on restart.
pub fn connect(database_url: &str) -> Box<dyn DocumentStore> {
    match SqliteStore::open(database_url) {
        Ok(store) => {
            tracing::info!(path = %database_url, "connected to document store");
            Box::new(store)
        }
        Err(e) => {
            tracing::info!("document store not available: {e:#}");
            tracing::info!("using in-memory storage for development");
            Box::new(MemoryStore::new())
        }
    }
}
