use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// Named groups of documents. Every record kind lives in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Appointments,
    ContactMessages,
    Testimonials,
    BlogPosts,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Appointments,
        Collection::ContactMessages,
        Collection::Testimonials,
        Collection::BlogPosts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Appointments => "appointments",
            Collection::ContactMessages => "contact_messages",
            Collection::Testimonials => "testimonials",
            Collection::BlogPosts => "blog_posts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Memory => "memory",
        }
    }
}

/// A stored record: store-assigned id and creation time plus free-form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub fields: Map<String, Value>,
}

/// Equality filter over named fields, with optional newest-first ordering.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filter: Vec<(String, Value)>,
    pub newest_first: bool,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter.push((field.to_string(), value.into()));
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    /// True when every filter pair is present in `fields` with an equal value.
    pub fn matches(&self, fields: &Map<String, Value>) -> bool {
        self.filter
            .iter()
            .all(|(field, value)| fields.get(field) == Some(value))
    }
}

/// Uniform persistence contract shared by the SQLite and in-memory backends.
///
/// `update_by_id` merges the given fields into the stored document and
/// reports `false` when no document has that id. The id and creation time
/// are never part of `fields` and cannot be changed.
pub trait DocumentStore: Send + Sync {
    fn backend(&self) -> Backend;

    fn insert(&self, collection: Collection, fields: Map<String, Value>) -> anyhow::Result<String>;

    fn find(&self, collection: Collection, query: &Query) -> anyhow::Result<Vec<Document>>;

    fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<bool>;
}
