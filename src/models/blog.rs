use serde::{Deserialize, Serialize};

use crate::db::Collection;
use crate::models::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl BlogPost {
    /// Posts are published unless the author explicitly holds them back.
    pub fn new(
        title: String,
        content: String,
        excerpt: Option<String>,
        category: Option<String>,
        is_published: Option<bool>,
    ) -> Self {
        Self {
            title,
            content,
            excerpt: excerpt.unwrap_or_default(),
            category: category.unwrap_or_default(),
            is_published: is_published.unwrap_or(true),
        }
    }
}

impl Record for BlogPost {
    const COLLECTION: Collection = Collection::BlogPosts;
}
