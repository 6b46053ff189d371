use serde::{Deserialize, Serialize};

use crate::db::Collection;
use crate::models::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
}

impl ContactMessage {
    pub fn new(name: String, email: String, subject: Option<String>, message: String) -> Self {
        Self {
            name,
            email,
            subject: subject.unwrap_or_default(),
            message,
            is_read: false,
        }
    }
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::ContactMessages;
}
