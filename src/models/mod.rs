pub mod appointment;
pub mod blog;
pub mod contact;
pub mod testimonial;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::db::{Collection, Document};

pub use appointment::{Appointment, AppointmentStatus};
pub use blog::BlogPost;
pub use contact::ContactMessage;
pub use testimonial::Testimonial;

/// A record kind stored as documents in one collection.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn to_fields(&self) -> anyhow::Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            other => anyhow::bail!("record serialized to non-object: {other}"),
        }
    }
}

/// A record as read back from the store, with its store-assigned identity.
#[derive(Debug, Clone, Serialize)]
pub struct Stored<T> {
    pub id: String,
    pub created_at: NaiveDateTime,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Record> Stored<T> {
    pub fn from_document(doc: Document) -> anyhow::Result<Self> {
        let record = serde_json::from_value(Value::Object(doc.fields)).map_err(|e| {
            anyhow::anyhow!(
                "malformed {} document {}: {e}",
                T::COLLECTION.as_str(),
                doc.id
            )
        })?;
        Ok(Self {
            id: doc.id,
            created_at: doc.created_at,
            record,
        })
    }
}
