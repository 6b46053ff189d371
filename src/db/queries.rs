use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::db::{Collection, DocumentStore, Query};
use crate::models::{
    Appointment, AppointmentStatus, BlogPost, ContactMessage, Record, Stored, Testimonial,
};

pub fn insert_record<T: Record>(store: &dyn DocumentStore, record: &T) -> anyhow::Result<String> {
    store.insert(T::COLLECTION, record.to_fields()?)
}

pub fn find_records<T: Record>(
    store: &dyn DocumentStore,
    query: &Query,
) -> anyhow::Result<Vec<Stored<T>>> {
    store
        .find(T::COLLECTION, query)?
        .into_iter()
        .map(Stored::from_document)
        .collect()
}

fn set_flag(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    field: &str,
) -> anyhow::Result<bool> {
    let mut fields = Map::new();
    fields.insert(field.to_string(), Value::Bool(true));
    store.update_by_id(collection, id, fields)
}

// ── Appointments ──

pub fn create_appointment(
    store: &dyn DocumentStore,
    appointment: &Appointment,
) -> anyhow::Result<String> {
    insert_record(store, appointment)
}

pub fn list_appointments(store: &dyn DocumentStore) -> anyhow::Result<Vec<Stored<Appointment>>> {
    find_records(store, &Query::all().newest_first())
}

pub fn update_appointment_status(
    store: &dyn DocumentStore,
    id: &str,
    status: AppointmentStatus,
) -> anyhow::Result<bool> {
    let mut fields = Map::new();
    fields.insert("status".to_string(), json!(status.as_str()));
    fields.insert(
        "updated_at".to_string(),
        serde_json::to_value(Utc::now().naive_utc())?,
    );
    store.update_by_id(Collection::Appointments, id, fields)
}

// ── Contact messages ──

pub fn create_contact_message(
    store: &dyn DocumentStore,
    message: &ContactMessage,
) -> anyhow::Result<String> {
    insert_record(store, message)
}

pub fn list_contact_messages(
    store: &dyn DocumentStore,
) -> anyhow::Result<Vec<Stored<ContactMessage>>> {
    find_records(store, &Query::all().newest_first())
}

pub fn mark_contact_read(store: &dyn DocumentStore, id: &str) -> anyhow::Result<bool> {
    set_flag(store, Collection::ContactMessages, id, "is_read")
}

// ── Testimonials ──

pub fn create_testimonial(
    store: &dyn DocumentStore,
    testimonial: &Testimonial,
) -> anyhow::Result<String> {
    insert_record(store, testimonial)
}

pub fn list_testimonials(
    store: &dyn DocumentStore,
    approved_only: bool,
) -> anyhow::Result<Vec<Stored<Testimonial>>> {
    let mut query = Query::all().newest_first();
    if approved_only {
        query = query.filter_eq("is_approved", true);
    }
    find_records(store, &query)
}

pub fn approve_testimonial(store: &dyn DocumentStore, id: &str) -> anyhow::Result<bool> {
    set_flag(store, Collection::Testimonials, id, "is_approved")
}

// ── Blog posts ──

pub fn create_blog_post(store: &dyn DocumentStore, post: &BlogPost) -> anyhow::Result<String> {
    insert_record(store, post)
}

pub fn list_blog_posts(
    store: &dyn DocumentStore,
    published_only: bool,
) -> anyhow::Result<Vec<Stored<BlogPost>>> {
    let mut query = Query::all().newest_first();
    if published_only {
        query = query.filter_eq("is_published", true);
    }
    find_records(store, &query)
}
