use serde::Serialize;

use crate::db::queries;
use crate::db::DocumentStore;
use crate::models::{
    Appointment, AppointmentStatus, BlogPost, ContactMessage, Stored, Testimonial,
};

/// Everything the admin dashboard shows, newest first, nothing filtered out.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub appointments: Vec<Stored<Appointment>>,
    pub contacts: Vec<Stored<ContactMessage>>,
    pub blogs: Vec<Stored<BlogPost>>,
    pub testimonials: Vec<Stored<Testimonial>>,
    pub pending_appointments: usize,
    pub unread_contacts: usize,
    pub awaiting_approval: usize,
}

pub fn load_dashboard(store: &dyn DocumentStore) -> anyhow::Result<Dashboard> {
    let appointments = queries::list_appointments(store)?;
    let contacts = queries::list_contact_messages(store)?;
    let blogs = queries::list_blog_posts(store, false)?;
    let testimonials = queries::list_testimonials(store, false)?;

    Ok(Dashboard {
        pending_appointments: appointments
            .iter()
            .filter(|a| a.record.status == AppointmentStatus::Pending)
            .count(),
        unread_contacts: contacts.iter().filter(|c| !c.record.is_read).count(),
        awaiting_approval: testimonials.iter().filter(|t| !t.record.is_approved).count(),
        appointments,
        contacts,
        blogs,
        testimonials,
    })
}

pub fn set_appointment_status(
    store: &dyn DocumentStore,
    id: &str,
    status: AppointmentStatus,
) -> anyhow::Result<bool> {
    let updated = queries::update_appointment_status(store, id, status)?;
    if updated {
        tracing::info!(id = %id, status = status.as_str(), "appointment status updated");
    } else {
        tracing::warn!(id = %id, "status update for unknown appointment");
    }
    Ok(updated)
}

pub fn mark_contact_read(store: &dyn DocumentStore, id: &str) -> anyhow::Result<bool> {
    let updated = queries::mark_contact_read(store, id)?;
    if updated {
        tracing::info!(id = %id, "contact message marked read");
    } else {
        tracing::warn!(id = %id, "mark-read for unknown contact message");
    }
    Ok(updated)
}

pub fn approve_testimonial(store: &dyn DocumentStore, id: &str) -> anyhow::Result<bool> {
    let updated = queries::approve_testimonial(store, id)?;
    if updated {
        tracing::info!(id = %id, "testimonial approved");
    } else {
        tracing::warn!(id = %id, "approval for unknown testimonial");
    }
    Ok(updated)
}

pub fn publish_blog_post(store: &dyn DocumentStore, post: &BlogPost) -> anyhow::Result<String> {
    let id = queries::create_blog_post(store, post)?;
    tracing::info!(id = %id, title = %post.title, published = post.is_published, "blog post created");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_dashboard_counts_and_sees_hidden_records() {
        let store = MemoryStore::new();
        let appt = queries::create_appointment(
            &store,
            &Appointment::new("A".into(), "+1".into(), "career".into(), None),
        )
        .unwrap();
        queries::create_appointment(
            &store,
            &Appointment::new("B".into(), "+2".into(), "home".into(), None),
        )
        .unwrap();
        queries::create_contact_message(
            &store,
            &ContactMessage::new("C".into(), "c@x.com".into(), None, "hello".into()),
        )
        .unwrap();
        queries::create_testimonial(
            &store,
            &Testimonial::new("D".into(), None, 5, "thanks".into(), None),
        )
        .unwrap();
        publish_blog_post(
            &store,
            &BlogPost::new("Draft".into(), "wip".into(), None, None, Some(false)),
        )
        .unwrap();

        assert!(set_appointment_status(&store, &appt, AppointmentStatus::Confirmed).unwrap());

        let dashboard = load_dashboard(&store).unwrap();
        assert_eq!(dashboard.appointments.len(), 2);
        assert_eq!(dashboard.pending_appointments, 1);
        assert_eq!(dashboard.unread_contacts, 1);
        assert_eq!(dashboard.awaiting_approval, 1);
        assert_eq!(dashboard.testimonials.len(), 1);
        assert_eq!(dashboard.blogs.len(), 1);
        assert!(!dashboard.blogs[0].record.is_published);
    }

    #[test]
    fn test_mutations_on_unknown_ids_report_false() {
        let store = MemoryStore::new();
        assert!(!set_appointment_status(&store, "1", AppointmentStatus::Cancelled).unwrap());
        assert!(!mark_contact_read(&store, "1").unwrap());
        assert!(!approve_testimonial(&store, "1").unwrap());
    }
}
