use serde::Serialize;

use crate::db::queries;
use crate::db::DocumentStore;
use crate::models::{BlogPost, Stored, Testimonial};

/// A consultation offered on the services and booking pages.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Offering {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const OFFERINGS: &[Offering] = &[
    Offering {
        slug: "consultation",
        title: "Personal Consultation",
        summary: "A one-to-one session to talk through your questions in depth.",
    },
    Offering {
        slug: "career",
        title: "Career Guidance",
        summary: "Direction on job changes, business ventures and timing.",
    },
    Offering {
        slug: "relationship",
        title: "Relationship Guidance",
        summary: "Advice on compatibility, marriage and family matters.",
    },
    Offering {
        slug: "home",
        title: "Home & Workplace Review",
        summary: "A review of your living or working space with practical remedies.",
    },
];

pub fn published_posts(store: &dyn DocumentStore) -> anyhow::Result<Vec<Stored<BlogPost>>> {
    queries::list_blog_posts(store, true)
}

pub fn approved_testimonials(
    store: &dyn DocumentStore,
) -> anyhow::Result<Vec<Stored<Testimonial>>> {
    queries::list_testimonials(store, true)
}

/// Mean rating across the given testimonials, one decimal place.
pub fn average_rating(testimonials: &[Stored<Testimonial>]) -> Option<f32> {
    if testimonials.is_empty() {
        return None;
    }
    let total: u32 = testimonials.iter().map(|t| u32::from(t.record.rating)).sum();
    let mean = total as f32 / testimonials.len() as f32;
    Some((mean * 10.0).round() / 10.0)
}
