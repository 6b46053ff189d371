use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;

use crate::errors::AppError;
use crate::handlers::render;
use crate::models::{BlogPost, Stored, Testimonial};
use crate::services::content::{self, Offering, OFFERINGS};
use crate::state::AppState;

const HOME_TESTIMONIALS: usize = 3;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub offerings: &'static [Offering],
    pub testimonials: Vec<Stored<Testimonial>>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub offerings: &'static [Offering],
}

#[derive(Template)]
#[template(path = "book.html")]
pub struct BookTemplate {
    pub offerings: &'static [Offering],
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogTemplate {
    pub posts: Vec<Stored<BlogPost>>,
}

#[derive(Template)]
#[template(path = "testimonials.html")]
pub struct TestimonialsTemplate {
    pub testimonials: Vec<Stored<Testimonial>>,
    pub average: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate;

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let mut testimonials = content::approved_testimonials(state.store.as_ref())?;
    testimonials.truncate(HOME_TESTIMONIALS);
    render(&IndexTemplate {
        offerings: OFFERINGS,
        testimonials,
    })
}

pub async fn about() -> Result<Html<String>, AppError> {
    render(&AboutTemplate)
}

pub async fn services() -> Result<Html<String>, AppError> {
    render(&ServicesTemplate {
        offerings: OFFERINGS,
    })
}

pub async fn book() -> Result<Html<String>, AppError> {
    render(&BookTemplate {
        offerings: OFFERINGS,
    })
}

pub async fn blog(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let posts = content::published_posts(state.store.as_ref())?;
    render(&BlogTemplate { posts })
}

pub async fn testimonials(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let testimonials = content::approved_testimonials(state.store.as_ref())?;
    let average = content::average_rating(&testimonials)
        .map(|avg| format!("{avg:.1}"))
        .unwrap_or_default();
    render(&TestimonialsTemplate {
        testimonials,
        average,
    })
}

pub async fn contact() -> Result<Html<String>, AppError> {
    render(&ContactTemplate)
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
