use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::{
    json_body, loose_text, optional, required, storage_failed, write_failed, SubmitResponse,
};
use crate::models::testimonial::parse_rating;
use crate::models::{Appointment, BlogPost, ContactMessage, Stored, Testimonial};
use crate::services::content;
use crate::state::AppState;

// POST /api/appointments
#[derive(Debug, Deserialize)]
pub struct AppointmentRequest {
    pub name: Option<String>,
    #[serde(alias = "contact")]
    pub whatsapp: Option<serde_json::Value>,
    #[serde(rename = "serviceType", alias = "service_type")]
    pub service_type: Option<String>,
    pub message: Option<String>,
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, Response> {
    let req = json_body(payload)?;
    let appointment = Appointment::new(
        required(req.name, "name")?,
        required(loose_text(req.whatsapp), "whatsapp")?,
        required(req.service_type, "serviceType")?,
        optional(req.message),
    );

    let id = queries::create_appointment(state.store.as_ref(), &appointment)
        .map_err(storage_failed)?;
    tracing::info!(id = %id, service = %appointment.service_type, "appointment requested");

    Ok(Json(SubmitResponse::created(id)))
}

// POST /api/contact
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

pub async fn create_contact_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, Response> {
    let req = json_body(payload)?;
    let message = ContactMessage::new(
        required(req.name, "name")?,
        required(req.email, "email")?,
        optional(req.subject),
        required(req.message, "message")?,
    );

    let id = queries::create_contact_message(state.store.as_ref(), &message)
        .map_err(storage_failed)?;
    tracing::info!(id = %id, "contact message received");

    Ok(Json(SubmitResponse::created(id)))
}

// POST /api/testimonials
#[derive(Debug, Deserialize)]
pub struct TestimonialRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<serde_json::Value>,
    pub text: Option<String>,
    pub service: Option<String>,
}

pub async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TestimonialRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, Response> {
    let req = json_body(payload)?;
    let rating = parse_rating(req.rating.as_ref())
        .map_err(|e| write_failed(StatusCode::BAD_REQUEST, e.to_string()))?;
    let testimonial = Testimonial::new(
        required(req.name, "name")?,
        optional(req.location),
        rating,
        required(req.text, "text")?,
        optional(req.service),
    );

    let id = queries::create_testimonial(state.store.as_ref(), &testimonial)
        .map_err(storage_failed)?;
    tracing::info!(id = %id, rating, "testimonial submitted for review");

    Ok(Json(SubmitResponse::created(id)))
}

// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Stored<Testimonial>>>, AppError> {
    Ok(Json(content::approved_testimonials(state.store.as_ref())?))
}

// GET /api/blog
pub async fn list_blog_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Stored<BlogPost>>>, AppError> {
    Ok(Json(content::published_posts(state.store.as_ref())?))
}
