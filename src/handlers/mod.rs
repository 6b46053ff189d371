pub mod admin;
pub mod api;
pub mod health;
pub mod pages;

use std::sync::Arc;

use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

/// Body returned by every write endpoint.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
            error: None,
        }
    }

    pub fn created(id: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
        }
    }
}

pub(crate) fn write_failed(status: StatusCode, error: impl Into<String>) -> Response {
    let body = SubmitResponse {
        success: false,
        id: None,
        error: Some(error.into()),
    };
    (status, Json(body)).into_response()
}

pub(crate) fn storage_failed(e: anyhow::Error) -> Response {
    tracing::error!(error = %e, "write failed");
    write_failed(StatusCode::BAD_REQUEST, e.to_string())
}

/// Trimmed, non-empty value or `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Text from a string or a bare number, e.g. a phone number sent unquoted.
pub(crate) fn loose_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[allow(clippy::result_large_err)]
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, Response> {
    optional(value)
        .ok_or_else(|| write_failed(StatusCode::BAD_REQUEST, format!("{field} is required")))
}

/// Unwrap a JSON body, turning a malformed one into a `{success:false}` 400.
#[allow(clippy::result_large_err)]
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| write_failed(StatusCode::BAD_REQUEST, rejection.body_text()))
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

pub fn router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/api/admin/dashboard", get(admin::dashboard_json))
        .route(
            "/admin/appointments/:id/status",
            post(admin::update_appointment_status),
        )
        .route("/admin/contacts/:id/read", post(admin::mark_contact_read))
        .route(
            "/admin/testimonials/:id/approve",
            post(admin::approve_testimonial),
        )
        .route("/admin/blog", post(admin::create_blog_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin::require_admin,
        ));

    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/book", get(pages::book))
        .route("/blog", get(pages::blog))
        .route("/testimonials", get(pages::testimonials))
        .route("/contact", get(pages::contact))
        .route("/health", get(health::health))
        .route("/api/appointments", post(api::create_appointment))
        .route("/api/contact", post(api::create_contact_message))
        .route(
            "/api/testimonials",
            get(api::list_testimonials).post(api::create_testimonial),
        )
        .route("/api/blog", get(api::list_blog_posts))
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .route("/admin/logout", get(admin::logout))
        .merge(admin_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
