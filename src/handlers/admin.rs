use std::sync::Arc;

use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::{
    json_body, optional, render, required, storage_failed, write_failed, SubmitResponse,
};
use crate::models::{AppointmentStatus, BlogPost};
use crate::services::admin::{self as workflow, Dashboard};
use crate::services::session::{expired_session_cookie, is_https, session_cookie, session_token};
use crate::state::AppState;

const LOGIN_PATH: &str = "/admin/login";
const DASHBOARD_PATH: &str = "/admin";

fn is_admin(state: &AppState, jar: &CookieJar) -> bool {
    session_token(jar)
        .map(|token| state.sessions.is_admin(&token))
        .unwrap_or(false)
}

/// Guard for every admin route: no admin session, no handler.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if !is_admin(&state, &jar) {
        tracing::warn!(path = %request.uri().path(), "admin route without session");
        return Redirect::to(LOGIN_PATH).into_response();
    }
    next.run(request).await
}

// GET/POST /admin/login
#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub error: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if is_admin(&state, &jar) {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }
    Ok(render(&AdminLoginTemplate {
        error: String::new(),
    })?
    .into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();

    if !state.credentials.verify(username, &form.password) {
        tracing::warn!(username = %username, "failed admin login");
        let page = render(&AdminLoginTemplate {
            error: "Invalid credentials".to_string(),
        })?;
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    }

    let token = state.sessions.start_admin()?;
    tracing::info!(username = %username, "admin logged in");

    let cookie = session_cookie(token, state.sessions.ttl(), is_https(&headers));
    Ok((jar.add(cookie), Redirect::to(DASHBOARD_PATH)).into_response())
}

// GET /admin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    if let Some(token) = session_token(&jar) {
        state.sessions.end(&token);
        tracing::info!("admin logged out");
    }
    let cookie = expired_session_cookie(is_https(&headers));
    (jar.add(cookie), Redirect::to("/")).into_response()
}

// GET /admin
#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub dashboard: Dashboard,
    pub statuses: [AppointmentStatus; 4],
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let dashboard = workflow::load_dashboard(state.store.as_ref())?;
    render(&AdminDashboardTemplate {
        dashboard,
        statuses: AppointmentStatus::ALL,
    })
}

// GET /api/admin/dashboard
pub async fn dashboard_json(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, AppError> {
    Ok(Json(workflow::load_dashboard(state.store.as_ref())?))
}

// POST /admin/appointments/:id/status
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, Response> {
    let req = json_body(payload)?;
    let raw = required(req.status, "status")?;
    let status = AppointmentStatus::parse(&raw).ok_or_else(|| {
        write_failed(StatusCode::BAD_REQUEST, format!("unknown status: {raw}"))
    })?;

    let updated = workflow::set_appointment_status(state.store.as_ref(), &id, status)
        .map_err(storage_failed)?;
    if !updated {
        return Err(write_failed(StatusCode::NOT_FOUND, "appointment not found"));
    }
    Ok(Json(SubmitResponse::ok()))
}

// POST /admin/contacts/:id/read
pub async fn mark_contact_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SubmitResponse>, Response> {
    let updated =
        workflow::mark_contact_read(state.store.as_ref(), &id).map_err(storage_failed)?;
    if !updated {
        return Err(write_failed(StatusCode::NOT_FOUND, "contact message not found"));
    }
    Ok(Json(SubmitResponse::ok()))
}

// POST /admin/testimonials/:id/approve
pub async fn approve_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SubmitResponse>, Response> {
    let updated =
        workflow::approve_testimonial(state.store.as_ref(), &id).map_err(storage_failed)?;
    if !updated {
        return Err(write_failed(StatusCode::NOT_FOUND, "testimonial not found"));
    }
    Ok(Json(SubmitResponse::ok()))
}

// POST /admin/blog
#[derive(Debug, Deserialize)]
pub struct BlogPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

pub async fn create_blog_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BlogPostRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, Response> {
    let req = json_body(payload)?;
    let post = BlogPost::new(
        required(req.title, "title")?,
        required(req.content, "content")?,
        optional(req.excerpt),
        optional(req.category),
        req.is_published,
    );

    let id = workflow::publish_blog_post(state.store.as_ref(), &post).map_err(storage_failed)?;
    Ok(Json(SubmitResponse::created(id)))
}
