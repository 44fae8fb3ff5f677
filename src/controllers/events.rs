//! events.rs
//!
//! JSON API событий: создание (multipart с изображением), список, одно событие по слагу.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::error::ApiError;
use crate::middleware::EventSubmission;
use crate::models::event::is_valid_slug;
use crate::services::ingestion;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{slug}", get(get_event))
}

// POST /api/events
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    EventSubmission(form): EventSubmission,
) -> Result<impl IntoResponse, ApiError> {
    let event = ingestion::create_event(state.store.as_ref(), state.media.as_ref(), form)
        .await
        .map_err(|e| {
            error!("Event creation failed: {:?}", e);
            ApiError::from(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Event created successfully",
            "event": event
        })),
    ))
}

// GET /api/events
pub async fn list_events(State(state): State<Arc<AppState>>) -> Response {
    match state.store.list().await {
        Ok(events) => Json(json!({
            "message": "Successfully fetched events",
            "events": events
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to list events: {:?}", e);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get events")
                .with_error(e)
                .into_response()
        }
    }
}

// GET /api/events/{slug}
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slug = slug.trim().to_lowercase();
    if !is_valid_slug(&slug) {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Invalid or missing slug"));
    }

    let event = state.store.find_by_slug(&slug).await.map_err(|e| {
        error!("Failed to fetch event {}: {:?}", slug, e);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch event").with_error(e)
    })?;

    match event {
        Some(event) => Ok(Json(json!({
            "message": "Event fetched successfully",
            "event": event
        }))),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Event with slug '{}' not found", slug),
        )),
    }
}
