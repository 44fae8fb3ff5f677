//! pages.rs
//!
//! Серверный рендер страницы события. Данные берутся не из хранилища напрямую,
//! а через HTTP из `/api/events/{slug}` с 60-секундным окном кеша.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::cache::events::EVENT_REVALIDATE_SECS;
use crate::models::{event::is_valid_slug, Event};
use crate::services::events_api::{decode_event, FetchError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/events/{slug}", get(event_page))
}

// GET /events/{slug}
//
// Любой сбой получения события показывается как "не найдено",
// но логируется отдельно от настоящего отсутствия события.
pub async fn event_page(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let slug = slug.trim().to_lowercase();
    if !is_valid_slug(&slug) {
        return not_found(&state);
    }

    let (event, cache_status) = match load_event(&state, &slug).await {
        Ok(Some(found)) => found,
        Ok(None) => return not_found(&state),
        Err(e) => {
            error!("Error fetching event {}: {}", slug, e);
            return not_found(&state);
        }
    };

    match state.templates.render_event_page(&event) {
        Ok(html) => (
            [
                (
                    header::CACHE_CONTROL,
                    format!(
                        "public, s-maxage={}, stale-while-revalidate",
                        EVENT_REVALIDATE_SECS
                    ),
                ),
                (header::HeaderName::from_static("x-cache"), cache_status.to_string()),
            ],
            Html(html),
        )
            .into_response(),
        Err(e) => {
            error!("Error rendering event page {}: {}", slug, e);
            not_found(&state)
        }
    }
}

async fn load_event(
    state: &AppState,
    slug: &str,
) -> Result<Option<(Event, &'static str)>, FetchError> {
    if let Some(body) = state.cache.get_cached_event(slug).await {
        match decode_event(&body) {
            Ok(Some(event)) => return Ok(Some((event, "HIT"))),
            _ => warn!("Discarding unreadable cached event {}", slug),
        }
    }

    match state.events_api.fetch_event(slug).await? {
        Some((event, body)) => {
            state.cache.cache_event(slug, &body).await;
            Ok(Some((event, "MISS")))
        }
        None => Ok(None),
    }
}

fn not_found(state: &AppState) -> Response {
    match state.templates.render_not_found_page() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            error!("Error rendering not-found page: {}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
