pub mod events;
pub mod pages;

use axum::Router;
use std::sync::Arc;

// Маршруты под префиксом /api
pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new().merge(events::routes())
}
