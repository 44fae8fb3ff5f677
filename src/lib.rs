pub mod cache;
pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod services;
pub mod store;
pub mod views;

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::cache::CacheService;
use crate::config::Config;
use crate::redis_client::RedisClient;
use crate::services::events_api::EventsApiClient;
use crate::services::media::{CloudinaryClient, MediaHost};
use crate::store::{EventStore, InMemoryEventStore, PgEventStore};
use crate::views::TemplateEngine;

// Shared state для всего приложения: создаётся при старте, в обработчики попадает через Arc
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub media: Arc<dyn MediaHost>,
    pub events_api: EventsApiClient,
    pub cache: CacheService,
    pub templates: TemplateEngine,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Arc<Self>> {
        let store: Arc<dyn EventStore> = match &config.database {
            Some(db_config) => Arc::new(
                PgEventStore::connect(db_config)
                    .await
                    .context("Failed to open event store")?,
            ),
            None => {
                warn!("DATABASE_URL is not set, events are kept in memory only");
                Arc::new(InMemoryEventStore::new())
            }
        };

        let cache = match &config.redis {
            Some(redis_config) => {
                let redis = RedisClient::connect(&redis_config.url)
                    .await
                    .context("Failed to connect to Redis")?;
                CacheService::new(redis)
            }
            None => CacheService::disabled(),
        };

        let media = CloudinaryClient::from_config(&config.media)
            .context("Failed to create media host client")?;
        let events_api = EventsApiClient::new(&config.app.base_url)
            .context("Failed to create events API client")?;
        let templates = TemplateEngine::new().context("Failed to register page templates")?;

        Ok(Arc::new(Self {
            store,
            media: Arc::new(media),
            events_api,
            cache,
            templates,
        }))
    }
}

/// Собирает роутер приложения.
pub fn app(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(|| async { "DevEvent API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .merge(controllers::pages::routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
