use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::{event::event_slug, Event, NewEvent};
use crate::store::EventStore;

const EVENT_COLUMNS: &str = "id, slug, title, description, overview, image, date, time, \
     location, mode, audience, organizer, agenda, tags, created_at, updated_at";

/// Таблица `events` в Postgres. Пул и схема поднимаются в `connect`.
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./src/migrations").run(&pool).await?;
        info!(pool_size = config.pool_size, "Event store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError> {
        let id = Uuid::new_v4();
        let slug = event_slug(&event.draft.title, id);
        let NewEvent { draft, image } = event;

        // created_at / updated_at проставляет БД
        let created = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (id, slug, title, description, overview, image, date, time, \
                                 location, mode, audience, organizer, agenda, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {}",
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(&slug)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.overview)
        .bind(&image)
        .bind(&draft.date)
        .bind(&draft.time)
        .bind(&draft.location)
        .bind(&draft.mode)
        .bind(&draft.audience)
        .bind(&draft.organizer)
        .bind(&draft.agenda)
        .bind(&draft.tags)
        .fetch_one(&self.pool)
        .await?;

        info!(event_id = %created.id, slug = %created.slug, "Created event");
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events ORDER BY created_at DESC, seq DESC",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE slug = $1",
            EVENT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }
}
