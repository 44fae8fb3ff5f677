pub mod postgres;

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Event, NewEvent};

pub use postgres::PgEventStore;

/// Хранилище событий. Записи только добавляются: обновления и удаления нет.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Сохраняет событие; `id`, `slug` и временные метки назначает хранилище.
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError>;

    /// Все события, новые первыми.
    async fn list(&self) -> Result<Vec<Event>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError>;
}

/// Хранилище в памяти (для разработки и тестов).
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    // порядок вставки сохраняется: нужен для одинаковых created_at
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError> {
        let event = event.into_event(Uuid::new_v4(), Utc::now());
        self.events.write().await.push(event.clone());

        tracing::info!(event_id = %event.id, slug = %event.slug, "Created event");
        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().await;
        let mut result: Vec<Event> = events.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.slug == slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDraft;

    fn new_event(title: &str) -> NewEvent {
        EventDraft {
            title: title.to_string(),
            description: "Description".to_string(),
            overview: "Overview".to_string(),
            date: "2026-11-03".to_string(),
            time: "09:30".to_string(),
            location: "Almaty".to_string(),
            mode: "online".to_string(),
            audience: "Everyone".to_string(),
            organizer: "Organizer".to_string(),
            agenda: vec!["Intro".to_string()],
            tags: vec!["tech".to_string()],
        }
        .with_image("https://res.cloudinary.com/demo/x.png".to_string())
    }

    #[tokio::test]
    async fn create_assigns_identity_and_keeps_fields() {
        let store = InMemoryEventStore::new();
        let event = store.create(new_event("Rust Meetup")).await.unwrap();

        assert!(event.slug.starts_with("rust-meetup-"));
        assert_eq!(event.image, "https://res.cloudinary.com/demo/x.png");
        assert_eq!(event.created_at, event.updated_at);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = InMemoryEventStore::new();
        for title in ["first", "second", "third"] {
            store.create(new_event(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn identical_submissions_get_distinct_slugs() {
        let store = InMemoryEventStore::new();
        let a = store.create(new_event("Same")).await.unwrap();
        let b = store.create(new_event("Same")).await.unwrap();

        assert_ne!(a.slug, b.slug);
        assert_eq!(store.find_by_slug(&b.slug).await.unwrap(), Some(b));
        assert_eq!(store.find_by_slug("same").await.unwrap(), None);
    }
}
