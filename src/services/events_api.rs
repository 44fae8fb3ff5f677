use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::Event;

/// Ошибки получения события по HTTP (всё, кроме "не найдено").
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch event: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to fetch event: HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to decode event payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    event: Option<Event>,
}

/// HTTP-клиент к собственному API событий, которым пользуется страница события.
#[derive(Clone)]
pub struct EventsApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl EventsApiClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// `GET {base_url}/api/events/{slug}`.
    ///
    /// 404 и ответ без `event` дают `Ok(None)`; любой другой сбой - `Err`.
    /// Возвращает сырое тело вместе с событием, чтобы его можно было положить в кеш.
    pub async fn fetch_event(&self, slug: &str) -> Result<Option<(Event, String)>, FetchError> {
        let response = self
            .http_client
            .get(format!("{}/api/events/{}", self.base_url, slug))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(decode_event(&body)?.map(|event| (event, body)))
    }
}

/// Достаёт событие из конверта `{message, event}`.
pub fn decode_event(body: &str) -> Result<Option<Event>, serde_json::Error> {
    let envelope: EventEnvelope = serde_json::from_str(body)?;
    Ok(envelope.event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_json() -> serde_json::Value {
        serde_json::json!({
            "id": "6d1c3a52-58a4-4b53-9d8f-0c6a3c1f2b10",
            "slug": "launch-6d1c3a52",
            "title": "Launch",
            "description": "Product launch",
            "overview": "What we ship",
            "image": "https://res.cloudinary.com/demo/launch.png",
            "date": "2026-11-03",
            "time": "09:30",
            "location": "Almaty",
            "mode": "hybrid",
            "audience": "Developers",
            "organizer": "Dev Community",
            "agenda": ["Intro", "Demo"],
            "tags": ["tech"],
            "createdAt": "2026-10-16T08:00:00Z",
            "updatedAt": "2026-10-16T08:00:00Z"
        })
    }

    #[tokio::test]
    async fn fetches_event_by_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/launch-6d1c3a52"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Event fetched successfully",
                "event": event_json()
            })))
            .mount(&server)
            .await;

        let client = EventsApiClient::new(&server.uri()).unwrap();
        let (event, _) = client.fetch_event("launch-6d1c3a52").await.unwrap().unwrap();
        assert_eq!(event.title, "Launch");
        assert_eq!(event.agenda, vec!["Intro", "Demo"]);
    }

    #[tokio::test]
    async fn not_found_and_empty_payload_are_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/events/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "ok"
            })))
            .mount(&server)
            .await;

        let client = EventsApiClient::new(&server.uri()).unwrap();
        assert!(client.fetch_event("missing").await.unwrap().is_none());
        assert!(client.fetch_event("empty").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_and_bad_payload_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut broken = event_json();
        broken["agenda"] = serde_json::json!("[\"Intro\"");
        Mock::given(method("GET"))
            .and(path("/api/events/broken"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "event": broken })),
            )
            .mount(&server)
            .await;

        let client = EventsApiClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.fetch_event("boom").await,
            Err(FetchError::Status(s)) if s.as_u16() == 500
        ));
        assert!(matches!(
            client.fetch_event("broken").await,
            Err(FetchError::Decode(_))
        ));
    }
}
