use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::EventError;
use crate::services::media::ImageUpload;

/// Имя файловой части формы с изображением.
pub const IMAGE_FIELD: &str = "image";

/// Текстовые поля, которые принимаются из формы как есть (после trim).
pub const TEXT_FIELDS: [&str; 9] = [
    "title",
    "description",
    "overview",
    "date",
    "time",
    "location",
    "mode",
    "audience",
    "organizer",
];

/// Поля со списками: в форме приходят как JSON-массивы строк.
pub const LIST_FIELDS: [&str; 2] = ["agenda", "tags"];

pub const EVENT_MODES: [&str; 3] = ["online", "offline", "hybrid"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y"];
const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub mode: String,
    pub audience: String,
    pub organizer: String,
    pub agenda: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Проверенные данные события, готовые к загрузке изображения.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(length(min = 1, max = 500))]
    pub overview: String,
    pub date: String,
    pub time: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(custom(function = "validate_mode"))]
    pub mode: String,
    #[validate(length(min = 1))]
    pub audience: String,
    #[validate(length(min = 1))]
    pub organizer: String,
    #[validate(length(min = 1), custom(function = "validate_items"))]
    pub agenda: Vec<String>,
    #[validate(length(min = 1), custom(function = "validate_items"))]
    pub tags: Vec<String>,
}

/// Событие с URL изображения: то, что записывается в хранилище.
/// `id`, `slug` и временные метки назначает хранилище.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub draft: EventDraft,
    pub image: String,
}

impl EventDraft {
    pub fn with_image(self, image: String) -> NewEvent {
        NewEvent { draft: self, image }
    }
}

impl NewEvent {
    /// Собирает запись так, как её сохраняет хранилище.
    pub fn into_event(self, id: Uuid, now: DateTime<Utc>) -> Event {
        let d = self.draft;
        Event {
            id,
            slug: event_slug(&d.title, id),
            title: d.title,
            description: d.description,
            overview: d.overview,
            image: self.image,
            date: d.date,
            time: d.time,
            location: d.location,
            mode: d.mode,
            audience: d.audience,
            organizer: d.organizer,
            agenda: d.agenda,
            tags: d.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Сырые части multipart-формы: только разрешённые поля, без повторов.
#[derive(Debug, Default)]
pub struct EventForm {
    fields: BTreeMap<&'static str, String>,
    image: Option<ImageUpload>,
}

impl EventForm {
    pub fn insert_text(&mut self, name: &str, value: String) -> Result<(), EventError> {
        let key = TEXT_FIELDS
            .iter()
            .chain(LIST_FIELDS.iter())
            .find(|f| **f == name)
            .copied()
            .ok_or_else(|| EventError::UnknownField(name.to_string()))?;

        if self.fields.insert(key, value).is_some() {
            return Err(EventError::DuplicateField(name.to_string()));
        }
        Ok(())
    }

    pub fn set_image(&mut self, upload: ImageUpload) -> Result<(), EventError> {
        if self.image.is_some() {
            return Err(EventError::DuplicateField(IMAGE_FIELD.to_string()));
        }
        self.image = Some(upload);
        Ok(())
    }

    /// Проверяет форму и отделяет изображение от остальных полей.
    pub fn into_parts(mut self) -> Result<(EventDraft, ImageUpload), EventError> {
        let image = self.image.take().ok_or(EventError::MissingImage)?;

        let date = self.text("date")?;
        let time = self.text("time")?;
        let draft = EventDraft {
            title: self.text("title")?,
            description: self.text("description")?,
            overview: self.text("overview")?,
            date: normalize_date(&date)?,
            time: normalize_time(&time)?,
            location: self.text("location")?,
            mode: self.text("mode")?.to_lowercase(),
            audience: self.text("audience")?,
            organizer: self.text("organizer")?,
            agenda: self.list("agenda")?,
            tags: self.list("tags")?,
        };
        draft.validate()?;

        Ok((draft, image))
    }

    fn text(&mut self, field: &'static str) -> Result<String, EventError> {
        self.fields
            .remove(field)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(EventError::MissingField(field))
    }

    fn list(&mut self, field: &'static str) -> Result<Vec<String>, EventError> {
        let raw = self.text(field)?;
        let items: Vec<String> =
            serde_json::from_str(&raw).map_err(|_| EventError::InvalidList(field))?;
        Ok(items.into_iter().map(|i| i.trim().to_string()).collect())
    }
}

/// Приводит дату к виду `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Result<String, EventError> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| EventError::InvalidValue {
            field: "date",
            value: raw.to_string(),
        })
}

/// Приводит время к 24-часовому виду `HH:MM`.
pub fn normalize_time(raw: &str) -> Result<String, EventError> {
    let raw = raw.trim();
    let upper = raw.to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok())
        .map(|t| t.format("%H:%M").to_string())
        .ok_or_else(|| EventError::InvalidValue {
            field: "time",
            value: raw.to_string(),
        })
}

fn validate_mode(mode: &str) -> Result<(), ValidationError> {
    if EVENT_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(ValidationError::new("mode")
            .with_message("mode must be one of: online, offline, hybrid".into()))
    }
}

fn validate_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|i| i.is_empty()) {
        return Err(ValidationError::new("items").with_message("list items must not be blank".into()));
    }
    Ok(())
}

/// Заголовок в нижнем регистре, всё кроме латиницы и цифр схлопывается в `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Слаг события: заголовок + первые 8 hex-символов id, чтобы одинаковые заголовки не сталкивались.
pub fn event_slug(title: &str, id: Uuid) -> String {
    let simple = id.simple().to_string();
    let suffix = &simple[..8];
    let base = slugify(title);
    if base.is_empty() {
        suffix.to_string()
    } else {
        format!("{}-{}", base, suffix)
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
