use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Ошибки медиа-хостинга (загрузка изображений).
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Media host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Media host response has no secure_url")]
    MissingUrl,
}

/// Ошибки хранилища событий.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Ошибки конвейера создания события: разбор формы, валидация, загрузка, запись.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Image is required")]
    MissingImage,

    #[error("Invalid form data: {0}")]
    Form(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' was submitted more than once")]
    DuplicateField(String),

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{0}' must be a JSON array of strings")]
    InvalidList(&'static str),

    #[error("Field '{field}' has invalid value '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ошибки шаблонов страниц.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(String),
}

impl From<handlebars::RenderError> for ViewError {
    fn from(err: handlebars::RenderError) -> Self {
        ViewError::Template(err.to_string())
    }
}

/// HTTP-ответ об ошибке в формате `{message, error?}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Display) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: &self.message,
            error: self.error.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Любой сбой создания события - 400; отсутствие изображения со своим фиксированным текстом.
impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::MissingImage => ApiError::new(StatusCode::BAD_REQUEST, "Image is required"),
            other => {
                ApiError::new(StatusCode::BAD_REQUEST, "Event creating failed").with_error(other)
            }
        }
    }
}
