use axum::extract::{FromRequest, Multipart, Request};
use tracing::warn;

use crate::error::{ApiError, EventError};
use crate::models::event::{EventForm, IMAGE_FIELD};
use crate::services::media::ImageUpload;

/// Multipart-форма создания события, разобранная в `EventForm`.
///
/// Изображение читается в память целиком. Часть `image` без имени файла
/// или с пустым телом считается отсутствующей.
#[derive(Debug)]
pub struct EventSubmission(pub EventForm);

impl<S> FromRequest<S> for EventSubmission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await.map_err(|e| {
            warn!("Rejected event submission: {}", e.body_text());
            ApiError::from(EventError::Form(e.body_text()))
        })?;

        read_event_form(multipart).await.map(EventSubmission).map_err(|e| {
            warn!("Rejected event submission: {}", e);
            ApiError::from(e)
        })
    }
}

async fn read_event_form(mut multipart: Multipart) -> Result<EventForm, EventError> {
    let mut form = EventForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| EventError::Form(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| EventError::Form(e.body_text()))?;

            if let Some(file_name) = file_name.filter(|_| !bytes.is_empty()) {
                form.set_image(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                })?;
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| EventError::Form(e.body_text()))?;
        form.insert_text(&name, value)?;
    }

    Ok(form)
}
