use tracing::info;

use crate::error::EventError;
use crate::models::{Event, EventForm};
use crate::services::media::MediaHost;
use crate::store::EventStore;

/// Создание события: проверка формы -> загрузка изображения -> одна запись в хранилище.
///
/// Шаги строго последовательные, без повторов. Если запись не удалась,
/// уже загруженное изображение остаётся на хостинге.
pub async fn create_event(
    store: &dyn EventStore,
    media: &dyn MediaHost,
    form: EventForm,
) -> Result<Event, EventError> {
    let (draft, image) = form.into_parts()?;

    let image_url = media.upload_image(image).await?;
    info!("Image uploaded: {}", image_url);

    let event = store.create(draft.with_image(image_url)).await?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;
    use crate::services::media::ImageUpload;
    use crate::store::InMemoryEventStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeMedia {
        uploads: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl MediaHost for FakeMedia {
        async fn upload_image(&self, image: ImageUpload) -> Result<String, MediaError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MediaError::MissingUrl);
            }
            Ok(format!("https://media.test/DevEvent/{}", image.file_name))
        }
    }

    fn form(with_image: bool, agenda: &str) -> EventForm {
        let mut form = EventForm::default();
        for (name, value) in [
            ("title", "Launch"),
            ("description", "Product launch"),
            ("overview", "What we ship"),
            ("date", "2026-11-03"),
            ("time", "10:00"),
            ("location", "Online"),
            ("mode", "online"),
            ("audience", "Everyone"),
            ("organizer", "Dev Community"),
            ("agenda", agenda),
            ("tags", r#"["tech"]"#),
        ] {
            form.insert_text(name, value.to_string()).unwrap();
        }
        if with_image {
            form.set_image(ImageUpload {
                file_name: "launch.png".to_string(),
                content_type: None,
                bytes: vec![1, 2, 3],
            })
            .unwrap();
        }
        form
    }

    #[tokio::test]
    async fn stores_event_with_uploaded_url() {
        let store = InMemoryEventStore::new();
        let media = FakeMedia::default();

        let event = create_event(&store, &media, form(true, r#"["Intro","Demo"]"#))
            .await
            .unwrap();

        assert_eq!(event.image, "https://media.test/DevEvent/launch.png");
        assert_eq!(event.agenda, vec!["Intro", "Demo"]);
        assert_eq!(store.list().await.unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_media_host() {
        let store = InMemoryEventStore::new();
        let media = FakeMedia::default();

        let missing_image = create_event(&store, &media, form(false, r#"["Intro"]"#)).await;
        assert!(matches!(missing_image, Err(EventError::MissingImage)));

        let bad_agenda = create_event(&store, &media, form(true, "Intro, Demo")).await;
        assert!(matches!(bad_agenda, Err(EventError::InvalidList("agenda"))));

        assert_eq!(media.uploads.load(Ordering::SeqCst), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_stores_nothing() {
        let store = InMemoryEventStore::new();
        let media = FakeMedia {
            fail: true,
            ..Default::default()
        };

        let result = create_event(&store, &media, form(true, r#"["Intro"]"#)).await;
        assert!(matches!(result, Err(EventError::Media(_))));
        assert!(store.list().await.unwrap().is_empty());
    }
}
