//! media.rs
//!
//! Загрузка изображений событий на внешний медиа-хостинг (Cloudinary).
//!
//! Загрузка выполняется одним подписанным запросом без повторов: если
//! хостинг ответил ошибкой, она уходит вызывающему как есть.

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{error, info};

use crate::config::MediaConfig;
use crate::error::MediaError;

/// Файл изображения из формы, целиком в памяти.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Внешний хостинг, который принимает изображение и возвращает постоянный URL.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload_image(&self, image: ImageUpload) -> Result<String, MediaError>;
}

/// Ответ Cloudinary на загрузку.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorMessage,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorMessage {
    message: String,
}

/// Клиент подписанной загрузки Cloudinary.
#[derive(Clone)]
pub struct CloudinaryClient {
    /// Адрес эндпоинта загрузки: `{api_url}/{cloud_name}/image/upload`.
    upload_url: String,
    api_key: String,
    api_secret: String,
    /// Папка, в которую складываются все изображения событий.
    folder: String,
    http_client: reqwest::Client,
}

impl CloudinaryClient {
    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            upload_url: format!("{}/{}/image/upload", config.api_url, config.cloud_name),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
            http_client,
        })
    }

    /// Подпись запроса: sha256 от отсортированных параметров и секрета.
    fn sign(&self, timestamp: i64) -> String {
        let to_sign = format!(
            "folder={}&timestamp={}{}",
            self.folder, timestamp, self.api_secret
        );
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload_image(&self, image: ImageUpload) -> Result<String, MediaError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(timestamp);
        let size = image.bytes.len();

        let mut file = reqwest::multipart::Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(mime) = image.content_type.as_deref() {
            file = file.mime_str(mime)?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.folder.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        info!("Uploading image to media host: folder={}, bytes={}", self.folder, size);

        let response = self
            .http_client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Cloudinary отдаёт {"error":{"message":...}}, но тело может быть любым
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CloudinaryErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            error!("Media host rejected upload: status={}, message={}", status, message);
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response.json().await?;
        uploaded
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or(MediaError::MissingUrl)
    }
}
