use crate::redis_client::RedisClient;
use tracing::info;

pub mod events;

/// Кеш ответов API для страниц событий. Без Redis просто ничего не кеширует.
#[derive(Clone, Default)]
pub struct CacheService {
    redis: Option<RedisClient>,
}

impl CacheService {
    pub fn new(redis: RedisClient) -> Self {
        info!("Event page cache enabled (Redis)");
        Self { redis: Some(redis) }
    }

    pub fn disabled() -> Self {
        info!("Event page cache disabled");
        Self { redis: None }
    }

    #[cfg(test)]
    pub(crate) fn is_enabled(&self) -> bool {
        self.redis.is_some()
    }
}
