use crate::cache::CacheService;
use redis::AsyncCommands;
use tracing::warn;

/// Окно повторной проверки страницы события, секунды.
pub const EVENT_REVALIDATE_SECS: u64 = 60;

fn event_key(slug: &str) -> String {
    format!("event:detail:{}", slug)
}

impl CacheService {
    // Тело ответа API по слагу, если оно ещё не устарело
    pub async fn get_cached_event(&self, slug: &str) -> Option<String> {
        let redis = self.redis.as_ref()?;
        let mut conn = redis.conn.clone();
        match conn.get::<_, Option<String>>(event_key(slug)).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read event cache for {}: {:?}", slug, e);
                None
            }
        }
    }

    // Кешируем только успешные ответы: "не найдено" всегда перепроверяется
    pub async fn cache_event(&self, slug: &str, body: &str) {
        let Some(redis) = self.redis.as_ref() else {
            return;
        };
        let mut conn = redis.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(event_key(slug), body, EVENT_REVALIDATE_SECS)
            .await
        {
            warn!("Failed to cache event {}: {:?}", slug, e);
        }
    }
}
