use redis::{aio::ConnectionManager, Client};

/// Соединение с Redis, переподключается само при обрывах.
#[derive(Clone)]
pub struct RedisClient {
    pub conn: ConnectionManager,
}

impl RedisClient {
    pub async fn connect(redis_url: &str) -> redis::RedisResult<Self> {
        let client = Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(RedisClient { conn })
    }
}
