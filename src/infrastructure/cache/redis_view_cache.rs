use anyhow::Context;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::dashboard::{PathRevalidator, ViewCache};

/// Rendered pages in Redis: one hash per route path, one field per variant.
///
/// Revalidating a path drops the whole hash and bumps a per-path generation
/// counter, so every variant of the route (e.g. each search query and page) is
/// re-rendered on the next request and renders started before it are refused.
#[derive(Clone)]
pub struct RedisViewCache {
  conn: ConnectionManager,
  ttl_seconds: u64,
}

// KEYS: generation, page hash. ARGV: expected generation, variant, html, ttl.
const STORE_IF_CURRENT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[1]) or '0')
if current ~= tonumber(ARGV[1]) then
  return 0
end
redis.call('HSET', KEYS[2], ARGV[2], ARGV[3])
redis.call('EXPIRE', KEYS[2], ARGV[4])
return 1
"#;

impl RedisViewCache {
  pub fn new(conn: ConnectionManager, ttl_seconds: u64) -> Self {
    Self { conn, ttl_seconds }
  }

  fn key(path: &str) -> String {
    format!("view:{}", path)
  }

  fn generation_key(path: &str) -> String {
    format!("view:gen:{}", path)
  }

  async fn try_get(&self, path: &str, variant: &str) -> anyhow::Result<Option<String>> {
    let mut conn = self.conn.clone();
    let html: Option<String> = conn
      .hget(Self::key(path), variant)
      .await
      .with_context(|| format!("HGET {}", Self::key(path)))?;
    Ok(html)
  }

  async fn try_generation(&self, path: &str) -> anyhow::Result<u64> {
    let mut conn = self.conn.clone();
    let key = Self::generation_key(path);
    let generation: Option<u64> = conn
      .get(&key)
      .await
      .with_context(|| format!("GET {}", key))?;
    Ok(generation.unwrap_or(0))
  }

  /// Returns whether the page was stored.
  async fn try_put(
    &self,
    path: &str,
    variant: &str,
    generation: u64,
    html: &str,
  ) -> anyhow::Result<bool> {
    let mut conn = self.conn.clone();
    let key = Self::key(path);
    let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);

    let script = redis::Script::new(STORE_IF_CURRENT);
    let stored: i64 = script
      .key(Self::generation_key(path))
      .key(&key)
      .arg(generation)
      .arg(variant)
      .arg(html)
      .arg(ttl)
      .invoke_async(&mut conn)
      .await
      .with_context(|| format!("HSET {}", key))?;
    Ok(stored == 1)
  }

  async fn try_revalidate(&self, path: &str) -> anyhow::Result<()> {
    let mut conn = self.conn.clone();
    let key = Self::key(path);

    let _: () = redis::pipe()
      .atomic()
      .del(&key)
      .ignore()
      .incr(Self::generation_key(path), 1)
      .ignore()
      .query_async(&mut conn)
      .await
      .with_context(|| format!("DEL {}", key))?;
    Ok(())
  }
}

#[async_trait]
impl PathRevalidator for RedisViewCache {
  async fn revalidate_path(&self, path: &str) {
    match self.try_revalidate(path).await {
      Ok(()) => tracing::debug!("Revalidated {}", path),
      Err(e) => tracing::warn!("Failed to revalidate {}: {:#}", path, e),
    }
  }
}

#[async_trait]
impl ViewCache for RedisViewCache {
  async fn get(&self, path: &str, variant: &str) -> Option<String> {
    self
      .try_get(path, variant)
      .await
      .unwrap_or_else(|e| {
        tracing::warn!("View cache read failed: {:#}", e);
        None
      })
  }

  async fn generation(&self, path: &str) -> Option<u64> {
    self
      .try_generation(path)
      .await
      .map_err(|e| tracing::warn!("View cache generation read failed: {:#}", e))
      .ok()
  }

  async fn put(&self, path: &str, variant: &str, generation: u64, html: &str) {
    match self.try_put(path, variant, generation, html).await {
      Ok(true) => {}
      Ok(false) => tracing::debug!("Dropping render of {} from generation {}", path, generation),
      Err(e) => tracing::warn!("View cache write failed: {:#}", e),
    }
  }
}
