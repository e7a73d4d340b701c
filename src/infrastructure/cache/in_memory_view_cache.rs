use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::dashboard::{PathRevalidator, ViewCache};

struct Entry {
  html: String,
  stored_at: Instant,
}

#[derive(Default)]
struct PathEntries {
  generation: u64,
  variants: HashMap<String, Entry>,
}

/// Process-local view cache, used when no Redis is configured.
pub struct InMemoryViewCache {
  paths: RwLock<HashMap<String, PathEntries>>,
  ttl: Duration,
}

impl InMemoryViewCache {
  pub fn new(ttl: Duration) -> Self {
    Self {
      paths: RwLock::new(HashMap::new()),
      ttl,
    }
  }
}

#[async_trait]
impl PathRevalidator for InMemoryViewCache {
  async fn revalidate_path(&self, path: &str) {
    let mut paths = self.paths.write().await;
    let entries = paths.entry(path.to_string()).or_default();
    entries.generation += 1;
    entries.variants.clear();
    tracing::debug!("Revalidated {} (generation {})", path, entries.generation);
  }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
  async fn get(&self, path: &str, variant: &str) -> Option<String> {
    let paths = self.paths.read().await;
    let entry = paths.get(path)?.variants.get(variant)?;

    if entry.stored_at.elapsed() >= self.ttl {
      return None;
    }
    Some(entry.html.clone())
  }

  async fn generation(&self, path: &str) -> Option<u64> {
    let paths = self.paths.read().await;
    Some(paths.get(path).map_or(0, |entries| entries.generation))
  }

  async fn put(&self, path: &str, variant: &str, generation: u64, html: &str) {
    let mut paths = self.paths.write().await;
    let entries = paths.entry(path.to_string()).or_default();

    if entries.generation != generation {
      tracing::debug!(
        "Dropping render of {} from generation {}, now at {}",
        path,
        generation,
        entries.generation
      );
      return;
    }

    entries.variants.insert(
      variant.to_string(),
      Entry {
        html: html.to_string(),
        stored_at: Instant::now(),
      },
    );
  }
}
