mod in_memory_view_cache;
mod redis_view_cache;

pub use in_memory_view_cache::InMemoryViewCache;
pub use redis_view_cache::RedisViewCache;
