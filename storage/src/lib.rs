//! # Storage Layer
//!
//! String key-value storage behind the suggestion cache (Redis, in-memory).

pub mod backend;
pub mod cache;
pub mod memory;
pub mod redis;

pub use backend::KeyValueStore;
pub use cache::CacheStore;
pub use memory::InMemoryStore;
pub use redis::RedisCache;
