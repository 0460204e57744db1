mod key;
pub mod middleware;
mod store;

pub use key::CacheKey;
pub use middleware::{CacheableRequest, Cached, CapturedResponse, ResponseProducer};
pub use store::{CacheEntry, CacheStats, CacheStore};

use std::time::Duration;

/// Parse a human readable TTL such as `1h` or `90s`.
///
/// Anything that does not parse yields zero, which disables caching.
pub fn parse_ttl(raw: &str) -> Duration {
    match humantime::parse_duration(raw.trim()) {
        Ok(ttl) => ttl,
        Err(err) => {
            log::warn!("Cache ttl '{}' is not a valid duration ({}); caching disabled", raw, err);
            Duration::ZERO
        }
    }
}
