use getset::Getters;
use log::info;
use post_search_client::{Hatchways, PostClient, PostProvider};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;

use super::config::Config;

/// Long-lived state shared by every route. Created once at startup.
#[derive(Getters)]
#[get = "pub"]
pub struct Context {
    post_client: PostClient,
    cache: Arc<CacheStore>,
    /// Parsed from `cache.ttl`; zero disables storing.
    cache_ttl: Duration,
    config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let upstream = config.upstream();
        let provider = Hatchways::new(upstream.base_url().clone(), upstream.request_timeout());
        info!(
            "Using upstream {} (request timeout {:?}, fan-out deadline {:?})",
            upstream.base_url(),
            upstream.request_timeout(),
            upstream.fanout_timeout()
        );
        Self::with_provider(config, Arc::new(provider))
    }

    pub fn with_provider(config: Config, provider: Arc<dyn PostProvider>) -> Self {
        let post_client = PostClient::new(provider, config.upstream().fanout_timeout());
        let cache_ttl = config.cache().ttl_duration();
        if cache_ttl.is_zero() {
            info!("Response caching disabled");
        } else {
            info!("Initialized response cache (TTL: {:?})", cache_ttl);
        }

        Self {
            post_client,
            cache: Arc::new(CacheStore::new()),
            cache_ttl,
            config,
        }
    }
}

pub type ContextPointer = Arc<Context>;
