pub mod client;
mod deduplication;
mod error;
mod post;
mod search_options;
mod sorting;

#[cfg(test)]
mod tests;

pub use client::hatchways::Hatchways;
pub use client::PostProvider;
pub use deduplication::PostSet;
pub use error::Error;
pub use error::ErrorKind;
use futures::future::try_join_all;
pub use post::Post;
pub use search_options::invalid_option_error::{InvalidOptionError, SearchOption};
pub use search_options::order::Order;
pub use search_options::sort_column::SortColumn;
pub use search_options::SearchOptions;
pub use sorting::sort_posts;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_FANOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Aggregates posts from a [`PostProvider`] across several tags.
#[derive(Clone)]
pub struct PostClient {
    provider: Arc<dyn PostProvider>,
    fanout_timeout: Duration,
}

impl Default for PostClient {
    fn default() -> Self {
        Self::new(Arc::new(Hatchways::default()), DEFAULT_FANOUT_TIMEOUT)
    }
}

impl PostClient {
    pub fn new(provider: Arc<dyn PostProvider>, fanout_timeout: Duration) -> Self {
        Self {
            provider,
            fanout_timeout,
        }
    }

    /// Fetch every tag concurrently, merge the results by post id and order
    /// them as requested.
    ///
    /// The first failing tag fails the whole search and drops the calls still
    /// in flight. The whole fan-out is bounded by the client's deadline.
    pub async fn search(&self, search_options: &SearchOptions) -> Result<Vec<Post>, Error> {
        let start = Instant::now();
        let per_tag = self.fetch_all(search_options.tags()).await?;

        let merged: PostSet = per_tag.into_iter().collect();
        let mut posts = merged.into_vec();
        sort_posts(&mut posts, search_options.sort(), search_options.order());

        log::info!(
            "Aggregated {} posts for tags {:?} sorted by {} {} in {:?}",
            posts.len(),
            search_options.tags(),
            search_options.sort(),
            search_options.order(),
            start.elapsed()
        );
        Ok(posts)
    }

    /// One future per tag, joined before returning. Results come back in tag
    /// order regardless of completion order.
    async fn fetch_all(&self, tags: &[String]) -> Result<Vec<Vec<Post>>, Error> {
        let futures = tags.iter().map(|tag| self.provider.fetch_tag(tag));

        match tokio::time::timeout(self.fanout_timeout, try_join_all(futures)).await {
            Ok(Ok(per_tag)) => Ok(per_tag),
            Ok(Err(err)) => {
                log::warn!("Aggregation failed ({}): {}", err.kind(), err);
                Err(err)
            }
            Err(_) => {
                log::warn!("Aggregation exceeded deadline of {:?}", self.fanout_timeout);
                Err(Error::Deadline(self.fanout_timeout))
            }
        }
    }
}
