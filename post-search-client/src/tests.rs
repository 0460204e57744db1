use crate::{Error, Order, Post, PostClient, PostProvider, SearchOptions, SortColumn};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn post(id: i64, likes: i64, popularity: f64, reads: i64, tags: &[&str]) -> Post {
    Post::new(
        id,
        format!("author {id}"),
        id % 3,
        likes,
        popularity,
        reads,
        tags.iter().map(|tag| tag.to_string()).collect(),
    )
}

/// In-memory provider with optional per-tag latency and failures.
#[derive(Default)]
struct StaticProvider {
    posts: HashMap<String, Vec<Post>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl StaticProvider {
    fn with_tag(mut self, tag: &str, posts: Vec<Post>) -> Self {
        self.posts.insert(tag.to_string(), posts);
        self
    }

    fn with_delay(mut self, tag: &str, delay: Duration) -> Self {
        self.delays.insert(tag.to_string(), delay);
        self
    }

    fn failing(mut self, tag: &str) -> Self {
        self.failing.insert(tag.to_string());
        self
    }
}

#[async_trait]
impl PostProvider for StaticProvider {
    async fn fetch_tag(&self, tag: &str) -> Result<Vec<Post>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(tag) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(tag) {
            return Err(Error::Request {
                tag: tag.to_string(),
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(self.posts.get(tag).cloned().unwrap_or_default())
    }
}

fn sample_provider() -> StaticProvider {
    StaticProvider::default()
        .with_tag(
            "tech",
            vec![
                post(1, 960, 0.13, 50361, &["tech", "health"]),
                post(4, 728, 0.88, 19645, &["tech", "science"]),
                post(2, 469, 0.68, 90406, &["tech", "history"]),
            ],
        )
        .with_tag(
            "history",
            vec![
                post(2, 469, 0.68, 90406, &["tech", "history"]),
                post(8, 735, 0.76, 8504, &["history"]),
            ],
        )
        .with_tag("science", vec![post(4, 728, 0.88, 19645, &["tech", "science"])])
}

fn client(provider: StaticProvider) -> (PostClient, Arc<StaticProvider>) {
    let provider = Arc::new(provider);
    let client = PostClient::new(provider.clone(), Duration::from_secs(5));
    (client, provider)
}

fn ids(posts: &[Post]) -> Vec<i64> {
    posts.iter().map(Post::id).collect()
}

#[tokio::test]
async fn test_result_is_union_of_tags_without_duplicates() {
    let (client, provider) = client(sample_provider());
    let options = SearchOptions::parse(Some("tech,history,science"), None, None).unwrap();

    let posts = client.search(&options).await.unwrap();

    assert_eq!(ids(&posts), vec![1, 2, 4, 8]);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_sorted_by_requested_column_and_direction() {
    let (client, _) = client(sample_provider());

    let options = SearchOptions::parse(Some("tech,history"), Some("likes"), Some("desc")).unwrap();
    let posts = client.search(&options).await.unwrap();
    assert_eq!(ids(&posts), vec![1, 8, 4, 2]);

    let options = SearchOptions::parse(Some("tech,history"), Some("popularity"), Some("asc")).unwrap();
    let posts = client.search(&options).await.unwrap();
    assert_eq!(ids(&posts), vec![1, 2, 8, 4]);

    let options = SearchOptions::parse(Some("tech,history"), Some("reads"), None).unwrap();
    let posts = client.search(&options).await.unwrap();
    assert_eq!(ids(&posts), vec![8, 4, 1, 2]);
}

#[tokio::test]
async fn test_unknown_tag_yields_empty_result() {
    let (client, _) = client(sample_provider());
    let options = SearchOptions::new(vec!["cooking".into()], SortColumn::Id, Order::Ascending).unwrap();

    let posts = client.search(&options).await.unwrap();

    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_single_failing_tag_fails_the_search() {
    let (client, _) = client(sample_provider().failing("history"));
    let options = SearchOptions::parse(Some("tech,history,science"), None, None).unwrap();

    let err = client.search(&options).await.unwrap_err();

    assert_eq!(err.tag(), Some("history"));
    assert_eq!(err.to_string(), "request for tag 'history' failed: connection reset by peer");
}

#[tokio::test]
async fn test_failure_cancels_slow_siblings() {
    let provider = sample_provider()
        .failing("history")
        .with_delay("tech", Duration::from_secs(30));
    let (client, provider) = client(provider);
    let options = SearchOptions::parse(Some("tech,history"), None, None).unwrap();

    let started = std::time::Instant::now();
    let err = client.search(&options).await.unwrap_err();

    assert!(matches!(err, Error::Request { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
    // Both calls were issued, only the failing one ran to completion.
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(provider.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_calls_run_concurrently() {
    let provider = sample_provider()
        .with_delay("tech", Duration::from_millis(300))
        .with_delay("history", Duration::from_millis(300))
        .with_delay("science", Duration::from_millis(300));
    let (client, _) = client(provider);
    let options = SearchOptions::parse(Some("tech,history,science"), None, None).unwrap();

    let started = std::time::Instant::now();
    client.search(&options).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(850));
}

#[tokio::test]
async fn test_fanout_deadline() {
    let provider = Arc::new(sample_provider().with_delay("history", Duration::from_secs(30)));
    let client = PostClient::new(provider, Duration::from_millis(100));
    let options = SearchOptions::parse(Some("tech,history"), None, None).unwrap();

    let err = client.search(&options).await.unwrap_err();

    assert!(matches!(err, Error::Deadline(_)));
}
