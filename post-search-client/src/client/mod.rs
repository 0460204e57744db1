pub mod hatchways;

use crate::{Error, Post};
use async_trait::async_trait;

/// A content source that can be queried one tag at a time.
///
/// Implementations perform exactly one outbound call per invocation and never
/// retry; retry and failure policy belong to the caller.
#[async_trait]
pub trait PostProvider: Send + Sync {
    async fn fetch_tag(&self, tag: &str) -> Result<Vec<Post>, Error>;
}
