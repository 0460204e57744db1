use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// A single blog post as returned by the upstream source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[getset(get_copy = "pub")]
    id: i64,
    #[getset(get = "pub")]
    author: String,
    #[getset(get_copy = "pub")]
    author_id: i64,
    #[getset(get_copy = "pub")]
    likes: i64,
    #[getset(get_copy = "pub")]
    popularity: f64,
    #[getset(get_copy = "pub")]
    reads: i64,
    #[getset(get = "pub")]
    tags: Vec<String>,
}

impl Post {
    pub fn new(
        id: i64,
        author: String,
        author_id: i64,
        likes: i64,
        popularity: f64,
        reads: i64,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            author,
            author_id,
            likes,
            popularity,
            reads,
            tags,
        }
    }
}

/// Envelope used by the upstream for every tag query.
#[derive(Debug, Deserialize)]
pub(crate) struct PostsPacket {
    #[serde(default)]
    pub posts: Vec<Post>,
}
