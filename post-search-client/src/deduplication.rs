use crate::Post;
use std::collections::HashMap;

/// Merges per-tag result sets into one set unique by post id.
///
/// Sets must be fed in a fixed order (the order of the requested tags) after
/// every fetch has completed. When an id shows up again the later copy
/// replaces the earlier one, but keeps the position where the id was first
/// seen, so the merge order is deterministic.
#[derive(Debug, Default)]
pub struct PostSet {
    posts: Vec<Post>,
    index: HashMap<i64, usize>,
}

impl PostSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, post: Post) {
        match self.index.get(&post.id()) {
            Some(&slot) => self.posts[slot] = post,
            None => {
                self.index.insert(post.id(), self.posts.len());
                self.posts.push(post);
            }
        }
    }

    pub fn extend(&mut self, posts: impl IntoIterator<Item = Post>) {
        for post in posts {
            self.insert(post);
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Unique posts in merge order.
    pub fn into_vec(self) -> Vec<Post> {
        self.posts
    }
}

impl FromIterator<Vec<Post>> for PostSet {
    fn from_iter<I: IntoIterator<Item = Vec<Post>>>(iter: I) -> Self {
        let mut set = PostSet::new();
        for posts in iter {
            set.extend(posts);
        }
        set
    }
}
