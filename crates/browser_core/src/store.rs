use std::collections::HashSet;

use shared::domain::{Post, PostId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("post collection is already loaded")]
    AlreadyLoaded,
    #[error("load batch contains post id {post_id} more than once")]
    DuplicateId { post_id: i64 },
}

/// Holds the post collection for the lifetime of one browser view.
///
/// The collection is populated exactly once by [`PostStore::load`] and only
/// shrinks afterwards, through [`PostStore::remove`]. Insertion order of the
/// loaded batch is preserved.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    loaded: bool,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the empty collection with a fetched batch, all or nothing.
    /// A second load is rejected and leaves the first batch untouched.
    pub fn load(&mut self, posts: Vec<Post>) -> Result<(), StoreError> {
        if self.loaded {
            return Err(StoreError::AlreadyLoaded);
        }
        let mut seen = HashSet::with_capacity(posts.len());
        for post in &posts {
            if !seen.insert(post.id) {
                return Err(StoreError::DuplicateId { post_id: post.id.0 });
            }
        }
        self.posts = posts;
        self.loaded = true;
        Ok(())
    }

    /// Drops the post with this id, reporting whether anything was removed.
    /// Removing an id that is already gone is a tolerated no-op, so two
    /// racing removals of the same id both complete cleanly.
    pub fn remove(&mut self, id: PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        self.posts.len() != before
    }

    /// The current collection, valid until the next mutation.
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// True once a load succeeded, even if removals emptied the list since.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
