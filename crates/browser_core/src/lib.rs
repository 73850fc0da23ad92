use shared::domain::{Intent, Post, PostId};
use thiserror::Error;
use tracing::info;

pub mod mutation;
pub mod remote;
pub mod selection;
pub mod store;
pub mod view;

pub use remote::{FetchError, HttpPostSource, PostSource};
pub use selection::{Selection, SelectionController};
pub use store::{PostStore, StoreError};
pub use view::{Overlay, PostRow, ViewModel, DELETE_PROMPT};

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to load the post collection: {0}")]
    Fetch(#[from] FetchError),
    #[error("post collection rejected the load: {0}")]
    Store(#[from] StoreError),
    /// The id does not resolve to a post in the collection. A front end
    /// rendering rows from the same collection cannot produce this; hitting
    /// it means the caller invented or held a stale id.
    #[error("post {post_id} is not present in the collection")]
    UnknownPost { post_id: i64 },
    #[error("selection is not open on post {post_id} with {expected:?} intent ({found})")]
    SelectionMismatch {
        post_id: i64,
        expected: Intent,
        found: String,
    },
}

/// One browser view's worth of state: the loaded collection plus the modal
/// selection. Owned by whoever drives the view; no locks, no shared
/// references, every call runs to completion before the next one starts.
#[derive(Debug, Default)]
pub struct PostBrowser {
    store: PostStore,
    selection: SelectionController,
}

impl PostBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot bootstrap: awaits the source's fetch and loads the result.
    /// On a fetch failure the collection stays empty and unloaded; the error
    /// is returned exactly once for the caller to report.
    pub async fn load_from(&mut self, source: &dyn PostSource) -> Result<usize, BrowserError> {
        let posts = source.fetch_all().await?;
        self.apply_loaded(posts)
    }

    /// Loads an already-fetched batch. Lets a front end run the fetch on a
    /// background task and marshal only the completed result back onto the
    /// thread that owns this browser.
    pub fn apply_loaded(&mut self, posts: Vec<Post>) -> Result<usize, BrowserError> {
        let count = posts.len();
        self.store.load(posts)?;
        info!(count, "browser: post collection loaded");
        Ok(count)
    }

    /// Opens the modal on the post with this id, snapshotting it together
    /// with `intent`. The post must currently be in the collection.
    pub fn open(&mut self, id: PostId, intent: Intent) -> Result<(), BrowserError> {
        let post = self
            .store
            .get(id)
            .cloned()
            .ok_or(BrowserError::UnknownPost { post_id: id.0 })?;
        info!(post_id = id.0, intent = ?intent, "browser: selection opened");
        self.selection.open(post, intent);
        Ok(())
    }

    /// Closes the modal; a no-op when it is already closed.
    pub fn close(&mut self) {
        self.selection.close();
    }

    pub fn confirm_delete(&mut self, id: PostId) -> Result<bool, BrowserError> {
        mutation::confirm_delete(&mut self.store, &mut self.selection, id)
    }

    pub fn save_edit(
        &mut self,
        id: PostId,
        new_title: &str,
        new_body: &str,
    ) -> Result<(), BrowserError> {
        mutation::save_edit(&mut self.selection, id, new_title, new_body)
    }

    pub fn posts(&self) -> &[Post] {
        self.store.all()
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    /// Projects the current state into a display model for one frame.
    pub fn view_model(&self) -> ViewModel {
        view::render(self.store.all(), self.selection.current())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
