use shared::domain::{Intent, Post};

/// What the modal is showing right now. `Open` carries a snapshot of the
/// post taken when the modal opened, together with the intent behind it, so
/// the overlay keeps rendering even while the collection mutates underneath.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Closed,
    Open { post: Post, intent: Intent },
}

impl Selection {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Closed => "closed".to_string(),
            Self::Open { post, intent } => {
                format!("open on post {} with {:?} intent", post.id.0, intent)
            }
        }
    }
}

/// Tracks the single modal selection for one browser view.
///
/// Opening takes the post by value, so a selection can only ever be built
/// from a post the caller actually resolved. There is no half-open state to
/// represent and no way to point the modal at nothing.
#[derive(Debug, Default)]
pub struct SelectionController {
    current: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the modal on `post` with `intent`. A prior selection is
    /// replaced outright; the last open wins.
    pub fn open(&mut self, post: Post, intent: Intent) {
        self.current = Selection::Open { post, intent };
    }

    /// Closes the modal. Closing an already-closed selection is a no-op, so
    /// racing close events (backdrop click plus close button) are harmless.
    pub fn close(&mut self) {
        self.current = Selection::Closed;
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }
}
