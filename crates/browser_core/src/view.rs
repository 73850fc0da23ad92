use shared::domain::{Intent, Post, PostId};

use crate::selection::Selection;

/// Prompt shown inside the delete confirmation overlay.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// Actions offered on every listed row, in display order.
pub const ROW_ACTIONS: [Intent; 3] = [Intent::View, Intent::Edit, Intent::Delete];

/// One line of the post table: id, title, and the action affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: PostId,
    pub title: String,
    pub actions: [Intent; 3],
}

/// The modal content derived from an open selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Read-only details of the selected post.
    View { post: Post },
    /// Editable fields pre-populated from the selection snapshot.
    Edit {
        id: PostId,
        title: String,
        body: String,
    },
    /// Yes/no confirmation gate before a delete commits.
    ConfirmDelete { id: PostId, title: String },
}

impl Overlay {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::View { .. } => "View Post",
            Self::Edit { .. } => "Edit Post",
            Self::ConfirmDelete { .. } => "Delete Post",
        }
    }
}

/// Everything a front end needs to draw one frame of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub rows: Vec<PostRow>,
    pub overlay: Option<Overlay>,
}

/// Projects the collection and the current selection into a display model.
/// Pure: no state is read besides the two arguments and none is written, so
/// equal inputs always produce an equal model.
pub fn render(posts: &[Post], selection: &Selection) -> ViewModel {
    let rows = posts
        .iter()
        .map(|post| PostRow {
            id: post.id,
            title: post.title.clone(),
            actions: ROW_ACTIONS,
        })
        .collect();

    let overlay = match selection {
        Selection::Closed => None,
        Selection::Open { post, intent } => Some(match intent {
            Intent::View => Overlay::View { post: post.clone() },
            Intent::Edit => Overlay::Edit {
                id: post.id,
                title: post.title.clone(),
                body: post.body.clone(),
            },
            Intent::Delete => Overlay::ConfirmDelete {
                id: post.id,
                title: post.title.clone(),
            },
        }),
    };

    ViewModel { rows, overlay }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str, body: &str) -> Post {
        Post {
            id: PostId(id),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn rows_mirror_collection_order_and_carry_all_actions() {
        let posts = vec![post(2, "second", "b"), post(1, "first", "a")];
        let model = render(&posts, &Selection::Closed);

        assert_eq!(model.rows.len(), 2);
        assert_eq!(model.rows[0].id, PostId(2));
        assert_eq!(model.rows[0].title, "second");
        assert_eq!(model.rows[1].id, PostId(1));
        for row in &model.rows {
            assert_eq!(row.actions, [Intent::View, Intent::Edit, Intent::Delete]);
        }
        assert!(model.overlay.is_none());
    }

    #[test]
    fn view_intent_projects_the_full_post() {
        let selected = post(5, "hello", "world");
        let selection = Selection::Open {
            post: selected.clone(),
            intent: Intent::View,
        };
        let model = render(&[], &selection);

        let overlay = model.overlay.expect("overlay");
        assert_eq!(overlay.heading(), "View Post");
        assert_eq!(overlay, Overlay::View { post: selected });
    }

    #[test]
    fn edit_intent_projects_editable_fields() {
        let selection = Selection::Open {
            post: post(5, "hello", "world"),
            intent: Intent::Edit,
        };
        let model = render(&[], &selection);

        let overlay = model.overlay.expect("overlay");
        assert_eq!(overlay.heading(), "Edit Post");
        assert_eq!(
            overlay,
            Overlay::Edit {
                id: PostId(5),
                title: "hello".to_string(),
                body: "world".to_string(),
            }
        );
    }

    #[test]
    fn delete_intent_projects_the_confirmation_gate() {
        let selection = Selection::Open {
            post: post(5, "hello", "world"),
            intent: Intent::Delete,
        };
        let model = render(&[], &selection);

        let overlay = model.overlay.expect("overlay");
        assert_eq!(overlay.heading(), "Delete Post");
        assert_eq!(
            overlay,
            Overlay::ConfirmDelete {
                id: PostId(5),
                title: "hello".to_string(),
            }
        );
    }

    #[test]
    fn overlay_renders_from_the_snapshot_not_the_collection() {
        // The selected post has been removed from the collection; the
        // overlay still shows the snapshot taken at open time.
        let selection = Selection::Open {
            post: post(9, "gone", "from the list"),
            intent: Intent::View,
        };
        let model = render(&[post(1, "still here", "a")], &selection);

        assert_eq!(model.rows.len(), 1);
        assert_eq!(
            model.overlay,
            Some(Overlay::View {
                post: post(9, "gone", "from the list"),
            })
        );
    }

    #[test]
    fn projection_is_deterministic() {
        let posts = vec![post(1, "a", "x"), post(2, "b", "y")];
        let selection = Selection::Open {
            post: post(2, "b", "y"),
            intent: Intent::Delete,
        };

        assert_eq!(render(&posts, &selection), render(&posts, &selection));
    }
}
