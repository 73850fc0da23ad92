use shared::domain::{Intent, PostId};
use tracing::{debug, info, warn};

use crate::selection::{Selection, SelectionController};
use crate::store::PostStore;
use crate::BrowserError;

/// Commits the delete the open confirmation gate is asking about: drops the
/// post from the collection and closes the modal as one step. There is no
/// suspension point between the two, so no caller can observe a selection
/// still pointing at a removed post.
///
/// A duplicate confirm that arrives after the commit already ran (post gone,
/// modal closed) is tolerated as a no-op, the same way `PostStore::remove`
/// tolerates a double removal. Every other mismatch between the requested id
/// and the current selection is a caller bug and fails fast.
///
/// Returns whether the store actually dropped a post.
pub fn confirm_delete(
    store: &mut PostStore,
    selection: &mut SelectionController,
    id: PostId,
) -> Result<bool, BrowserError> {
    let delete_pending = matches!(
        selection.current(),
        Selection::Open { post, intent: Intent::Delete } if post.id == id
    );
    if delete_pending {
        let removed = store.remove(id);
        selection.close();
        if removed {
            info!(post_id = id.0, "mutation: delete committed");
        } else {
            warn!(
                post_id = id.0,
                "mutation: delete confirmed for an already-removed post"
            );
        }
        return Ok(removed);
    }

    if matches!(selection.current(), Selection::Closed) && !store.contains(id) {
        debug!(post_id = id.0, "mutation: duplicate delete confirm ignored");
        return Ok(false);
    }

    Err(BrowserError::SelectionMismatch {
        post_id: id.0,
        expected: Intent::Delete,
        found: selection.current().describe(),
    })
}

/// Accepts the edit form and closes the modal without writing the edited
/// values anywhere. The remote source offers no write endpoint, so the
/// collection keeps the fetched title and body; turning this into a real
/// write-back is a deliberate behavior change, not a fix.
pub fn save_edit(
    selection: &mut SelectionController,
    id: PostId,
    new_title: &str,
    new_body: &str,
) -> Result<(), BrowserError> {
    let edit_pending = matches!(
        selection.current(),
        Selection::Open { post, intent: Intent::Edit } if post.id == id
    );
    if !edit_pending {
        return Err(BrowserError::SelectionMismatch {
            post_id: id.0,
            expected: Intent::Edit,
            found: selection.current().describe(),
        });
    }

    info!(
        post_id = id.0,
        title_len = new_title.len(),
        body_len = new_body.len(),
        "mutation: edit accepted, collection left unchanged"
    );
    selection.close();
    Ok(())
}
