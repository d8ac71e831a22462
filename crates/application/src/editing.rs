//! Cursor-aware token insertion

use tracing::debug;

use crate::ports::EditableBuffer;

/// Inserts `token` at the buffer's caret, replacing any selection, then puts
/// the caret right after the token and focuses the buffer.
///
/// Returns the new caret position, or `None` when the buffer is not mounted
/// yet, in which case nothing happens.
pub fn insert_token<B>(buffer: &mut B, token: &str) -> Option<B::Position>
where
    B: EditableBuffer + ?Sized,
{
    let Some(selection) = buffer.selection() else {
        debug!(token, "buffer not mounted, skipping insertion");
        return None;
    };

    let caret = buffer.caret_after(selection.start, token);
    buffer.replace_range(selection, token);
    buffer.set_caret(caret);
    buffer.focus();

    debug!(token, ?caret, "inserted token");
    Some(caret)
}
