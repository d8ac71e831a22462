//! Editable buffer port

use std::fmt::Debug;

use applymail_domain::Selection;

/// Capability interface over an editable text buffer, such as a plain text
/// area or a structured code editor.
///
/// Token insertion is written once against this trait.
pub trait EditableBuffer {
    /// How the buffer addresses positions (character offset, line/column...).
    type Position: Copy + Ord + Debug;

    /// Returns the current selection, or `None` if the buffer is not mounted yet.
    fn selection(&self) -> Option<Selection<Self::Position>>;

    /// Replaces the given range with `text` as a single edit.
    fn replace_range(&mut self, range: Selection<Self::Position>, text: &str);

    /// Returns the position just after `text` once inserted at `start`.
    fn caret_after(&self, start: Self::Position, text: &str) -> Self::Position;

    /// Moves the caret.
    ///
    /// Buffers whose displayed value updates asynchronously must apply this
    /// only after the value from the last edit is displayed.
    fn set_caret(&mut self, position: Self::Position);

    /// Gives the buffer keyboard focus.
    fn focus(&mut self);
}
