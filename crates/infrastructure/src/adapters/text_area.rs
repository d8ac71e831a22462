//! Plain text area buffer
//!
//! Models a text area whose displayed value catches up with edits only on
//! the next render. Caret moves and focus requested before that render are
//! queued and applied by [`TextAreaBuffer::settle`].

use applymail_application::ports::EditableBuffer;
use applymail_domain::Selection;

/// A plain text buffer addressed by character offsets.
#[derive(Debug, Clone)]
pub struct TextAreaBuffer {
    value: String,
    selection: Selection<usize>,
    mounted: bool,
    focused: bool,
    pending_caret: Option<usize>,
    pending_focus: bool,
}

impl TextAreaBuffer {
    /// Creates a mounted buffer with the caret at the end of `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.chars().count();
        Self {
            value,
            selection: Selection::caret(end),
            mounted: true,
            focused: false,
            pending_caret: None,
            pending_focus: false,
        }
    }

    /// Creates an empty buffer that is not mounted yet.
    #[must_use]
    pub fn unmounted() -> Self {
        Self {
            mounted: false,
            ..Self::new("")
        }
    }

    /// Marks the buffer as mounted.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Returns true once mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of characters in the text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// The displayed selection.
    #[must_use]
    pub const fn current_selection(&self) -> Selection<usize> {
        self.selection
    }

    /// Returns true if the buffer holds keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Selects a range, clamped to the text.
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.char_len();
        self.selection = Selection::new(anchor.min(len), head.min(len));
    }

    /// Returns true while a caret move or focus waits for the next render.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending_caret.is_some() || self.pending_focus
    }

    /// Runs the render step: applies queued focus and caret moves now that
    /// the displayed value matches the last edit.
    pub fn settle(&mut self) {
        if std::mem::take(&mut self.pending_focus) {
            self.focused = true;
        }
        if let Some(caret) = self.pending_caret.take() {
            let caret = caret.min(self.char_len());
            self.selection = Selection::caret(caret);
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

impl EditableBuffer for TextAreaBuffer {
    type Position = usize;

    fn selection(&self) -> Option<Selection<usize>> {
        self.mounted.then_some(self.selection)
    }

    fn replace_range(&mut self, range: Selection<usize>, text: &str) {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        self.value.replace_range(start..end, text);
        // Replacing the value puts the displayed caret at the end.
        self.selection = Selection::caret(self.char_len());
    }

    fn caret_after(&self, start: usize, text: &str) -> usize {
        start + text.chars().count()
    }

    fn set_caret(&mut self, position: usize) {
        self.pending_caret = Some(position);
    }

    fn focus(&mut self) {
        self.pending_focus = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use applymail_application::insert_token;

    #[test]
    fn test_insert_at_caret() {
        let mut buffer = TextAreaBuffer::new("Hello ");
        buffer.select(6, 6);

        let caret = insert_token(&mut buffer, "{position}");
        assert_eq!(caret, Some(16));
        assert_eq!(buffer.value(), "Hello {position}");

        buffer.settle();
        assert_eq!(buffer.current_selection(), Selection::caret(16));
        assert!(buffer.is_focused());
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buffer = TextAreaBuffer::new("Hello world");
        buffer.select(11, 6);

        insert_token(&mut buffer, "{companyName}");
        buffer.settle();
        assert_eq!(buffer.value(), "Hello {companyName}");
        assert_eq!(buffer.current_selection(), Selection::caret(19));
    }

    #[test]
    fn test_caret_waits_for_render() {
        let mut buffer = TextAreaBuffer::new("Dear , thanks");
        buffer.select(5, 5);

        insert_token(&mut buffer, "{contactPerson}");
        assert!(buffer.has_pending());
        assert!(!buffer.is_focused());
        assert_eq!(buffer.current_selection(), Selection::caret(28));

        buffer.settle();
        assert!(!buffer.has_pending());
        assert_eq!(buffer.current_selection(), Selection::caret(20));
        assert_eq!(buffer.value(), "Dear {contactPerson}, thanks");
    }

    #[test]
    fn test_offsets_count_characters() {
        let mut buffer = TextAreaBuffer::new("Grüße ");
        insert_token(&mut buffer, "{userName}");
        buffer.settle();
        assert_eq!(buffer.value(), "Grüße {userName}");
        assert_eq!(buffer.current_selection(), Selection::caret(16));
    }

    #[test]
    fn test_unmounted_is_noop() {
        let mut buffer = TextAreaBuffer::unmounted();
        assert_eq!(insert_token(&mut buffer, "{x}"), None);
        assert_eq!(buffer.value(), "");
        assert!(!buffer.has_pending());

        buffer.mount();
        assert_eq!(insert_token(&mut buffer, "{x}"), Some(3));
    }
}
