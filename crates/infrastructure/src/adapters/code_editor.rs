//! Structured code editor buffer
//!
//! Positions are 1-based line/column pairs. Each replace is one edit on the
//! undo stack, however many characters it inserts.

use applymail_application::ports::EditableBuffer;
use applymail_domain::{LinePosition, Selection};

/// A single undoable replace.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    start: LinePosition,
    removed: String,
    inserted: String,
}

/// A line-based editor buffer with an undo history.
#[derive(Debug, Clone)]
pub struct CodeEditorBuffer {
    text: String,
    selection: Option<Selection<LinePosition>>,
    focused: bool,
    undo_stack: Vec<Edit>,
}

impl CodeEditorBuffer {
    /// Creates a mounted editor with the caret at the start.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: Some(Selection::caret(LinePosition::new(1, 1))),
            focused: false,
            undo_stack: Vec::new(),
        }
    }

    /// Creates an editor that has not initialized yet.
    #[must_use]
    pub fn unmounted() -> Self {
        Self {
            selection: None,
            ..Self::new("")
        }
    }

    /// Marks the editor as initialized, caret at the start.
    pub fn mount(&mut self) {
        if self.selection.is_none() {
            self.selection = Some(Selection::caret(LinePosition::new(1, 1)));
        }
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Returns the given 1-based line.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.text.split('\n').nth(index))
    }

    /// Selects a range. Positions are clamped into the text.
    pub fn select(&mut self, anchor: LinePosition, head: LinePosition) {
        self.selection = Some(Selection::new(self.clamp(anchor), self.clamp(head)));
    }

    /// Returns true if the editor holds keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of edits that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Reverts the last edit and selects the restored text.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(edit) = self.undo_stack.pop() else {
            return false;
        };
        let end = edit.start.after_insert(&edit.inserted);
        self.splice(Selection::new(edit.start, end), &edit.removed);
        self.selection = Some(Selection::new(
            edit.start,
            edit.start.after_insert(&edit.removed),
        ));
        true
    }

    fn clamp(&self, position: LinePosition) -> LinePosition {
        let line = position.line.clamp(1, self.line_count());
        let width = self.line(line).map_or(0, |l| l.chars().count());
        LinePosition::new(line, position.column.clamp(1, width + 1))
    }

    fn byte_offset(&self, position: LinePosition) -> usize {
        let position = self.clamp(position);
        let mut offset = 0;
        for (index, line) in self.text.split('\n').enumerate() {
            if index + 1 == position.line {
                return offset
                    + line
                        .char_indices()
                        .nth(position.column - 1)
                        .map_or(line.len(), |(i, _)| i);
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }

    fn splice(&mut self, range: Selection<LinePosition>, text: &str) -> String {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        let removed = self.text[start..end].to_string();
        self.text.replace_range(start..end, text);
        removed
    }
}

impl EditableBuffer for CodeEditorBuffer {
    type Position = LinePosition;

    fn selection(&self) -> Option<Selection<LinePosition>> {
        self.selection
    }

    fn replace_range(&mut self, range: Selection<LinePosition>, text: &str) {
        let range = Selection::new(self.clamp(range.start), self.clamp(range.end));
        let removed = self.splice(range, text);
        self.undo_stack.push(Edit {
            start: range.start,
            removed,
            inserted: text.to_string(),
        });
    }

    fn caret_after(&self, start: LinePosition, text: &str) -> LinePosition {
        start.after_insert(text)
    }

    fn set_caret(&mut self, position: LinePosition) {
        self.selection = Some(Selection::caret(self.clamp(position)));
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
