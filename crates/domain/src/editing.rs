//! Caret and selection positions inside editable buffers.

use serde::{Deserialize, Serialize};

/// A selection between two positions. A collapsed selection is a caret.
///
/// `start` never comes after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection<P> {
    /// First position covered by the selection.
    pub start: P,
    /// Position just past the selection.
    pub end: P,
}

impl<P: Ord + Copy> Selection<P> {
    /// Creates a selection from anchor and head, in either order.
    #[must_use]
    pub fn new(anchor: P, head: P) -> Self {
        if anchor <= head {
            Self {
                start: anchor,
                end: head,
            }
        } else {
            Self {
                start: head,
                end: anchor,
            }
        }
    }

    /// Creates a collapsed selection.
    #[must_use]
    pub const fn caret(at: P) -> Self {
        Self { start: at, end: at }
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A 1-based line/column position, as structured code editors report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePosition {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl LinePosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the caret position just after `text` inserted at `self`.
    ///
    /// Without a line break the caret stays on the same line, `text` columns
    /// further. Otherwise it lands on the last inserted line, one column past
    /// that line's length.
    #[must_use]
    pub fn after_insert(self, text: &str) -> Self {
        let breaks = text.matches('\n').count();
        let last_line = text.rsplit('\n').next().unwrap_or_default();
        let last_len = last_line.chars().count();
        if breaks == 0 {
            Self::new(self.line, self.column + last_len)
        } else {
            Self::new(self.line + breaks, last_len + 1)
        }
    }
}
