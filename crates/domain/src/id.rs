//! ID generation utilities.

use uuid::Uuid;

/// Generates a new draft identifier for a template that has not been
/// persisted yet.
///
/// The backend assigns its own identifier on create; this one only keys the
/// draft locally. UUID v7 keeps drafts sortable by creation time.
#[must_use]
pub fn generate_draft_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_draft_id_format() {
        let id = generate_draft_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_draft_id_uniqueness() {
        assert_ne!(generate_draft_id(), generate_draft_id());
    }
}
