//! Core domain types for the migration: source records and derived entities.

// ---------------------------------------------------------------------------
// Source records
// ---------------------------------------------------------------------------

/// A category row from the source export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Source category id, unique within one export.
    pub id: i64,
    /// Source parent category id. Informational only; destination categories
    /// are created flat.
    pub parent: i64,
    /// Category name. Also the join key against destination categories.
    pub name: String,
}

/// A question row from the source export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Question title.
    pub name: String,
    /// Source category id this question belongs to.
    pub category: i64,
    /// Source question id.
    pub id: i64,
    /// View count in the source system.
    pub views: i64,
}

/// An answer row from the source export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Source question id this answer belongs to.
    pub question: i64,
    /// Answer body (HTML as exported).
    pub body: String,
}

// ---------------------------------------------------------------------------
// Derived entities
// ---------------------------------------------------------------------------

/// Links a source category to the destination category of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMapping {
    /// Source category id, or `0` when no source category has this name.
    pub source_id: i64,
    /// Destination category id.
    pub destination_id: String,
    /// Shared category name.
    pub name: String,
}

impl CategoryMapping {
    /// Whether this destination category has no source counterpart.
    pub fn is_orphan(&self) -> bool {
        self.source_id == 0
    }
}

/// A question joined with its answer and destination categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article title (question name).
    pub name: String,
    /// Article body (first matching answer, empty when none).
    pub text: String,
    /// Destination category ids, at most one by construction.
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphan_mapping_detection() {
        let orphan = CategoryMapping {
            source_id: 0,
            destination_id: "abc".into(),
            name: "Legacy".into(),
        };
        assert!(orphan.is_orphan());

        let mapped = CategoryMapping {
            source_id: 7,
            ..orphan
        };
        assert!(!mapped.is_orphan());
    }
}
