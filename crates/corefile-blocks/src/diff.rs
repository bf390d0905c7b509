//! Line diff between a document and its merged form

use similar::{ChangeTag, TextDiff};

/// Summary of the line changes a merge would make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// Lines present only in the new document
    pub inserted: usize,
    /// Lines present only in the old document
    pub removed: usize,
    unified: String,
}

impl LineDiff {
    /// Compare two document texts line by line.
    pub fn compute(old: &str, new: &str) -> Self {
        let diff = TextDiff::from_lines(old, new);

        let mut inserted = 0;
        let mut removed = 0;
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => inserted += 1,
                ChangeTag::Delete => removed += 1,
                ChangeTag::Equal => {}
            }
        }

        let unified = diff
            .unified_diff()
            .context_radius(3)
            .header("current", "merged")
            .to_string();

        Self {
            inserted,
            removed,
            unified,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.removed == 0
    }

    /// Unified diff text, empty when nothing changed.
    pub fn unified(&self) -> &str {
        if self.is_empty() { "" } else { &self.unified }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_have_no_changes() {
        let diff = LineDiff::compute("a\nb\n", "a\nb\n");
        assert!(diff.is_empty());
        assert_eq!(diff.unified(), "");
    }

    #[test]
    fn counts_inserted_and_removed_lines() {
        let diff = LineDiff::compute("a\nold\nb\n", "a\nnew1\nnew2\nb\n");
        assert_eq!(diff.inserted, 2);
        assert_eq!(diff.removed, 1);
        assert!(diff.unified().contains("-old"));
        assert!(diff.unified().contains("+new1"));
        assert!(diff.unified().starts_with("--- current\n+++ merged\n"));
    }
}
