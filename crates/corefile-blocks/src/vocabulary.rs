//! Literals that shape a merge: markers, anchor, auxiliary directive and
//! rule/guard text.
//!
//! Every literal is passed to the merge explicitly so the same algorithm can
//! manage any marker vocabulary. [`Vocabulary::default`] carries the values a
//! stock CoreDNS deployment expects.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default begin marker for the managed region
pub const DEFAULT_BEGIN_MARKER: &str = "# BEGIN IngressReconciler managed rules";
/// Default end marker for the managed region
pub const DEFAULT_END_MARKER: &str = "# END IngressReconciler managed rules";

/// The textual vocabulary used by a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Line marking the start of the managed region
    pub begin_marker: String,
    /// Line marking the end of the managed region
    pub end_marker: String,
    /// Directive after whose block a new region is inserted
    pub anchor: String,
    /// Directive required when rules are wrapped in a guard expression
    pub auxiliary: String,
    /// Full line injected when the auxiliary directive is missing
    pub auxiliary_line: String,
    /// Label consulted by the guard expression
    pub guard_label: String,
    /// Prefix of every rendered rule line
    pub rule_prefix: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            begin_marker: DEFAULT_BEGIN_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            anchor: "kubernetes".to_string(),
            auxiliary: "metadata".to_string(),
            auxiliary_line: "    metadata".to_string(),
            guard_label: "kubernetes/client-namespace".to_string(),
            rule_prefix: "rewrite name".to_string(),
        }
    }
}

impl Vocabulary {
    /// Begin marker with insignificant surrounding whitespace removed.
    pub fn begin(&self) -> &str {
        self.begin_marker.trim()
    }

    /// End marker with insignificant surrounding whitespace removed.
    pub fn end(&self) -> &str {
        self.end_marker.trim()
    }

    /// Check that the vocabulary can delimit a region unambiguously.
    ///
    /// # Errors
    ///
    /// Returns an error when a literal is blank or spans several lines, or
    /// when one marker contains the other.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&'static str, &str); 7] = [
            ("begin_marker", &self.begin_marker),
            ("end_marker", &self.end_marker),
            ("anchor", &self.anchor),
            ("auxiliary", &self.auxiliary),
            ("auxiliary_line", &self.auxiliary_line),
            ("guard_label", &self.guard_label),
            ("rule_prefix", &self.rule_prefix),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::EmptyLiteral { field });
            }
            if value.contains('\n') || value.contains('\r') {
                return Err(Error::MultiLineLiteral { field });
            }
        }

        let (begin, end) = (self.begin(), self.end());
        if begin.contains(end) || end.contains(begin) {
            return Err(Error::OverlappingMarkers {
                begin: begin.to_string(),
                end: end.to_string(),
            });
        }

        Ok(())
    }
}
