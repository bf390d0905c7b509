//! Block merging.
//!
//! [`merge`] writes a freshly rendered rule set into the managed region of a
//! Corefile. The region is rewritten in place when it exists; otherwise a new
//! region is inserted after the anchor directive's block, or appended to the
//! end of the document when no usable anchor exists. Lines outside the region
//! are copied verbatim.
//!
//! A stray begin marker (one with no end marker after it) is never treated as
//! a region. A new region that would land after such a marker is placed
//! directly before it instead, so the next scan pairs the new markers with
//! each other and the stray lines stay untouched.

use std::ops::Range;

use tracing::debug;

use crate::anchor::resolve_anchor;
use crate::document::Document;
use crate::marker::{ManagedRegion, locate_region};
use crate::render::{Rule, render_rules};
use crate::vocabulary::Vocabulary;

/// Where the managed region ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An existing region was rewritten in place
    Replaced(ManagedRegion),
    /// A new region was inserted before this line index of the input
    Anchored(usize),
    /// A new region was appended after the existing content
    Appended,
    /// A new region was inserted before the stray begin marker at this line
    /// index of the input
    BeforeStrayMarker(usize),
}

/// Result of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// The normalized output document
    pub text: String,
    /// How the region was placed
    pub placement: Placement,
    /// Whether the auxiliary directive line was added
    pub auxiliary_injected: bool,
    /// Number of rules written into the region
    pub rule_count: usize,
}

/// Merge `rules` into `document`, returning the new document text.
///
/// Merging never fails: malformed markers or braces fall back to a defined
/// placement. Identical inputs always produce identical output, and merging
/// the output again with the same rules returns it unchanged.
pub fn merge(document: &str, rules: &[Rule], excluded: &[String], vocabulary: &Vocabulary) -> String {
    merge_with_report(document, rules, excluded, vocabulary).text
}

/// Like [`merge`], also reporting how the region was placed.
pub fn merge_with_report(
    document: &str,
    rules: &[Rule],
    excluded: &[String],
    vocabulary: &Vocabulary,
) -> Merged {
    let rendered = render_rules(rules, excluded, vocabulary);
    let source = Document::parse(document);

    let region = region_lines(&rendered.text, vocabulary);
    let region_len = region.len();
    let (mut lines, region_start, placement) = splice(source, region, vocabulary);

    let auxiliary_injected = rendered.guarded
        && inject_auxiliary(&mut lines, region_start..region_start + region_len, vocabulary);

    debug!(
        rules = rules.len(),
        guarded = rendered.guarded,
        auxiliary_injected,
        ?placement,
        "Merged managed region"
    );

    Merged {
        text: normalize(&lines),
        placement,
        auxiliary_injected,
        rule_count: rules.len(),
    }
}

/// Lines of the managed region: begin marker, rules, end marker.
fn region_lines(rendered: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let mut region = vec![vocabulary.begin().to_string()];
    let rules = rendered.trim();
    if !rules.is_empty() {
        region.extend(rules.lines().map(str::to_string));
    }
    region.push(vocabulary.end().to_string());
    region
}

/// Place `region` into `source`, returning the new lines and the index of
/// the region's begin marker within them.
fn splice(
    source: Document,
    region: Vec<String>,
    vocabulary: &Vocabulary,
) -> (Vec<String>, usize, Placement) {
    if let Some(found) = locate_region(source.lines(), vocabulary.begin(), vocabulary.end()) {
        let mut lines = source.into_lines();
        lines.splice(found.lines(), region);
        return (lines, found.begin, Placement::Replaced(found));
    }

    // With no complete region, every begin marker is stray.
    let stray = first_begin(source.lines(), vocabulary);

    if let Some(anchor) = resolve_anchor(source.lines(), &vocabulary.anchor) {
        let (index, placement) = match stray {
            Some(stray) if stray < anchor => (stray, Placement::BeforeStrayMarker(stray)),
            _ => (anchor, Placement::Anchored(anchor)),
        };
        let mut lines = source.into_lines();
        lines.splice(index..index, region);
        return (lines, index, placement);
    }

    let existing = source.to_text();
    let existing = existing.trim();
    let mut lines: Vec<String> = if existing.is_empty() {
        Vec::new()
    } else {
        existing.split('\n').map(str::to_string).collect()
    };

    match (first_begin(&lines, vocabulary), stray) {
        (Some(index), Some(stray)) => {
            lines.splice(index..index, region);
            (lines, index, Placement::BeforeStrayMarker(stray))
        }
        _ => {
            let start = lines.len();
            lines.extend(region);
            (lines, start, Placement::Appended)
        }
    }
}

fn first_begin<S: AsRef<str>>(lines: &[S], vocabulary: &Vocabulary) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.as_ref().contains(vocabulary.begin()))
}

/// Insert the auxiliary directive line before the region unless the
/// directive already appears on some line outside it.
fn inject_auxiliary(lines: &mut Vec<String>, region: Range<usize>, vocabulary: &Vocabulary) -> bool {
    let present = lines
        .iter()
        .enumerate()
        .any(|(index, line)| !region.contains(&index) && line.contains(&vocabulary.auxiliary));
    if present {
        return false;
    }
    lines.insert(region.start, vocabulary.auxiliary_line.clone());
    true
}

/// Join lines, trim the whole document and end it with exactly one newline.
fn normalize(lines: &[String]) -> String {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
