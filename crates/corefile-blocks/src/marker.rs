//! Managed region detection.
//!
//! A single forward scan pairs the first line containing the begin marker
//! with the first line at or after it containing the end marker. A line
//! holding both markers is a complete region on its own. A begin marker with
//! no end marker after it is never trusted.

use std::ops::RangeInclusive;

/// Inclusive line range `[begin, end]` of a managed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedRegion {
    /// Index of the line holding the begin marker
    pub begin: usize,
    /// Index of the line holding the end marker
    pub end: usize,
}

impl ManagedRegion {
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.begin..=self.end
    }

    /// True when both markers share one line.
    pub fn is_single_line(&self) -> bool {
        self.begin == self.end
    }
}

/// Locate the managed region in `lines`.
///
/// Markers are matched as substrings, so surrounding whitespace or
/// indentation on a marker line is ignored.
pub fn locate_region<S: AsRef<str>>(lines: &[S], begin: &str, end: &str) -> Option<ManagedRegion> {
    let mut begin_index = None;

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match begin_index {
            None => {
                if !line.contains(begin) {
                    continue;
                }
                if line.contains(end) {
                    return Some(ManagedRegion {
                        begin: index,
                        end: index,
                    });
                }
                begin_index = Some(index);
            }
            Some(start) => {
                if line.contains(end) {
                    return Some(ManagedRegion {
                        begin: start,
                        end: index,
                    });
                }
            }
        }
    }

    if let Some(index) = begin_index {
        tracing::debug!(line = index, "Ignoring unterminated managed region");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEGIN: &str = "# BEGIN managed";
    const END: &str = "# END managed";

    #[test]
    fn finds_simple_region() {
        let lines = ["a", BEGIN, "rule", END, "b"];
        assert_eq!(
            locate_region(&lines, BEGIN, END),
            Some(ManagedRegion { begin: 1, end: 3 })
        );
    }

    #[test]
    fn both_markers_on_one_line() {
        let lines = ["a", "# BEGIN managed# END managed", "b"];
        let region = locate_region(&lines, BEGIN, END).unwrap();
        assert!(region.is_single_line());
        assert_eq!(region.begin, 1);
    }

    #[test]
    fn unterminated_region_is_not_found() {
        let lines = ["a", BEGIN, "rule"];
        assert_eq!(locate_region(&lines, BEGIN, END), None);
    }

    #[test]
    fn end_before_begin_is_ignored() {
        let lines = [END, "a", BEGIN, "b", END];
        assert_eq!(
            locate_region(&lines, BEGIN, END),
            Some(ManagedRegion { begin: 2, end: 4 })
        );
    }

    #[test]
    fn first_complete_pair_wins() {
        let lines = [BEGIN, "x", BEGIN, "y", END, "z", END];
        assert_eq!(
            locate_region(&lines, BEGIN, END),
            Some(ManagedRegion { begin: 0, end: 4 })
        );
    }

    #[test]
    fn indented_markers_match() {
        let lines = ["    # BEGIN managed  ", "\t# END managed"];
        assert_eq!(
            locate_region(&lines, BEGIN, END),
            Some(ManagedRegion { begin: 0, end: 1 })
        );
    }

    #[test]
    fn no_markers() {
        let lines: [&str; 0] = [];
        assert_eq!(locate_region(&lines, BEGIN, END), None);
    }
}
