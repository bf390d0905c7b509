//! Line-oriented view of a Corefile

/// A configuration document as an ordered sequence of lines.
///
/// Lines are split on `\n` only, so a trailing newline yields a final empty
/// line and `\r` characters stay attached to their line. Joining the lines
/// back with `\n` reproduces the source exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split source text into lines.
    pub fn parse(source: &str) -> Self {
        Self {
            lines: source.split('\n').map(str::to_string).collect(),
        }
    }

    /// All lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join lines with `\n`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
