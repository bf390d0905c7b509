//! Rule rendering.
//!
//! Turns ordered `(pattern, target)` pairs into rewrite directive lines,
//! optionally wrapped in an `expression` guard that disables the rules for
//! clients whose label carries one of the excluded values:
//!
//! ```text
//! expression "!(label('kubernetes/client-namespace') in ['kube-system'])" {
//!     rewrite name app.example.com ingress.svc
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;

/// Indentation applied to rule lines inside a guard block.
const GUARD_INDENT: &str = "    ";

/// A single rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Name being rewritten (usually a routed host)
    pub pattern: String,
    /// Name the query is rewritten to
    pub target: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
        }
    }

    /// The literal directive line for this rule.
    pub fn line(&self, vocabulary: &Vocabulary) -> String {
        format!(
            "{} {} {}",
            vocabulary.rule_prefix.trim(),
            self.pattern,
            self.target
        )
    }
}

/// Output of [`render_rules`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedRules {
    /// Rendered rule text, one directive per line, newline terminated.
    /// Empty when there were no rules.
    pub text: String,
    /// Whether the rules were wrapped in a guard expression
    pub guarded: bool,
}

impl RenderedRules {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Render rules in order, wrapping them in a guard when `excluded` is
/// non-empty.
///
/// No guard is emitted for an empty rule list. Duplicate excluded values are
/// collapsed, keeping their first position.
pub fn render_rules(rules: &[Rule], excluded: &[String], vocabulary: &Vocabulary) -> RenderedRules {
    let mut text = String::new();
    for rule in rules {
        text.push_str(&rule.line(vocabulary));
        text.push('\n');
    }

    if text.is_empty() || excluded.is_empty() {
        return RenderedRules {
            text,
            guarded: false,
        };
    }

    let mut body = String::new();
    for line in text.trim().lines() {
        body.push_str(GUARD_INDENT);
        body.push_str(line.trim());
        body.push('\n');
    }

    RenderedRules {
        text: format!(
            "expression \"{}\" {{\n{}}}\n",
            guard_expression(excluded, vocabulary),
            body
        ),
        guarded: true,
    }
}

/// Boolean expression that is false when the guard label is excluded.
fn guard_expression(excluded: &[String], vocabulary: &Vocabulary) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(excluded.len());
    for value in excluded {
        if !seen.contains(&value.as_str()) {
            seen.push(value);
        }
    }
    let quoted: Vec<String> = seen.iter().map(|v| format!("'{v}'")).collect();
    format!(
        "!(label('{}') in [{}])",
        vocabulary.guard_label,
        quoted.join(", ")
    )
}
