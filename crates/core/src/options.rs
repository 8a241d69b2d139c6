//! Configuration for building a [`SwitchIndex`](crate::SwitchIndex).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::response::LineSource;

/// How switch names are compared when they are stored and looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameComparison {
    /// `-Out` and `-out` are the same switch.
    #[default]
    CaseInsensitive,
    /// `-Out` and `-out` are different switches.
    CaseSensitive,
}

impl NameComparison {
    /// Fold `name` into the key used by the backing name map.
    pub fn key(self, name: &str) -> String {
        match self {
            NameComparison::CaseInsensitive => name.to_lowercase(),
            NameComparison::CaseSensitive => name.to_string(),
        }
    }

    /// Compare two names under this policy.
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            NameComparison::CaseInsensitive => a.to_lowercase() == b.to_lowercase(),
            NameComparison::CaseSensitive => a == b,
        }
    }
}

/// Options controlling tokenization and indexing.
///
/// Defaults match the conventional Windows/Unix hybrid style: names compare
/// case-insensitively and `@name` arguments are expanded through the
/// configured [`LineSource`], if any.
#[non_exhaustive]
#[derive(Clone, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Name comparison policy for switch lookup.
    pub comparison: NameComparison,
    /// Leading character that marks a response-file reference.
    pub response_marker: char,
    /// Collaborator used to expand response references.
    #[serde(skip)]
    pub line_source: Option<Arc<dyn LineSource>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comparison: NameComparison::default(),
            response_marker: '@',
            line_source: None,
        }
    }
}

impl ParseOptions {
    /// Use `comparison` for switch names.
    #[must_use]
    pub fn with_comparison(mut self, comparison: NameComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Expand response references through `source`.
    #[must_use]
    pub fn with_line_source(mut self, source: Arc<dyn LineSource>) -> Self {
        self.line_source = Some(source);
        self
    }

    /// Use `marker` instead of `@` to introduce response references.
    #[must_use]
    pub fn with_response_marker(mut self, marker: char) -> Self {
        self.response_marker = marker;
        self
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("comparison", &self.comparison)
            .field("response_marker", &self.response_marker)
            .field("line_source", &self.line_source.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_folds_keys() {
        let cmp = NameComparison::CaseInsensitive;
        assert_eq!(cmp.key("OutPut"), "output");
        assert!(cmp.matches("Verbose", "VERBOSE"));
    }

    #[test]
    fn case_sensitive_keeps_keys() {
        let cmp = NameComparison::CaseSensitive;
        assert_eq!(cmp.key("OutPut"), "OutPut");
        assert!(!cmp.matches("Verbose", "verbose"));
    }

    #[test]
    fn options_round_trip_through_json_without_source() {
        let opts = ParseOptions::default().with_comparison(NameComparison::CaseSensitive);
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("case-sensitive"));
        let back: ParseOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.comparison, NameComparison::CaseSensitive);
        assert_eq!(back.response_marker, '@');
        assert!(back.line_source.is_none());
    }
}
