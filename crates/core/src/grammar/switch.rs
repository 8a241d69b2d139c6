//! Switch grammar for a single argument token.
//!
//! ```text
//! switch := prefix name [ turn | separator value ]
//! prefix := ('-' | '/')+
//! name   := (word-char | '.' | '?')+
//! turn   := '+' | '-'
//! separator := ':' | '='
//! value  := rest of the token, possibly empty
//! ```
//!
//! The match is anchored at the start of the token only; anything following
//! the name that is neither a turn nor a separator is ignored.

use serde::Serialize;

/// Boolean marker trailing a switch name (`-verbose+`, `-verbose-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Turn {
    /// `+`
    #[serde(rename = "+")]
    On,
    /// `-`
    #[serde(rename = "-")]
    Off,
}

impl Turn {
    /// The marker as it appears on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Turn::On => "+",
            Turn::Off => "-",
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Turn::On),
            '-' => Some(Turn::Off),
            _ => None,
        }
    }
}

/// The parts of a token that matched the switch grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchMatch<'a> {
    /// Number of prefix characters; doubles as the namespace id.
    pub prefix_len: usize,
    /// Switch name without prefix or suffix.
    pub name: &'a str,
    /// Turn marker, when present.
    pub turn: Option<Turn>,
    /// Text after `:` or `=`, when a separator is present.
    pub value: Option<&'a str>,
}

fn is_prefix_char(c: char) -> bool {
    c == '-' || c == '/'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '?'
}

/// Match `token` against the switch grammar.
///
/// Returns `None` for positional tokens.
pub fn match_switch(token: &str) -> Option<SwitchMatch<'_>> {
    let prefix_len = token.len() - token.trim_start_matches(is_prefix_char).len();
    if prefix_len == 0 {
        return None;
    }
    let rest = &token[prefix_len..];
    let name_len = rest.len() - rest.trim_start_matches(is_name_char).len();
    if name_len == 0 {
        return None;
    }
    let (name, tail) = rest.split_at(name_len);

    let mut chars = tail.chars();
    let (turn, value) = match chars.next() {
        Some(c @ ('+' | '-')) => (Turn::from_char(c), None),
        Some(':' | '=') => (None, Some(chars.as_str())),
        _ => (None, None),
    };
    Some(SwitchMatch {
        prefix_len,
        name,
        turn,
        value,
    })
}

/// Separators accepted after a prefix-less key in a map source.
pub const MAP_PAIR_SEPARATORS: &[char] = &[':', '='];

/// Separators accepted after a prefix-less key in a nested object line.
///
/// `:` is excluded so that drive paths and URLs stay positional.
pub const MEMBER_PAIR_SEPARATORS: &[char] = &['='];

/// Rewrite a prefix-less `key=value` (or `key:value`) pair as a switch.
///
/// The rewrite applies only when the key is followed by one of
/// `separators`; the rewritten token lands in namespace 1. Tokens that
/// already are switches, or whose key is not followed by an accepted
/// separator, yield `None`.
pub fn pair_as_switch(token: &str, separators: &[char]) -> Option<String> {
    if match_switch(token).is_some() {
        return None;
    }
    let candidate = format!("-{token}");
    let matched = match_switch(&candidate)?;
    matched.value?;
    let separator = token[matched.name.len()..].chars().next()?;
    separators.contains(&separator).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(token: &str) -> SwitchMatch<'_> {
        match_switch(token).unwrap_or_else(|| panic!("{token} should be a switch"))
    }

    #[test]
    fn bare_flag() {
        let s = m("-verbose");
        assert_eq!((s.prefix_len, s.name, s.turn, s.value), (1, "verbose", None, None));
    }

    #[test]
    fn turn_markers() {
        assert_eq!(m("-v+").turn, Some(Turn::On));
        assert_eq!(m("/v-").turn, Some(Turn::Off));
    }

    #[test]
    fn separators_capture_the_rest() {
        assert_eq!(m("-out:a=b:c").value, Some("a=b:c"));
        assert_eq!(m("--out=").value, Some(""));
        assert_eq!(m("--out=").prefix_len, 2);
    }

    #[test]
    fn name_allows_dots_and_question_marks() {
        assert_eq!(m("-log.level:3").name, "log.level");
        assert_eq!(m("/?").name, "?");
    }

    #[test]
    fn mixed_prefix_counts_every_char() {
        assert_eq!(m("-/-x").prefix_len, 3);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        let s = m("/usr/bin");
        assert_eq!((s.name, s.turn, s.value), ("usr", None, None));
    }

    #[test]
    fn positional_tokens() {
        assert!(match_switch("value").is_none());
        assert!(match_switch("-").is_none());
        assert!(match_switch("--").is_none());
        assert!(match_switch("-:x").is_none());
        assert!(match_switch("").is_none());
    }

    #[test]
    fn pairs_gain_a_prefix() {
        assert_eq!(pair_as_switch("a=1", MAP_PAIR_SEPARATORS).as_deref(), Some("-a=1"));
        assert_eq!(pair_as_switch("k:v w", MAP_PAIR_SEPARATORS).as_deref(), Some("-k:v w"));
        assert_eq!(pair_as_switch("-a=1", MAP_PAIR_SEPARATORS), None);
        assert_eq!(pair_as_switch("plain", MAP_PAIR_SEPARATORS), None);
        assert_eq!(pair_as_switch("=1", MAP_PAIR_SEPARATORS), None);
    }

    #[test]
    fn member_pairs_leave_paths_and_urls_alone() {
        assert_eq!(pair_as_switch("x=1", MEMBER_PAIR_SEPARATORS).as_deref(), Some("-x=1"));
        assert_eq!(pair_as_switch("C:\\tmp\\a.txt", MEMBER_PAIR_SEPARATORS), None);
        assert_eq!(pair_as_switch("http://x/y", MEMBER_PAIR_SEPARATORS), None);
        assert_eq!(pair_as_switch("http://x/y?a=b", MEMBER_PAIR_SEPARATORS), None);
    }
}
