//! Token classification into named switches and positional values.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::grammar::{Turn, match_switch};
use crate::options::NameComparison;

/// A token that did not match the switch grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalArgument {
    /// The token, verbatim.
    pub value: String,
    /// Position among all classified tokens.
    pub absolute_index: usize,
}

/// A token that matched the switch grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedArgument {
    /// Switch name as written (not case-folded).
    pub name: String,
    /// Prefix length of the switch.
    pub namespace: usize,
    /// Turn marker, when the switch ended in `+` or `-`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<Turn>,
    /// Explicit value following `:` or `=`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Position among all classified tokens.
    pub absolute_index: usize,
}

impl NamedArgument {
    /// The turn text if a turn matched, else the explicit value, else `None`.
    pub fn effective_value(&self) -> Option<&str> {
        match self.turn {
            Some(turn) => Some(turn.as_str()),
            None => self.value.as_deref(),
        }
    }

    /// `true` for bare flags and explicit values; for turns, only `+`.
    pub fn is_on(&self) -> bool {
        self.turn.is_none_or(|turn| turn == Turn::On)
    }
}

/// One classified token, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    /// A switch.
    Named(NamedArgument),
    /// A positional value.
    Positional(PositionalArgument),
}

impl Entry {
    /// Position among all classified tokens.
    pub fn absolute_index(&self) -> usize {
        match self {
            Entry::Named(n) => n.absolute_index,
            Entry::Positional(p) => p.absolute_index,
        }
    }
}

/// Switches of one namespace, keyed by folded name.
///
/// Keeps first-seen order; a repeated name replaces the earlier binding in
/// place.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    args: Vec<NamedArgument>,
    lookup: HashMap<String, usize>,
}

impl NameTable {
    fn insert(&mut self, key: String, arg: NamedArgument) {
        match self.lookup.get(&key) {
            Some(&slot) => self.args[slot] = arg,
            None => {
                self.lookup.insert(key, self.args.len());
                self.args.push(arg);
            }
        }
    }

    /// Binding for an already-folded key.
    pub fn get(&self, key: &str) -> Option<&NamedArgument> {
        self.lookup.get(key).map(|&slot| &self.args[slot])
    }

    /// Current bindings in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, NamedArgument> {
        self.args.iter()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// `true` when no switch was seen in this namespace.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Result of classifying a token sequence.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// Every token in input order; the position equals the absolute index.
    pub entries: Vec<Entry>,
    /// Positional values in input order.
    pub positional: Vec<PositionalArgument>,
    /// Switch tables by namespace id.
    pub named: BTreeMap<usize, NameTable>,
}

/// Classify `tokens` as switches or positional values.
///
/// Blank tokens must already have been removed.
pub fn classify<S: AsRef<str>>(tokens: &[S], comparison: NameComparison) -> Classified {
    let mut out = Classified::default();
    for (absolute_index, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let entry = match match_switch(token) {
            Some(m) => {
                let arg = NamedArgument {
                    name: m.name.to_string(),
                    namespace: m.prefix_len,
                    turn: m.turn,
                    value: m.value.map(str::to_string),
                    absolute_index,
                };
                tracing::trace!(absolute_index, namespace = arg.namespace, name = %arg.name, "named");
                out.named
                    .entry(arg.namespace)
                    .or_default()
                    .insert(comparison.key(m.name), arg.clone());
                Entry::Named(arg)
            }
            None => {
                tracing::trace!(absolute_index, value = token, "positional");
                let arg = PositionalArgument {
                    value: token.to_string(),
                    absolute_index,
                };
                out.positional.push(arg.clone());
                Entry::Positional(arg)
            }
        };
        out.entries.push(entry);
    }
    out
}
