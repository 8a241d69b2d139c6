//! The switch index: classified arguments plus lookup and traversal queries.
//!
//! A [`SwitchIndex`] is built once from raw arguments and never changes
//! afterwards, so it can be shared freely between threads and reused for any
//! number of binds.

/// Token classification into named switches and positional values.
pub mod classify;

use std::collections::BTreeMap;

pub use classify::{Classified, Entry, NameTable, NamedArgument, PositionalArgument, classify};

use crate::bind::{Bindable, Binder};
use crate::error::Result;
use crate::grammar::{pair_as_switch, tokenize};
use crate::options::ParseOptions;
use crate::response;

/// Namespace used when a caller does not name one.
pub const DEFAULT_NAMESPACE: usize = 1;

/// Separator between aliases in a lookup key (`"o|out|output"`).
pub const ALIAS_SEPARATOR: char = '|';

/// Classified command-line arguments.
#[derive(Debug, Clone)]
pub struct SwitchIndex {
    raw: Vec<String>,
    entries: Vec<Entry>,
    positional: Vec<PositionalArgument>,
    namespaces: BTreeMap<usize, NameTable>,
    positional_values: Vec<String>,
    named_values: Vec<(String, Option<String>)>,
    options: ParseOptions,
}

impl SwitchIndex {
    /// Index `args` with default options.
    ///
    /// Blank arguments are skipped. Response references (`@name`) need a line
    /// source; see [`SwitchIndex::parse_with`].
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        Self::parse_with(args, ParseOptions::default())
    }

    /// Index `args` with explicit options.
    pub fn parse_with<S: AsRef<str>>(args: &[S], options: ParseOptions) -> Result<Self> {
        let raw: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let tokens = response::expand(&raw, &options)?;
        let Classified {
            entries,
            positional,
            named: namespaces,
        } = classify(&tokens, options.comparison);

        let positional_values = positional.iter().map(|p| p.value.clone()).collect();
        let named_values = namespaces
            .get(&DEFAULT_NAMESPACE)
            .map(|table| {
                table
                    .iter()
                    .map(|n| (n.name.clone(), n.effective_value().map(str::to_string)))
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(
            raw = raw.len(),
            tokens = entries.len(),
            positional = positional.len(),
            namespaces = namespaces.len(),
            "indexed arguments"
        );
        Ok(Self {
            raw,
            entries,
            positional,
            namespaces,
            positional_values,
            named_values,
            options,
        })
    }

    /// Tokenize an embedded command line and index it with this index's
    /// options.
    pub fn parse_embedded(&self, line: &str) -> Result<Self> {
        let tokens = tokenize(line)?;
        Self::parse_with(&tokens, self.options.clone())
    }

    /// Like [`SwitchIndex::parse_embedded`], but prefix-less pairs whose key
    /// is followed by one of `separators` count as namespace-1 switches.
    pub(crate) fn parse_pairs(&self, line: &str, separators: &[char]) -> Result<Self> {
        let tokens: Vec<String> = tokenize(line)?
            .into_iter()
            .map(|t| pair_as_switch(&t, separators).unwrap_or(t))
            .collect();
        Self::parse_with(&tokens, self.options.clone())
    }

    /// Options this index was built with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Arguments exactly as supplied, before expansion.
    pub fn raw_args(&self) -> &[String] {
        &self.raw
    }

    /// Every classified token in input order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Positional values in input order.
    pub fn positional_values(&self) -> &[String] {
        &self.positional_values
    }

    /// `(name, effective value)` for every switch in the default namespace.
    pub fn named_values(&self) -> &[(String, Option<String>)] {
        &self.named_values
    }

    /// Namespace ids that hold at least one switch, ascending.
    pub fn namespaces(&self) -> impl Iterator<Item = usize> + '_ {
        self.namespaces.keys().copied()
    }

    /// Current switch bindings of `namespace` in first-seen order.
    pub fn named_in(&self, namespace: usize) -> impl Iterator<Item = &NamedArgument> + '_ {
        self.namespaces
            .get(&namespace)
            .into_iter()
            .flat_map(NameTable::iter)
    }

    /// Named count in the default namespace plus positional count.
    pub fn len(&self) -> usize {
        self.namespaces
            .get(&DEFAULT_NAMESPACE)
            .map_or(0, NameTable::len)
            + self.positional.len()
    }

    /// `true` when no argument was classified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an alias key in `namespace`; the first present alias wins.
    pub fn lookup(&self, key: &str, namespace: usize) -> Option<&NamedArgument> {
        let table = self.namespaces.get(&namespace)?;
        key.split(ALIAS_SEPARATOR)
            .find_map(|alias| table.get(&self.options.comparison.key(alias)))
    }

    /// `true` when any alias of `key` is present in `namespace`.
    pub fn contains(&self, key: &str, namespace: usize) -> bool {
        self.lookup(key, namespace).is_some()
    }

    /// Turn text (`"+"`/`"-"`) or explicit value of the switch.
    ///
    /// `None` when the switch is absent or is a bare flag.
    pub fn value_of(&self, key: &str, namespace: usize) -> Option<&str> {
        self.lookup(key, namespace)?.effective_value()
    }

    /// Whether the switch is on: present and not turned off with `-`.
    pub fn is_set(&self, key: &str, namespace: usize) -> bool {
        self.lookup(key, namespace).is_some_and(NamedArgument::is_on)
    }

    /// Positional value at `index`.
    pub fn positional_at(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(|p| p.value.as_str())
    }

    fn named_anchor(&self, key: &str, namespace: usize) -> Option<usize> {
        self.lookup(key, namespace).map(|n| n.absolute_index)
    }

    fn positional_anchor(&self, index: usize) -> Option<usize> {
        self.positional.get(index).map(|p| p.absolute_index)
    }

    fn after(&self, anchor: Option<usize>) -> &[Entry] {
        match anchor {
            Some(i) => &self.entries[i + 1..],
            None => &[],
        }
    }

    fn before(&self, anchor: Option<usize>) -> &[Entry] {
        match anchor {
            Some(i) => &self.entries[..i],
            None => &[],
        }
    }

    /// Positional values directly following the switch, up to the next switch.
    pub fn suffix_of(&self, key: &str, namespace: usize) -> impl Iterator<Item = &str> + '_ {
        self.after(self.named_anchor(key, namespace))
            .iter()
            .map_while(positional_value)
    }

    /// Positional values directly preceding the switch, nearest first.
    pub fn prefix_of(&self, key: &str, namespace: usize) -> impl Iterator<Item = &str> + '_ {
        self.before(self.named_anchor(key, namespace))
            .iter()
            .rev()
            .map_while(positional_value)
    }

    /// Switches directly following positional value `index`, as
    /// `(name, effective value)`.
    pub fn suffix_of_positional(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.after(self.positional_anchor(index))
            .iter()
            .map_while(named_pair)
    }

    /// Switches directly preceding positional value `index`, nearest first.
    pub fn prefix_of_positional(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.before(self.positional_anchor(index))
            .iter()
            .rev()
            .map_while(named_pair)
    }

    /// Bind this index onto a fresh `T` with no custom converters.
    pub fn bind<T: Bindable>(&self) -> Result<T> {
        Binder::new().bind(self)
    }
}

fn positional_value(entry: &Entry) -> Option<&str> {
    match entry {
        Entry::Positional(p) => Some(p.value.as_str()),
        Entry::Named(_) => None,
    }
}

fn named_pair(entry: &Entry) -> Option<(&str, Option<&str>)> {
    match entry {
        Entry::Named(n) => Some((n.name.as_str(), n.effective_value())),
        Entry::Positional(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NameComparison;

    fn index(args: &[&str]) -> SwitchIndex {
        SwitchIndex::parse(args).unwrap()
    }

    #[test]
    fn alias_lookup_returns_first_present_alias() {
        let ix = index(&["-out:foo"]);
        assert_eq!(ix.value_of("o|out|output", 1), Some("foo"));

        let ix = index(&["-output:b", "-o:a"]);
        assert_eq!(ix.value_of("o|out|output", 1), Some("a"));
        assert_eq!(ix.value_of("output|o", 1), Some("b"));
    }

    #[test]
    fn turn_semantics() {
        let ix = index(&["-verbose+", "-quiet-", "-flag", "-level:3"]);
        assert!(ix.is_set("verbose", 1));
        assert_eq!(ix.value_of("verbose", 1), Some("+"));
        assert!(!ix.is_set("quiet", 1));
        assert_eq!(ix.value_of("quiet", 1), Some("-"));
        assert!(ix.is_set("flag", 1));
        assert_eq!(ix.value_of("flag", 1), None);
        assert!(ix.is_set("level", 1));
        assert!(!ix.is_set("missing", 1));
    }

    #[test]
    fn namespaces_are_isolated() {
        let ix = index(&["-x:1", "--x:2"]);
        assert_eq!(ix.value_of("x", 1), Some("1"));
        assert_eq!(ix.value_of("x", 2), Some("2"));
        assert_eq!(ix.value_of("x", 3), None);
        assert_eq!(ix.namespaces().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn suffix_and_prefix_runs() {
        let ix = index(&["-a", "1", "2", "-b", "3"]);
        assert_eq!(ix.suffix_of("a", 1).collect::<Vec<_>>(), ["1", "2"]);
        assert_eq!(ix.suffix_of("b", 1).collect::<Vec<_>>(), ["3"]);
        assert_eq!(ix.prefix_of("b", 1).collect::<Vec<_>>(), ["2", "1"]);
        assert_eq!(ix.prefix_of("a", 1).count(), 0);
    }

    #[test]
    fn positional_anchored_runs() {
        let ix = index(&["-a:1", "-b", "x", "-c+", "-d:4", "y"]);
        assert_eq!(
            ix.suffix_of_positional(0).collect::<Vec<_>>(),
            [("c", Some("+")), ("d", Some("4"))]
        );
        assert_eq!(
            ix.prefix_of_positional(0).collect::<Vec<_>>(),
            [("b", None), ("a", Some("1"))]
        );
        assert_eq!(ix.suffix_of_positional(1).count(), 0);
    }

    #[test]
    fn absent_anchors_yield_nothing() {
        let ix = index(&["-a", "1"]);
        assert_eq!(ix.suffix_of("zzz", 1).count(), 0);
        assert_eq!(ix.prefix_of("a", 7).count(), 0);
        assert_eq!(ix.suffix_of_positional(9).count(), 0);
        assert_eq!(ix.prefix_of_positional(9).count(), 0);
    }

    #[test]
    fn traversals_are_restartable() {
        let ix = index(&["-a", "1", "2"]);
        let first: Vec<_> = ix.suffix_of("a", 1).collect();
        let second: Vec<_> = ix.suffix_of("a", 1).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn views_and_counts() {
        let ix = index(&["p1", "-a:1", "--b", "p2", "-c-"]);
        assert_eq!(ix.positional_values(), ["p1", "p2"]);
        assert_eq!(
            ix.named_values(),
            [
                ("a".to_string(), Some("1".to_string())),
                ("c".to_string(), Some("-".to_string()))
            ]
        );
        assert_eq!(ix.len(), 4);
        assert_eq!(ix.positional_at(1), Some("p2"));
        assert_eq!(ix.positional_at(2), None);
        assert_eq!(ix.named_in(2).map(|n| n.name.as_str()).collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn raw_args_are_preserved() {
        let ix = index(&["a", " ", "-b"]);
        assert_eq!(ix.raw_args(), ["a", " ", "-b"]);
        assert_eq!(ix.entries().len(), 2);
    }

    #[test]
    fn case_sensitivity_is_configurable() {
        let opts = ParseOptions::default().with_comparison(NameComparison::CaseSensitive);
        let ix = SwitchIndex::parse_with(&["-Name:x"], opts).unwrap();
        assert_eq!(ix.value_of("name", 1), None);
        assert_eq!(ix.value_of("Name", 1), Some("x"));

        let ix = index(&["-Name:x"]);
        assert_eq!(ix.value_of("NAME", 1), Some("x"));
    }

    #[test]
    fn embedded_lines_inherit_options() {
        let opts = ParseOptions::default().with_comparison(NameComparison::CaseSensitive);
        let ix = SwitchIndex::parse_with(&["-p:x"], opts).unwrap();
        let sub = ix.parse_embedded("-X=1 \"two words\"").unwrap();
        assert_eq!(sub.value_of("X", 1), Some("1"));
        assert_eq!(sub.value_of("x", 1), None);
        assert_eq!(sub.positional_values(), ["two words"]);
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SwitchIndex>();
    }
}
