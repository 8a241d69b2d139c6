//! Embedded command-line tokenizer.
//!
//! Splits a single free-form string (a response-file line, a nested object
//! value, a map source) into argument tokens. Double quotes group text that
//! contains spaces; the quotes themselves never appear in the output.
//!
//! The tokenizer is a table-driven state machine over five states and three
//! character classes. The table is an immutable constant; a [`Tokenizer`]
//! owns a copy of it, so there is no shared mutable state.

use crate::error::{Result, SwitchError};

/// Tokenizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Between tokens.
    Idle = 0,
    /// Accumulating an unquoted token.
    InToken = 1,
    /// Just opened a quote; nothing captured yet.
    InQuote = 2,
    /// Inside a quoted span with captured text.
    InQuoteTrailing = 3,
    /// Just saw a quote that may close the span.
    QuoteClosed = 4,
}

/// Character class driving a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Input {
    /// `' '`
    Space = 0,
    /// `'"'`
    Quote = 1,
    /// Anything else.
    Other = 2,
}

impl Input {
    /// Classify a character.
    pub(crate) fn of(c: char) -> Self {
        match c {
            ' ' => Input::Space,
            '"' => Input::Quote,
            _ => Input::Other,
        }
    }
}

/// Side effect performed when taking a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Consume the character without output.
    Skip,
    /// Append the character to the pending token.
    Push,
    /// Emit the pending token and start a new one.
    Emit,
}

/// One cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    /// State after the transition.
    pub(crate) next: State,
    /// What to do with the current character.
    pub(crate) action: Action,
}

const fn go(next: State, action: Action) -> Transition {
    Transition { next, action }
}

/// Immutable `state × input` transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TransitionTable {
    rows: [[Transition; 3]; 5],
}

impl TransitionTable {
    /// The standard quoting rules.
    ///
    /// Columns are space, quote, other.
    pub(crate) const STANDARD: TransitionTable = {
        use Action::{Emit, Push, Skip};
        use State::{Idle, InQuote, InQuoteTrailing, InToken, QuoteClosed};
        TransitionTable {
            rows: [
                // Idle
                [go(Idle, Skip), go(InQuote, Skip), go(InToken, Push)],
                // InToken
                [go(Idle, Emit), go(InQuote, Skip), go(InToken, Push)],
                // InQuote
                [
                    go(InQuoteTrailing, Push),
                    go(Idle, Emit),
                    go(InQuoteTrailing, Push),
                ],
                // InQuoteTrailing
                [
                    go(InQuoteTrailing, Push),
                    go(QuoteClosed, Skip),
                    go(InQuoteTrailing, Push),
                ],
                // QuoteClosed: `""` re-enters the quoted span.
                [
                    go(Idle, Emit),
                    go(InQuoteTrailing, Skip),
                    go(InQuoteTrailing, Push),
                ],
            ],
        }
    };

    /// Look up the transition for `state` on `input`.
    pub(crate) const fn get(&self, state: State, input: Input) -> Transition {
        self.rows[state as usize][input as usize]
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Table-driven tokenizer for embedded command lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    table: TransitionTable,
}

impl Tokenizer {
    /// Tokenizer with the standard quoting rules.
    pub const fn new() -> Self {
        Self {
            table: TransitionTable::STANDARD,
        }
    }

    /// Split `line` into argument tokens.
    ///
    /// Fails with [`SwitchError::EmptyInput`] when `line` is empty or blank.
    pub fn tokenize(&self, line: &str) -> Result<Vec<String>> {
        if line.trim().is_empty() {
            return Err(SwitchError::EmptyInput);
        }

        let mut tokens = Vec::new();
        let mut pending = String::new();
        let mut state = State::Idle;
        for c in line.chars() {
            let step = self.table.get(state, Input::of(c));
            match step.action {
                Action::Skip => {}
                Action::Push => pending.push(c),
                Action::Emit => tokens.push(std::mem::take(&mut pending)),
            }
            state = step.next;
        }

        match state {
            // An unterminated quote still yields what it captured.
            State::InQuote | State::InQuoteTrailing => tokens.push(pending),
            _ => {
                if self.table.get(state, Input::Space).action == Action::Emit {
                    tokens.push(pending);
                }
            }
        }
        Ok(tokens)
    }
}

/// Split `line` into argument tokens with the standard quoting rules.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    Tokenizer::new().tokenize(line)
}
