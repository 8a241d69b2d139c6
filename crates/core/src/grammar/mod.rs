/// Switch grammar for a single argument token.
pub mod switch;
/// Embedded command-line tokenizer.
pub mod tokenizer;

pub use switch::{
    MAP_PAIR_SEPARATORS, MEMBER_PAIR_SEPARATORS, SwitchMatch, Turn, match_switch, pair_as_switch,
};
pub use tokenizer::{Tokenizer, tokenize};
