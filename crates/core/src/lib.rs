//! Switch-style command-line parsing and type-directed binding.
//!
//! Arguments such as `-out:file.txt`, `--level=3`, `/verbose+` or plain
//! positional values are classified once into a [`SwitchIndex`]. The index
//! answers lookups by alias key and namespace (the prefix length), walks the
//! positional runs around a switch, and binds itself onto typed values
//! through the [`Binder`].
//!
//! ```
//! use switchbind_core::{Bindable, ObjectSchema, SwitchIndex};
//!
//! #[derive(Debug, Default)]
//! struct CopyJob {
//!     out: String,
//!     retries: u8,
//!     files: Vec<String>,
//! }
//!
//! impl Bindable for CopyJob {
//!     fn schema() -> ObjectSchema<Self> {
//!         ObjectSchema::<Self>::new()
//!             .field("o|out", |c| &mut c.out)
//!             .field("retries", |c| &mut c.retries)
//!             .field("files", |c| &mut c.files)
//!     }
//! }
//!
//! let ix = SwitchIndex::parse(&["-out:dest", "-retries=3", "-files", "a.txt", "b.txt"]).unwrap();
//! let copy: CopyJob = ix.bind().unwrap();
//! assert_eq!(copy.out, "dest");
//! assert_eq!(copy.retries, 3);
//! assert_eq!(copy.files, ["a.txt", "b.txt"]);
//! ```

#![warn(missing_docs)]

/// Type-directed binding onto Rust values.
pub mod bind;
/// Error type shared by every stage.
pub mod error;
/// Tokenizer and switch grammar.
pub mod grammar;
/// Argument classification and the switch index.
pub mod index;
/// Parse configuration.
pub mod options;
/// Response-file expansion through a line source.
pub mod response;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Index
pub use index::{ALIAS_SEPARATOR, DEFAULT_NAMESPACE, Entry, NamedArgument, PositionalArgument, SwitchIndex};

// Binder
pub use bind::{Bind, Bindable, Binder, ObjectSchema, Shape, Slot, from_args};

// Grammar
pub use grammar::{Tokenizer, Turn, match_switch, tokenize};

// Errors and configuration
pub use error::{Result, SwitchError};
pub use options::{NameComparison, ParseOptions};
pub use response::{LineSource, Lines, MemoryLineSource};
