//! Response-file expansion through an injected line source.
//!
//! An argument such as `@build.rsp` is replaced by the arguments found on
//! every line of the named resource. Each line is itself tokenized as an
//! embedded command line, so quoting works the same way it does inside
//! nested values. Expansion is eager: the source is fully drained before
//! indexing starts. A resource that references itself, directly or through
//! other resources, fails with [`SwitchError::InvalidArgument`].

use std::collections::HashMap;

use crate::error::{Result, SwitchError};
use crate::grammar::tokenizer::Tokenizer;
use crate::options::ParseOptions;

/// Lines produced by an opened response resource.
///
/// Dropping the iterator releases whatever the source holds open.
pub type Lines<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Supplies the lines of a named response resource.
pub trait LineSource: Send + Sync {
    /// Open `name` for reading.
    ///
    /// Unknown resources should fail with [`SwitchError::InvalidArgument`].
    fn open(&self, name: &str) -> Result<Lines<'_>>;
}

/// In-memory line source keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    resources: HashMap<String, Vec<String>>,
}

impl MemoryLineSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `lines` under `name`, replacing any previous content.
    #[must_use]
    pub fn with<I, S>(mut self, name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, lines);
        self
    }

    /// Register `lines` under `name`, replacing any previous content.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources
            .insert(name.into(), lines.into_iter().map(Into::into).collect());
    }
}

impl LineSource for MemoryLineSource {
    fn open(&self, name: &str) -> Result<Lines<'_>> {
        let lines = self
            .resources
            .get(name)
            .ok_or_else(|| SwitchError::invalid(name, "response resource not found"))?;
        Ok(Box::new(lines.iter().cloned().map(Ok)))
    }
}

/// Expand response references and drop blank arguments.
pub(crate) fn expand<S: AsRef<str>>(args: &[S], options: &ParseOptions) -> Result<Vec<String>> {
    let tokenizer = Tokenizer::new();
    let mut out = Vec::with_capacity(args.len());
    let mut open = Vec::new();
    for arg in args {
        expand_one(arg.as_ref(), options, &tokenizer, &mut open, &mut out)?;
    }
    Ok(out)
}

fn expand_one(
    arg: &str,
    options: &ParseOptions,
    tokenizer: &Tokenizer,
    open: &mut Vec<String>,
    out: &mut Vec<String>,
) -> Result<()> {
    if let Some(name) = response_name(arg, options.response_marker) {
        let source = options.line_source.as_deref().ok_or_else(|| {
            SwitchError::invalid(name, "no line source configured for response expansion")
        })?;
        // `open` holds the resources currently being expanded, outermost first.
        if open.iter().any(|n| n == name) {
            return Err(SwitchError::invalid(name, "recursive response reference"));
        }
        tracing::debug!(resource = name, depth = open.len(), "expanding response arguments");
        open.push(name.to_string());
        for line in source.open(name)? {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            for token in tokenizer.tokenize(&line)? {
                expand_one(&token, options, tokenizer, open, out)?;
            }
        }
        open.pop();
    } else if !arg.trim().is_empty() {
        out.push(arg.to_string());
    }
    Ok(())
}

fn response_name(arg: &str, marker: char) -> Option<&str> {
    arg.strip_prefix(marker).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn options(source: MemoryLineSource) -> ParseOptions {
        ParseOptions::default().with_line_source(Arc::new(source))
    }

    #[test]
    fn blank_arguments_are_skipped() {
        let out = expand(&["a", "  ", "", "b"], &ParseOptions::default()).unwrap();
        assert_eq!(out, ["a", "b"]);
    }

    #[test]
    fn response_lines_are_tokenized_in_place() {
        let source = MemoryLineSource::new().with("args.rsp", ["-out:\"my file\" x", "", "-v"]);
        let out = expand(&["first", "@args.rsp", "last"], &options(source)).unwrap();
        assert_eq!(out, ["first", "-out:my file", "x", "-v", "last"]);
    }

    #[test]
    fn nested_responses_expand_recursively() {
        let source = MemoryLineSource::new()
            .with("outer", ["a @inner"])
            .with("inner", ["b c"]);
        let out = expand(&["@outer"], &options(source)).unwrap();
        assert_eq!(out, ["a", "b", "c"]);
    }

    #[test]
    fn self_reference_is_an_argument_error() {
        let source = MemoryLineSource::new().with("loop", ["-a @loop"]);
        let err = expand(&["@loop"], &options(source)).unwrap_err();
        assert!(matches!(err, SwitchError::InvalidArgument { ref subject, .. } if subject == "loop"));
    }

    #[test]
    fn mutual_references_are_an_argument_error() {
        let source = MemoryLineSource::new()
            .with("ping", ["-a", "@pong"])
            .with("pong", ["-b @ping"]);
        let err = expand(&["x", "@ping"], &options(source)).unwrap_err();
        assert!(matches!(err, SwitchError::InvalidArgument { ref subject, .. } if subject == "ping"));
    }

    #[test]
    fn repeated_references_outside_a_cycle_expand_each_time() {
        let source = MemoryLineSource::new()
            .with("both", ["@leaf @leaf"])
            .with("leaf", ["v"]);
        let out = expand(&["@both", "@leaf"], &options(source)).unwrap();
        assert_eq!(out, ["v", "v", "v"]);
    }

    #[test]
    fn lone_marker_is_an_ordinary_argument() {
        let out = expand(&["@"], &ParseOptions::default()).unwrap();
        assert_eq!(out, ["@"]);
    }

    #[test]
    fn missing_resource_is_an_argument_error() {
        let err = expand(&["@nope"], &options(MemoryLineSource::new())).unwrap_err();
        assert!(matches!(err, SwitchError::InvalidArgument { ref subject, .. } if subject == "nope"));
    }

    #[test]
    fn missing_source_is_an_argument_error() {
        let err = expand(&["@args"], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, SwitchError::InvalidArgument { .. }));
    }
}
