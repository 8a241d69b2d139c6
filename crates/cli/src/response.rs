//! Response files read from disk.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use switchbind_core::{LineSource, Lines, Result, SwitchError};

/// Resolves `@name` references to files relative to a base directory.
#[derive(Debug, Clone)]
pub(crate) struct FileLineSource {
    base: PathBuf,
}

impl FileLineSource {
    pub(crate) fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl LineSource for FileLineSource {
    fn open(&self, name: &str) -> Result<Lines<'_>> {
        let path = self.base.join(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SwitchError::InvalidArgument {
                    subject: name.to_string(),
                    reason: format!("response file not found: {}", path.display()),
                });
            }
            Err(source) => {
                return Err(SwitchError::Response {
                    name: name.to_string(),
                    source,
                });
            }
        };
        tracing::debug!(path = %path.display(), "reading response file");
        let name = name.to_string();
        Ok(Box::new(BufReader::new(file).lines().map(move |line| {
            line.map_err(|source| SwitchError::Response {
                name: name.clone(),
                source,
            })
        })))
    }
}
