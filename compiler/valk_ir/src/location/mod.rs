//! Source locations for runtime diagnostics.

use std::fmt;
use std::sync::Arc;

/// A resolved position in a source file.
///
/// Unlike a byte-offset span, a `SourceLocation` is already resolved to
/// line and column, because the runtime renders it without access to the
/// source text. Lines and columns are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: Arc<str>,
    line: u32,
    column: u32,
}

impl SourceLocation {
    /// Create a location in `file` at `line:column`.
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
            column,
        }
    }

    /// Name of the source (usually a path, `<stdin>` for piped input).
    pub fn file(&self) -> &str {
        &self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
