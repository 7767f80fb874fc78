//! Error adapter for converting StackmapError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's report formatting used in the CLI. Each error kind gets a stable
//! diagnostic code and, where the fix is known, a help line.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use stackmap::{StackmapError, export};

/// Adapter presenting a [`StackmapError`] as a miette diagnostic.
pub struct ErrorAdapter<'a> {
    err: &'a StackmapError,
}

impl<'a> ErrorAdapter<'a> {
    pub fn new(err: &'a StackmapError) -> Self {
        Self { err }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl std::error::Error for ErrorAdapter<'_> {}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            StackmapError::Io(_) => "stackmap::io",
            StackmapError::Diagram(_) => "stackmap::diagram",
            StackmapError::Config(_) => "stackmap::config",
            StackmapError::Export(export::Error::GraphvizUnavailable(_)) => {
                "stackmap::graphviz_missing"
            }
            StackmapError::Export(export::Error::Render(_)) => "stackmap::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            StackmapError::Export(export::Error::GraphvizUnavailable(_)) => {
                "install Graphviz and make sure `dot` is on PATH, or write DOT source with `--format dot`"
            }
            StackmapError::Diagram(_) => "server names in the [farm] section must be unique",
            StackmapError::Io(_) => "check that the output directory is writable",
            StackmapError::Config(_) | StackmapError::Export(_) => return None,
        };
        Some(Box::new(help))
    }
}

/// Convert an error into a reportable diagnostic.
pub fn to_reportable(err: &StackmapError) -> ErrorAdapter<'_> {
    ErrorAdapter::new(err)
}
