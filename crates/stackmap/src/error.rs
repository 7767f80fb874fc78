//! Error types for stackmap operations.
//!
//! This module provides the main error type [`StackmapError`] which wraps the
//! error conditions that can occur while declaring or rendering a diagram.

use std::io;

use thiserror::Error;

use stackmap_core::semantic::DiagramError;

use crate::export;

/// The main error type for stackmap operations.
#[derive(Debug, Error)]
pub enum StackmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Diagram error: {0}")]
    Diagram(#[from] DiagramError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}
