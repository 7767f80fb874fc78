//! Conversion of a diagram into Graphviz input and rendered files.

pub mod dot;

use std::io;

use log::debug;
use thiserror::Error;

use graphviz_rust::cmd::{CommandArg, Format, Layout};

use crate::config::OutputFormat;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Graphviz `dot` executable not found: {0}")]
    GraphvizUnavailable(#[source] io::Error),

    #[error("Graphviz failed to render: {0}")]
    Render(String),
}

/// Runs Graphviz on `dot_source` and returns the encoded file contents.
///
/// [`OutputFormat::Dot`] returns the source unchanged without spawning
/// Graphviz.
pub fn render(dot_source: String, format: OutputFormat) -> Result<Vec<u8>, Error> {
    let graphviz_format = match format {
        OutputFormat::Dot => return Ok(dot_source.into_bytes()),
        OutputFormat::Png => Format::Png,
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Jpg => Format::Jpg,
        OutputFormat::Pdf => Format::Pdf,
    };

    debug!(format = format.extension(); "Running Graphviz");
    let args = vec![
        CommandArg::Layout(Layout::Dot),
        CommandArg::Format(graphviz_format),
    ];
    let bytes = graphviz_rust::exec_dot(dot_source, args).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::GraphvizUnavailable(err),
        _ => Error::Render(err.to_string()),
    })?;

    if bytes.is_empty() {
        return Err(Error::Render("Graphviz produced no output".to_string()));
    }
    Ok(bytes)
}
