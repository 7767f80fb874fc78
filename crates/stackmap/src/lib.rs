//! Stackmap - declares the server farm architecture overview and renders it
//! with Graphviz.
//!
//! The overview is a fixed graph of CDK stacks, network constructs and compute
//! instances, grouped into nested clusters. Layout and image encoding are left
//! to the Graphviz `dot` executable.

pub mod config;
pub mod export;
pub mod overview;

mod error;

pub use stackmap_core::{attributes, color, icon, identifier, semantic};

pub use error::StackmapError;

use std::{fs, path::PathBuf};

use log::{debug, info, trace};

use config::AppConfig;
use export::dot::DotExporter;

/// Builder for declaring and rendering the overview diagram.
///
/// # Examples
///
/// ```rust,no_run
/// use stackmap::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Declare the overview
/// let diagram = builder.build().expect("Failed to declare");
///
/// // Render it and write docs/overview.png
/// let path = builder.write(&diagram).expect("Failed to render");
/// println!("{}", path.display());
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Declare the server farm overview.
    ///
    /// # Errors
    ///
    /// Returns `StackmapError` for an invalid configuration or a structural
    /// error in the declared graph.
    pub fn build(&self) -> Result<semantic::Diagram, StackmapError> {
        info!("Declaring diagram");

        let diagram = overview::server_farm(self.config.farm(), self.config.style())?;

        debug!("Diagram declared successfully");
        trace!(diagram:?; "Declared diagram");

        Ok(diagram)
    }

    /// Produce the DOT source of a diagram.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder.build().unwrap();
    /// let dot = builder.to_dot(&diagram).unwrap();
    /// assert!(dot.contains("Cloud Development Kit (CDK)"));
    /// ```
    pub fn to_dot(&self, diagram: &semantic::Diagram) -> Result<String, StackmapError> {
        let exporter = DotExporter::new().with_icon_dir(self.config.icons().directory());
        Ok(exporter.to_dot(diagram)?)
    }

    /// Render a diagram in the configured output format.
    ///
    /// # Errors
    ///
    /// Returns `StackmapError::Config` when the output path names a different
    /// format, and `StackmapError::Export` when Graphviz is missing or fails.
    pub fn render(&self, diagram: &semantic::Diagram) -> Result<Vec<u8>, StackmapError> {
        let format = self.config.output().format();
        self.config
            .output()
            .validate()
            .map_err(StackmapError::Config)?;
        info!(format = format.extension(); "Rendering diagram");

        let dot = self.to_dot(diagram)?;
        let bytes = export::render(dot, format)?;

        info!(bytes = bytes.len(); "Diagram rendered successfully");
        Ok(bytes)
    }

    /// Render a diagram and write it to the configured output file,
    /// overwriting any existing file. Missing parent directories are created.
    ///
    /// Returns the path of the written file.
    pub fn write(&self, diagram: &semantic::Diagram) -> Result<PathBuf, StackmapError> {
        let path = self.config.output().file_path();
        let bytes = self.render(diagram)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;

        info!(path = path.display().to_string(); "Diagram written");
        Ok(path)
    }
}
