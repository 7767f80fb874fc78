//! CLI logic for the stackmap diagram tool.
//!
//! This module contains the core CLI logic: configuration loading, argument
//! overrides and writing the rendered overview.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::{debug, info};

use stackmap::{
    DiagramBuilder, StackmapError,
    config::{AppConfig, IconConfig, OutputConfig, OutputFormat},
};

/// Run the stackmap CLI application
///
/// This function declares the overview diagram, renders it and writes the
/// result to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StackmapError` for:
/// - Configuration loading errors
/// - Diagram declaration errors
/// - Graphviz rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, StackmapError> {
    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    info!(
        output_path = app_config.output().file_path().display().to_string(),
        format = app_config.output().format().extension();
        "Rendering overview"
    );

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.build()?;
    let path = builder.write(&diagram)?;

    info!(output_file = path.display().to_string(); "Overview exported successfully");

    Ok(path)
}

/// Overlay command-line arguments on the loaded configuration.
///
/// Without `--format`, a known extension on `--output` selects the format,
/// then the configured format applies.
fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if args.output.is_some() || args.format.is_some() {
        let current = config.output();
        let path = args
            .output
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| current.path().to_path_buf());
        let format = args
            .format
            .or_else(|| OutputFormat::from_path(&path))
            .or(current.explicit_format());
        debug!(path = path.display().to_string(), format:?; "Output overridden");
        config = config.with_output(OutputConfig::new(path, format));
    }

    if let Some(dir) = &args.icon_dir {
        config = config.with_icons(IconConfig::new(Some(PathBuf::from(dir))));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            log_level: "off".to_string(),
            ..Args::default()
        }
    }

    #[test]
    fn test_no_overrides_keep_defaults() {
        let config = apply_overrides(AppConfig::default(), &args());
        assert_eq!(
            config.output().file_path(),
            PathBuf::from("docs/overview.png")
        );
        assert!(config.icons().directory().is_none());
    }

    #[test]
    fn test_format_from_output_extension() {
        let args = Args {
            output: Some("out/farm.svg".to_string()),
            ..args()
        };
        let config = apply_overrides(AppConfig::default(), &args);
        assert_eq!(config.output().format(), OutputFormat::Svg);
        assert_eq!(config.output().file_path(), PathBuf::from("out/farm.svg"));
    }

    #[test]
    fn test_explicit_format_keeps_default_path() {
        let args = Args {
            format: Some(OutputFormat::Dot),
            icon_dir: Some("icons".to_string()),
            ..args()
        };
        let config = apply_overrides(AppConfig::default(), &args);
        assert_eq!(
            config.output().file_path(),
            PathBuf::from("docs/overview.dot")
        );
        assert_eq!(config.icons().directory(), Some(std::path::Path::new("icons")));
    }

    #[test]
    fn test_output_extension_overrides_configured_format() {
        let configured: AppConfig = toml::from_str("[output]\nformat = \"pdf\"").unwrap();
        let args = Args {
            output: Some("out/farm.dot".to_string()),
            ..args()
        };
        let config = apply_overrides(configured, &args);
        assert_eq!(config.output().format(), OutputFormat::Dot);
        assert!(config.output().validate().is_ok());
    }

    #[test]
    fn test_contradicting_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("farm.png");
        let args = Args {
            output: Some(target.display().to_string()),
            format: Some(OutputFormat::Svg),
            ..args()
        };

        let result = run(&args);
        assert!(matches!(result, Err(StackmapError::Config(_))), "{result:?}");
        assert!(!target.exists());
    }
}
