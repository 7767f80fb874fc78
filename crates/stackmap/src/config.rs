//! Configuration types for the overview diagram.
//!
//! Every setting defaults to the published overview, so an empty
//! configuration renders `docs/overview.png` exactly as committed. All types
//! implement [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`OutputConfig`] - Where the rendered file goes and in which format.
//! - [`StyleConfig`] - Canvas and cluster styling.
//! - [`FarmConfig`] - Naming of the stacks and the list of game servers.
//! - [`IconConfig`] - Optional location of an icon pack.
//!
//! # Example
//!
//! ```
//! # use stackmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.output().file_path().to_str(), Some("docs/overview.png"));
//! assert_eq!(config.farm().servers().len(), 3);
//! ```

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use stackmap_core::{
    attributes::{ClusterAttributes, Direction, GraphAttributes},
    color::Color,
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    output: OutputConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    farm: FarmConfig,

    #[serde(default)]
    icons: IconConfig,
}

impl AppConfig {
    pub fn new(
        output: OutputConfig,
        style: StyleConfig,
        farm: FarmConfig,
        icons: IconConfig,
    ) -> Self {
        Self {
            output,
            style,
            farm,
            icons,
        }
    }

    /// Returns a copy of this configuration with the output section replaced.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Returns a copy of this configuration with the icon section replaced.
    pub fn with_icons(mut self, icons: IconConfig) -> Self {
        self.icons = icons;
        self
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn farm(&self) -> &FarmConfig {
        &self.farm
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }
}

/// File format of the rendered diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Jpg,
    Pdf,
    /// The DOT source itself. Does not need Graphviz.
    Dot,
}

impl OutputFormat {
    /// Format named by the extension of `path`, if it is a known one.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use stackmap::config::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("out/farm.jpeg")), Some(OutputFormat::Jpg));
    /// assert_eq!(OutputFormat::from_path(Path::new("out/farm")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            other => Err(format!(
                "unsupported output format `{other}` (expected png, svg, jpg, pdf or dot)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Output location and format.
///
/// Without an explicit format, a known extension on the path selects it,
/// falling back to PNG.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output path. The format extension is appended unless the path already
    /// ends in a known one.
    path: PathBuf,

    format: Option<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("docs/overview"),
            format: None,
        }
    }
}

impl OutputConfig {
    pub fn new(path: impl Into<PathBuf>, format: impl Into<Option<OutputFormat>>) -> Self {
        Self {
            path: path.into(),
            format: format.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The format given explicitly, as opposed to one inferred from the path.
    pub fn explicit_format(&self) -> Option<OutputFormat> {
        self.format
    }

    pub fn format(&self) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_path(&self.path))
            .unwrap_or_default()
    }

    /// Checks that an explicit format agrees with the extension of the path.
    ///
    /// # Errors
    ///
    /// Returns an error when the path ends in a known extension naming a
    /// different format.
    pub fn validate(&self) -> Result<(), String> {
        match (self.format, OutputFormat::from_path(&self.path)) {
            (Some(format), Some(named)) if format != named => Err(format!(
                "output path `{}` names the {named} format but the output format is {format}",
                self.path.display()
            )),
            _ => Ok(()),
        }
    }

    /// Path of the file that gets written.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap::config::{OutputConfig, OutputFormat};
    ///
    /// let bare = OutputConfig::new("docs/overview", OutputFormat::Svg);
    /// assert_eq!(bare.file_path().to_str(), Some("docs/overview.svg"));
    ///
    /// let explicit = OutputConfig::new("out/diagram.png", OutputFormat::Png);
    /// assert_eq!(explicit.file_path().to_str(), Some("out/diagram.png"));
    ///
    /// let versioned = OutputConfig::new("out/diagram.v2", OutputFormat::Svg);
    /// assert_eq!(versioned.file_path().to_str(), Some("out/diagram.v2.svg"));
    /// ```
    pub fn file_path(&self) -> PathBuf {
        if OutputFormat::from_path(&self.path).is_some() {
            return self.path.clone();
        }
        let mut file = self.path.clone().into_os_string();
        file.push(".");
        file.push(self.format().extension());
        PathBuf::from(file)
    }
}

/// Canvas and cluster styling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas margin in inches, `[x, y]`.
    margin: [f32; 2],

    /// Maximum canvas size in inches, `[width, height]`.
    size: [f32; 2],

    /// Background color as a CSS color string.
    background_color: String,

    direction: Direction,

    /// Space around cluster content, in points.
    cluster_margin: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            margin: [-0.8, -0.8],
            size: [10.0, 8.0],
            background_color: "transparent".to_string(),
            direction: Direction::LeftToRight,
            cluster_margin: 30,
        }
    }
}

impl StyleConfig {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Builds the top-level graph attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the background color is invalid.
    pub fn graph_attributes(&self) -> Result<GraphAttributes, String> {
        Ok(GraphAttributes::new()
            .with_margin(self.margin[0], self.margin[1])
            .with_size(self.size[0], self.size[1])
            .with_background(self.background_color()?)
            .with_direction(self.direction))
    }

    pub fn cluster_attributes(&self) -> ClusterAttributes {
        ClusterAttributes::new().with_margin(self.cluster_margin)
    }
}

/// Naming of the deployed stacks and the game servers they host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    /// Application qualifier, used as the CDK app name and stack id prefix.
    qualifier: String,

    environment: String,

    /// One nested stack and one instance is drawn per server.
    servers: Vec<String>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            qualifier: "mcservers".to_string(),
            environment: "env".to_string(),
            servers: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        }
    }
}

impl FarmConfig {
    pub fn new(
        qualifier: impl Into<String>,
        environment: impl Into<String>,
        servers: Vec<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            environment: environment.into(),
            servers,
        }
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Deployed name of a top-level stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap::config::FarmConfig;
    ///
    /// assert_eq!(FarmConfig::default().stack_id("network"), "mcservers-env-network");
    /// ```
    pub fn stack_id(&self, component: &str) -> String {
        format!("{}-{}-{component}", self.qualifier, self.environment)
    }
}

/// Location of an icon pack laid out as `<provider>/<category>/<resource>.png`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconConfig {
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl IconConfig {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_overview() {
        let config = AppConfig::default();

        let attrs = config.style().graph_attributes().unwrap();
        assert_eq!(attrs.attributes().get("margin"), Some("-0.8,-0.8"));
        assert_eq!(attrs.attributes().get("size"), Some("10,8"));
        assert_eq!(attrs.attributes().get("bgcolor"), Some("transparent"));
        assert_eq!(attrs.direction(), Direction::LeftToRight);

        let cluster = config.style().cluster_attributes();
        assert_eq!(cluster.attributes().get("margin"), Some("30"));

        assert_eq!(config.output().format(), OutputFormat::Png);
        assert!(config.icons().directory().is_none());
    }

    #[test]
    fn test_invalid_background() {
        let style = StyleConfig {
            background_color: "nope".to_string(),
            ..StyleConfig::default()
        };
        assert!(style.graph_attributes().is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("SVG".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpg));
        assert_eq!("gv".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_with_output() {
        let config =
            AppConfig::default().with_output(OutputConfig::new("build/farm", OutputFormat::Dot));
        assert_eq!(
            config.output().file_path(),
            PathBuf::from("build/farm.dot")
        );
    }

    #[test]
    fn test_format_inferred_from_config_path() {
        let config: AppConfig = toml::from_str("[output]\npath = \"docs/overview.svg\"").unwrap();
        assert_eq!(config.output().format(), OutputFormat::Svg);
        assert_eq!(
            config.output().file_path(),
            PathBuf::from("docs/overview.svg")
        );
        assert!(config.output().validate().is_ok());
    }

    #[test]
    fn test_explicit_format_contradicting_extension() {
        let output = OutputConfig::new("out/farm.png", OutputFormat::Svg);
        let err = output.validate().unwrap_err();
        assert!(err.contains("out/farm.png"), "{err}");

        let config: AppConfig =
            toml::from_str("[output]\npath = \"docs/overview.svg\"\nformat = \"pdf\"").unwrap();
        assert!(config.output().validate().is_err());
    }

    #[test]
    fn test_extension_alias_matches_format() {
        let output = OutputConfig::new("out/farm.jpeg", OutputFormat::Jpg);
        assert!(output.validate().is_ok());
        assert_eq!(output.file_path(), PathBuf::from("out/farm.jpeg"));
    }
}
