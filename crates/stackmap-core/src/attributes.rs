//! Visual attributes for graphs and clusters.
//!
//! Attributes are kept as ordered key/value pairs using Graphviz attribute
//! names, so anything Graphviz accepts can be expressed. Typed helpers cover
//! the settings the overview diagram relies on.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::color::Color;

/// Layout direction of the rank axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Direction {
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
    #[default]
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Value of the Graphviz `rankdir` attribute.
    pub fn rankdir(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rankdir())
    }
}

/// Ordered set of Graphviz attributes. Setting a key twice keeps the
/// original position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the updated set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `self` overlaid with `overrides`; keys present in both take
    /// the value from `overrides`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap_core::attributes::Attributes;
    ///
    /// let base = Attributes::new().with("fontsize", "15").with("pad", "2.0");
    /// let merged = base.merged(&Attributes::new().with("pad", "0.5"));
    /// assert_eq!(merged.get("fontsize"), Some("15"));
    /// assert_eq!(merged.get("pad"), Some("0.5"));
    /// ```
    pub fn merged(&self, overrides: &Attributes) -> Attributes {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

/// Attributes of the top level graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAttributes {
    direction: Direction,
    attributes: Attributes,
}

impl GraphAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Margin around the drawing in inches. Negative values crop the canvas.
    pub fn with_margin(self, x: f32, y: f32) -> Self {
        self.with("margin", format!("{x},{y}"))
    }

    /// Maximum drawing size in inches.
    pub fn with_size(self, width: f32, height: f32) -> Self {
        self.with("size", format!("{width},{height}"))
    }

    pub fn with_background(self, color: Color) -> Self {
        self.with("bgcolor", color.to_graphviz())
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets an arbitrary Graphviz graph attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Attributes of a cluster subgraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterAttributes {
    attributes: Attributes,
}

impl ClusterAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Space between the cluster border and its content, in points.
    pub fn with_margin(self, points: u32) -> Self {
        self.with("margin", points.to_string())
    }

    /// Sets an arbitrary Graphviz cluster attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut attrs = Attributes::new().with("a", "1").with("b", "2");
        attrs.insert("a", "3");

        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_graph_attributes() {
        let attrs = GraphAttributes::new()
            .with_margin(-0.8, -0.8)
            .with_size(10.0, 8.0)
            .with_background(Color::new("transparent").unwrap())
            .with_direction(Direction::LeftToRight);

        assert_eq!(attrs.attributes().get("margin"), Some("-0.8,-0.8"));
        assert_eq!(attrs.attributes().get("size"), Some("10,8"));
        assert_eq!(attrs.attributes().get("bgcolor"), Some("transparent"));
        assert_eq!(attrs.direction().rankdir(), "LR");
    }

    #[test]
    fn test_cluster_margin() {
        let attrs = ClusterAttributes::new().with_margin(30);
        assert_eq!(attrs.attributes().get("margin"), Some("30"));
        assert_eq!(attrs.attributes().len(), 1);
    }

    #[test]
    fn test_direction_deserialize() {
        use serde::de::value::{Error, StrDeserializer};

        let direction = Direction::deserialize(StrDeserializer::<Error>::new("TB"));
        assert_eq!(direction.unwrap(), Direction::TopToBottom);

        let invalid = Direction::deserialize(StrDeserializer::<Error>::new("up"));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_default_direction() {
        assert_eq!(Direction::default(), Direction::LeftToRight);
        assert_eq!(Direction::RightToLeft.to_string(), "RL");
    }
}
