//! Color handling for diagram attributes
//!
//! This module provides the [`Color`] type which wraps `DynamicColor` from the
//! color crate and converts it into the notation Graphviz understands.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// A CSS color usable as a Graphviz color attribute.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_graphviz().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"`, `"red"` or `"transparent"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_graphviz(), "#ff0000");
    /// assert!(Color::new("nope").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha value in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the Graphviz notation of this color.
    ///
    /// Fully transparent colors map to the `transparent` keyword, opaque ones
    /// to `#rrggbb` and everything else to `#rrggbbaa`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap_core::color::Color;
    ///
    /// assert_eq!(Color::new("transparent").unwrap().to_graphviz(), "transparent");
    /// assert_eq!(Color::new("white").unwrap().to_graphviz(), "#ffffff");
    /// let faded = Color::new("white").unwrap().with_alpha(0.5).to_graphviz();
    /// assert!(faded.starts_with("#ffffff") && faded.len() == 9);
    /// ```
    pub fn to_graphviz(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        match rgba.a {
            0 => "transparent".to_string(),
            255 => format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
            a => format!("#{:02x}{:02x}{:02x}{a:02x}", rgba.r, rgba.g, rgba.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_graphviz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_graphviz(), "#000000");
    }

    #[test]
    fn test_transparent() {
        let color = Color::new("transparent").unwrap();
        assert_eq!(color.alpha(), 0.0);
        assert_eq!(color.to_string(), "transparent");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap().with_alpha(0.5);
        assert!((color.alpha() - 0.5).abs() < 0.001);
        assert!(color.to_graphviz().starts_with("#ff0000"));
        assert_eq!(color.to_graphviz().len(), 9);
    }

    #[test]
    fn test_from_str() {
        let color: Color = "#2d3436".parse().unwrap();
        assert_eq!(color.to_graphviz(), "#2d3436");
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
