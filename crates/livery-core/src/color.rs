//! Color handling for Livery aesthetics
//!
//! This module provides the [`Color`] type which validates CSS color strings
//! through the `DynamicColor` type from the color crate while keeping the
//! caller's original spelling, so that a color written as `"#eee"` is sent to
//! the rendering surface as `"#eee"` and not as a normalized equivalent.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::{Deserialize, Serialize};

/// A validated CSS color literal.
///
/// Equality and hashing use the literal as written.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    literal: String,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use livery_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_eq!(red.as_str(), "#ff0000");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        match DynamicColor::from_str(trimmed) {
            Ok(_) => Ok(Self {
                literal: trimmed.to_string(),
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Wraps a literal that is known to be valid without re-parsing it.
    pub(crate) fn builtin(literal: &'static str) -> Self {
        Self {
            literal: literal.to_string(),
        }
    }

    /// Returns the color exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// # Returns
    ///
    /// The alpha value as a `f32` between 0.0 and 1.0, where:
    /// - 0.0 = fully transparent
    /// - 1.0 = fully opaque
    pub fn alpha(&self) -> f32 {
        DynamicColor::from_str(&self.literal)
            .map(|color| color.components[3])
            .unwrap_or(1.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.literal
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
