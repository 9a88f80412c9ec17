//! Dash pattern definitions.
//!
//! [`DashStyle`] integrates both the concept of "style" (solid vs patterned)
//! and the specific dash pattern into a single type, following SVG/CSS
//! terminology.
//!
//! # SVG Mapping
//!
//! | Variant | `stroke-dasharray` |
//! |---------|--------------------|
//! | `Solid` | none |
//! | `Dashed` | `"5,5"` |
//! | `Dotted` | `"2,3"` |
//! | `DashDot` | `"10,5,2,5"` |
//! | `DashDotDot` | `"10,5,2,5,2,5"` |
//! | `Custom(pattern)` | the pattern itself |

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Defines the dash pattern of a stroke.
///
/// Named styles serialize by name (`"dashed"`), custom patterns serialize as
/// the raw dasharray (`"10,5,2,5"`), so both survive a round-trip unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DashStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
    /// Dotted line with small dots (2px dot, 3px gap)
    Dotted,
    /// Dash-dot pattern (10px dash, 5px gap, 2px dot, 5px gap)
    DashDot,
    /// Dash-dot-dot pattern (10px dash, 5px gap, 2px dot, 5px gap, 2px dot, 5px gap)
    DashDotDot,
    /// Custom SVG dasharray pattern
    /// Format: comma or space-separated list of dash/gap lengths
    /// Example: "10,5,2,3" = 10px dash, 5px gap, 2px dash, 3px gap (repeating)
    Custom(String),
}

impl FromStr for DashStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            "dash-dot" | "dashdot" => Self::DashDot,
            "dash-dot-dot" | "dashdotdot" => Self::DashDotDot,
            // Any other value is treated as a custom dasharray pattern
            _ => Self::Custom(s.to_string()),
        })
    }
}

impl DashStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::DashDot => Some("10,5,2,5".to_string()),
            Self::DashDotDot => Some("10,5,2,5,2,5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::DashDot => "dash-dot",
            Self::DashDotDot => "dash-dot-dot",
            Self::Custom(pattern) => pattern,
        }
    }
}

impl fmt::Display for DashStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for DashStyle {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

impl From<DashStyle> for String {
    fn from(style: DashStyle) -> Self {
        style.to_string()
    }
}
