//! The visual properties an aesthetic can carry.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A visual property of a leaf aesthetic.
///
/// The wire name (used in payloads, raw configuration and relative
/// expressions) is the snake_case variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Fill,
    FillOpacity,
    Stroke,
    StrokeWidth,
    StrokeDasharray,
    NonScalingStroke,
}

impl Property {
    /// All properties in canonical order.
    pub const ALL: [Property; 6] = [
        Property::Fill,
        Property::FillOpacity,
        Property::Stroke,
        Property::StrokeWidth,
        Property::StrokeDasharray,
        Property::NonScalingStroke,
    ];

    /// Returns the wire name of this property.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::FillOpacity => "fill_opacity",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "stroke_width",
            Self::StrokeDasharray => "stroke_dasharray",
            Self::NonScalingStroke => "non_scaling_stroke",
        }
    }

    /// Returns true for properties that accept relative expressions.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::FillOpacity | Self::StrokeWidth)
    }

    /// Clamps a computed value to the property's domain.
    ///
    /// Opacity lives in `[0, 1]`, widths are never negative.
    pub fn clamp(self, value: f64) -> f64 {
        match self {
            Self::FillOpacity => value.clamp(0.0, 1.0),
            Self::StrokeWidth => value.max(0.0),
            _ => value,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the SVG attribute spelling as well as the wire name
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|property| property.name() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown property `{s}`, valid properties: {}",
                    Self::ALL.map(Property::name).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_from_str() {
        assert_eq!("fill".parse::<Property>().unwrap(), Property::Fill);
        assert_eq!(
            "stroke_width".parse::<Property>().unwrap(),
            Property::StrokeWidth
        );
        assert_eq!(
            "stroke-width".parse::<Property>().unwrap(),
            Property::StrokeWidth
        );

        let result = "stroke_colour".parse::<Property>();
        assert!(result.unwrap_err().contains("unknown property"));
    }

    #[test]
    fn test_property_clamp() {
        assert_eq!(Property::FillOpacity.clamp(1.4), 1.0);
        assert_eq!(Property::FillOpacity.clamp(-0.2), 0.0);
        assert_eq!(Property::StrokeWidth.clamp(-1.0), 0.0);
        assert_eq!(Property::StrokeWidth.clamp(7.5), 7.5);
    }

    #[test]
    fn test_numeric_properties() {
        let numeric: Vec<_> = Property::ALL
            .into_iter()
            .filter(|property| property.is_numeric())
            .collect();
        assert_eq!(numeric, vec![Property::FillOpacity, Property::StrokeWidth]);
    }
}
