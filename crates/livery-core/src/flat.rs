//! Flat property maps: the final, fully resolved look of one region.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    aesthetic::Aesthetic,
    category::Category,
    color::Color,
    dash::DashStyle,
    error::ResolveError,
    field::{Field, NumericField},
    property::Property,
};

/// A concrete property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Color(Color),
    Number(f64),
    Dash(DashStyle),
    Flag(bool),
    /// Deliberately absent; rendered as `none`.
    Null,
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => write!(f, "{color}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Dash(dash) => write!(f, "{dash}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Null => f.write_str("none"),
        }
    }
}

/// The resolved properties of one region.
///
/// Properties left unset all the way down are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatAesthetic {
    values: IndexMap<Property, FlatValue>,
}

impl FlatAesthetic {
    /// Flattens a resolved leaf for a region of `category`.
    ///
    /// Line regions never carry fill: their fill and fill opacity come out
    /// null whatever the leaf says.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Unresolved`] if a relative expression is left.
    pub fn flatten(leaf: &Aesthetic, category: Category) -> Result<Self, ResolveError> {
        let mut values = IndexMap::new();

        fn put<T>(
            values: &mut IndexMap<Property, FlatValue>,
            property: Property,
            field: &Field<T>,
            wrap: impl FnOnce(T) -> FlatValue,
        ) where
            T: Clone,
        {
            match field {
                Field::Unset => {}
                Field::Null => {
                    values.insert(property, FlatValue::Null);
                }
                Field::Value(value) => {
                    values.insert(property, wrap(value.clone()));
                }
            }
        }

        fn put_numeric(
            values: &mut IndexMap<Property, FlatValue>,
            property: Property,
            field: NumericField,
        ) -> Result<(), ResolveError> {
            match field {
                NumericField::Unset => {}
                NumericField::Null => {
                    values.insert(property, FlatValue::Null);
                }
                NumericField::Value(value) => {
                    values.insert(property, FlatValue::Number(value));
                }
                NumericField::Relative(expr) => {
                    return Err(ResolveError::Unresolved { property, expr });
                }
            }
            Ok(())
        }

        put(&mut values, Property::Fill, leaf.fill(), FlatValue::Color);
        put_numeric(&mut values, Property::FillOpacity, leaf.fill_opacity())?;
        put(&mut values, Property::Stroke, leaf.stroke(), FlatValue::Color);
        put_numeric(&mut values, Property::StrokeWidth, leaf.stroke_width())?;
        put(
            &mut values,
            Property::StrokeDasharray,
            leaf.stroke_dasharray(),
            FlatValue::Dash,
        );
        put(
            &mut values,
            Property::NonScalingStroke,
            leaf.non_scaling_stroke(),
            FlatValue::Flag,
        );

        if category == Category::Line {
            values.insert(Property::Fill, FlatValue::Null);
            values.insert(Property::FillOpacity, FlatValue::Null);
        }

        Ok(Self { values })
    }

    pub fn get(&self, property: Property) -> Option<&FlatValue> {
        self.values.get(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &FlatValue)> {
        self.values.iter().map(|(property, value)| (*property, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Projects this map onto SVG presentation attributes.
    ///
    /// Null paints and widths render as `none`. A solid dash pattern and a
    /// false non-scaling flag emit no attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use livery_core::{aesthetic::Aesthetic, category::Category, color::Color, flat::FlatAesthetic};
    ///
    /// let leaf = Aesthetic::shape()
    ///     .with_fill(Color::new("#39f").unwrap())
    ///     .with_stroke_width(2.0)
    ///     .with_non_scaling_stroke(true);
    /// let flat = FlatAesthetic::flatten(&leaf, Category::Shape).unwrap();
    /// let attrs = flat.svg_attributes();
    ///
    /// assert_eq!(attrs["fill"], "#39f");
    /// assert_eq!(attrs["stroke-width"], "2");
    /// assert_eq!(attrs["vector-effect"], "non-scaling-stroke");
    /// ```
    pub fn svg_attributes(&self) -> IndexMap<&'static str, String> {
        let mut attrs = IndexMap::new();
        for (property, value) in self.iter() {
            match (property, value) {
                (Property::StrokeDasharray, FlatValue::Dash(dash)) => {
                    if let Some(pattern) = dash.to_svg_value() {
                        attrs.insert("stroke-dasharray", pattern);
                    }
                }
                (Property::NonScalingStroke, FlatValue::Flag(true)) => {
                    attrs.insert("vector-effect", "non-scaling-stroke".to_string());
                }
                (Property::NonScalingStroke, _) => {}
                (property, value) => {
                    attrs.insert(svg_name(property), value.to_string());
                }
            }
        }
        attrs
    }
}

fn svg_name(property: Property) -> &'static str {
    match property {
        Property::Fill => "fill",
        Property::FillOpacity => "fill-opacity",
        Property::Stroke => "stroke",
        Property::StrokeWidth => "stroke-width",
        Property::StrokeDasharray => "stroke-dasharray",
        Property::NonScalingStroke => "vector-effect",
    }
}
