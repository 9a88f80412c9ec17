//! Leaf aesthetics: the property bag for one element category.
//!
//! An [`Aesthetic`] is an immutable value. The `with_*` builders return new
//! values, and [`Aesthetic::resolve`] combines a child with its parent field by
//! field:
//!
//! - an unset field takes the parent's value,
//! - a relative expression evaluates against the parent's referenced property,
//! - null and explicit values override the parent outright.
//!
//! The result always carries the child's kind. A line never carries fill: its
//! effective fill and fill opacity are forced to null by resolution, whatever
//! the input said.
//!
//! # Examples
//!
//! ```
//! use livery_core::{aesthetic::Aesthetic, color::Color, property::Property, relative::Relative};
//!
//! let parent = Aesthetic::shape()
//!     .with_fill(Color::new("#eee").unwrap())
//!     .with_stroke_width(2.0);
//! let child = Aesthetic::shape().with_stroke_width(Relative::multiply(Property::StrokeWidth, 1.5));
//!
//! let resolved = child.resolve(&parent).unwrap();
//! assert_eq!(resolved.stroke_width().value(), Some(3.0));
//! assert_eq!(resolved.fill().value().map(Color::as_str), Some("#eee"));
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    category::{Category, Kind},
    color::Color,
    dash::DashStyle,
    error::ResolveError,
    field::{Field, NumericField},
    property::Property,
    relative::Relative,
};

/// A property bag for one element category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aesthetic {
    #[serde(default)]
    pub(crate) kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) category: Option<Category>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub(crate) fill: Field<Color>,
    #[serde(default, skip_serializing_if = "NumericField::is_unset")]
    pub(crate) fill_opacity: NumericField,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub(crate) stroke: Field<Color>,
    #[serde(default, skip_serializing_if = "NumericField::is_unset")]
    pub(crate) stroke_width: NumericField,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub(crate) stroke_dasharray: Field<DashStyle>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub(crate) non_scaling_stroke: Field<bool>,
}

/// What a relative expression finds when it looks up a parent property.
enum ParentValue {
    Number(f64),
    Absent,
    Symbolic,
    Other(&'static str),
}

/// How strictly relative expressions are evaluated.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Strictness {
    /// The parent is fully resolved; anything but a number is an error.
    Full,
    /// The parent may itself be symbolic or sparse; such references are
    /// carried through unevaluated.
    Partial,
}

impl Aesthetic {
    /// Creates an empty leaf of the given kind; every field inherits.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn shape() -> Self {
        Self::new(Kind::Shape)
    }

    pub fn line() -> Self {
        Self::new(Kind::Line)
    }

    pub fn text() -> Self {
        Self::new(Kind::Text)
    }

    /// Creates a path leaf, optionally declaring the category it stands for.
    pub fn path(category: Option<Category>) -> Self {
        Self {
            category,
            ..Self::new(Kind::Path)
        }
    }

    /// Creates a leaf of the given kind with every field set to null.
    ///
    /// This is what a disabled base layer draws: nothing.
    pub fn cleared(kind: Kind) -> Self {
        Self {
            kind,
            category: None,
            fill: Field::Null,
            fill_opacity: NumericField::Null,
            stroke: Field::Null,
            stroke_width: NumericField::Null,
            stroke_dasharray: Field::Null,
            non_scaling_stroke: Field::Null,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the declared default category of a path leaf.
    pub fn declared_category(&self) -> Option<Category> {
        self.category
    }

    /// Returns the effective category of this leaf.
    pub fn category(&self) -> Category {
        self.kind.category(self.category)
    }

    pub fn fill(&self) -> &Field<Color> {
        &self.fill
    }

    pub fn fill_opacity(&self) -> NumericField {
        self.fill_opacity
    }

    pub fn stroke(&self) -> &Field<Color> {
        &self.stroke
    }

    pub fn stroke_width(&self) -> NumericField {
        self.stroke_width
    }

    pub fn stroke_dasharray(&self) -> &Field<DashStyle> {
        &self.stroke_dasharray
    }

    pub fn non_scaling_stroke(&self) -> &Field<bool> {
        &self.non_scaling_stroke
    }

    /// Returns a copy of this leaf with a different kind.
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Field<Color>>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_fill_opacity(mut self, opacity: impl Into<NumericField>) -> Self {
        self.fill_opacity = opacity.into();
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Field<Color>>) -> Self {
        self.stroke = stroke.into();
        self
    }

    pub fn with_stroke_width(mut self, width: impl Into<NumericField>) -> Self {
        self.stroke_width = width.into();
        self
    }

    pub fn with_stroke_dasharray(mut self, dash: impl Into<Field<DashStyle>>) -> Self {
        self.stroke_dasharray = dash.into();
        self
    }

    pub fn with_non_scaling_stroke(mut self, flag: impl Into<Field<bool>>) -> Self {
        self.non_scaling_stroke = flag.into();
        self
    }

    /// Returns this leaf as it applies to a region of `category`.
    ///
    /// For line regions fill and fill opacity become unset, so the region's
    /// default supplies them and no relative expression on them is ever
    /// evaluated.
    pub fn confined_to(&self, category: Category) -> Aesthetic {
        let mut confined = self.clone();
        if category == Category::Line {
            confined.fill = Field::Unset;
            confined.fill_opacity = NumericField::Unset;
        }
        confined
    }

    /// Returns true if `property` is not unset on this leaf.
    pub fn is_set(&self, property: Property) -> bool {
        match property {
            Property::Fill => !self.fill.is_unset(),
            Property::FillOpacity => !self.fill_opacity.is_unset(),
            Property::Stroke => !self.stroke.is_unset(),
            Property::StrokeWidth => !self.stroke_width.is_unset(),
            Property::StrokeDasharray => !self.stroke_dasharray.is_unset(),
            Property::NonScalingStroke => !self.non_scaling_stroke.is_unset(),
        }
    }

    /// Returns true if every field inherits.
    pub fn is_empty(&self) -> bool {
        Property::ALL.into_iter().all(|property| !self.is_set(property))
    }

    /// Returns the set properties that fall outside this leaf kind's declared
    /// field set, such as fill on a line.
    pub fn mismatches(&self) -> Vec<Property> {
        Property::ALL
            .into_iter()
            .filter(|&property| self.is_set(property) && !self.kind.supports(property))
            .collect()
    }

    /// Returns the numeric fields still holding a relative expression.
    pub fn relatives(&self) -> Vec<(Property, Relative)> {
        [
            (Property::FillOpacity, self.fill_opacity),
            (Property::StrokeWidth, self.stroke_width),
        ]
        .into_iter()
        .filter_map(|(property, field)| match field {
            NumericField::Relative(expr) => Some((property, expr)),
            _ => None,
        })
        .collect()
    }

    /// Resolves this leaf against a fully resolved parent.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a relative expression references a
    /// parent property that is unset, null, symbolic or not a number.
    pub fn resolve(&self, parent: &Aesthetic) -> Result<Aesthetic, ResolveError> {
        self.resolve_with(parent, Strictness::Full)
    }

    /// Resolves this leaf against a parent that may itself be sparse or hold
    /// relative expressions.
    ///
    /// Relative expressions whose referenced parent property is unset or
    /// symbolic are carried through unevaluated, to be resolved once the
    /// concrete parent is known.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a relative expression references a
    /// parent property that is null or not a number.
    pub fn resolve_partial(&self, parent: &Aesthetic) -> Result<Aesthetic, ResolveError> {
        self.resolve_with(parent, Strictness::Partial)
    }

    fn resolve_with(
        &self,
        parent: &Aesthetic,
        strictness: Strictness,
    ) -> Result<Aesthetic, ResolveError> {
        // A line's fill is null whatever the leaf says, so nothing on the
        // fill side is evaluated for it.
        let (fill, fill_opacity) = if self.category() == Category::Line {
            (Field::Null, NumericField::Null)
        } else {
            (
                self.fill.inherit(&parent.fill),
                Self::resolve_numeric(Property::FillOpacity, self.fill_opacity, parent, strictness)?,
            )
        };

        Ok(Aesthetic {
            kind: self.kind,
            category: self.category,
            fill,
            fill_opacity,
            stroke: self.stroke.inherit(&parent.stroke),
            stroke_width: Self::resolve_numeric(
                Property::StrokeWidth,
                self.stroke_width,
                parent,
                strictness,
            )?,
            stroke_dasharray: self.stroke_dasharray.inherit(&parent.stroke_dasharray),
            non_scaling_stroke: self.non_scaling_stroke.inherit(&parent.non_scaling_stroke),
        })
    }

    /// Partially resolves a single numeric slot destined for `target`.
    pub(crate) fn merge_numeric(
        target: Property,
        field: NumericField,
        parent: &Aesthetic,
    ) -> Result<NumericField, ResolveError> {
        Self::resolve_numeric(target, field, parent, Strictness::Partial)
    }

    fn resolve_numeric(
        target: Property,
        field: NumericField,
        parent: &Aesthetic,
        strictness: Strictness,
    ) -> Result<NumericField, ResolveError> {
        let expr = match field {
            NumericField::Unset => return Ok(parent.numeric(target)),
            NumericField::Relative(expr) => expr,
            explicit => return Ok(explicit),
        };

        match (parent.lookup(expr.property()), strictness) {
            (ParentValue::Number(value), _) => {
                Ok(NumericField::Value(expr.evaluate(value, target)))
            }
            (ParentValue::Absent | ParentValue::Symbolic, Strictness::Partial) => Ok(field),
            (ParentValue::Absent, Strictness::Full) => Err(ResolveError::AbsentParent { expr }),
            (ParentValue::Symbolic, Strictness::Full) => Err(ResolveError::NonNumericParent {
                expr,
                found: "an unresolved relative expression",
            }),
            (ParentValue::Other(found), _) => {
                Err(ResolveError::NonNumericParent { expr, found })
            }
        }
    }

    fn numeric(&self, property: Property) -> NumericField {
        match property {
            Property::FillOpacity => self.fill_opacity,
            Property::StrokeWidth => self.stroke_width,
            _ => NumericField::Unset,
        }
    }

    fn lookup(&self, property: Property) -> ParentValue {
        fn other<T>(field: &Field<T>, found: &'static str) -> ParentValue {
            match field {
                Field::Unset => ParentValue::Absent,
                Field::Null => ParentValue::Other("null"),
                Field::Value(_) => ParentValue::Other(found),
            }
        }

        match property {
            Property::FillOpacity | Property::StrokeWidth => match self.numeric(property) {
                NumericField::Value(value) => ParentValue::Number(value),
                NumericField::Unset => ParentValue::Absent,
                NumericField::Null => ParentValue::Other("null"),
                NumericField::Relative(_) => ParentValue::Symbolic,
            },
            Property::Fill => other(&self.fill, "a color"),
            Property::Stroke => other(&self.stroke, "a color"),
            Property::StrokeDasharray => other(&self.stroke_dasharray, "a dash pattern"),
            Property::NonScalingStroke => other(&self.non_scaling_stroke, "a flag"),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn color(s: &str) -> Color {
        Color::new(s).unwrap()
    }

    fn concrete_parent() -> Aesthetic {
        Aesthetic::shape()
            .with_fill(color("#eee"))
            .with_fill_opacity(1.0)
            .with_stroke(color("white"))
            .with_stroke_width(1.0)
            .with_stroke_dasharray(DashStyle::Solid)
            .with_non_scaling_stroke(true)
    }

    #[test]
    fn test_unset_inherits() {
        let resolved = Aesthetic::shape().resolve(&concrete_parent()).unwrap();
        assert_eq!(resolved, concrete_parent());
    }

    #[test]
    fn test_explicit_overrides() {
        let child = Aesthetic::shape()
            .with_fill(color("#39f"))
            .with_stroke(Field::Null);
        let resolved = child.resolve(&concrete_parent()).unwrap();

        assert_eq!(resolved.fill(), &Field::Value(color("#39f")));
        assert!(resolved.stroke().is_null());
        assert_eq!(resolved.stroke_width().value(), Some(1.0));
    }

    #[test]
    fn test_null_does_not_inherit() {
        let parent = Aesthetic::shape().with_fill(Field::Null);
        let child = Aesthetic::shape();
        let grandchild = Aesthetic::shape();

        let resolved = grandchild
            .resolve(&child.resolve(&parent).unwrap())
            .unwrap();
        assert!(resolved.fill().is_null());
    }

    #[test]
    fn test_relative_against_other_property() {
        let child = Aesthetic::shape()
            .with_stroke_width(Relative::multiply(Property::FillOpacity, 4.0));
        let parent = concrete_parent().with_fill_opacity(0.5);

        let resolved = child.resolve(&parent).unwrap();
        assert_approx_eq!(f64, resolved.stroke_width().value().unwrap(), 2.0);
    }

    #[test]
    fn test_relative_against_color_fails() {
        let child = Aesthetic::shape().with_stroke_width(Relative::add(Property::Fill, 1.0));
        let err = child.resolve(&concrete_parent()).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::NonNumericParent {
                found: "a color",
                ..
            }
        ));
    }

    #[test]
    fn test_relative_against_absent_fails() {
        let child = Aesthetic::shape().with_stroke_width(Relative::add(Property::StrokeWidth, 1.0));
        let err = child.resolve(&Aesthetic::shape()).unwrap_err();

        assert!(matches!(err, ResolveError::AbsentParent { .. }));
    }

    #[test]
    fn test_relative_against_null_fails() {
        let child = Aesthetic::shape().with_stroke_width(Relative::add(Property::StrokeWidth, 1.0));
        let parent = concrete_parent().with_stroke_width(NumericField::Null);

        assert!(matches!(
            child.resolve(&parent),
            Err(ResolveError::NonNumericParent { found: "null", .. })
        ));
        assert!(child.resolve_partial(&parent).is_err());
    }

    #[test]
    fn test_partial_threads_symbolic_parent() {
        let wash_hover = Aesthetic::shape().with_stroke_width(Relative::add(Property::StrokeWidth, 1.0));
        let caller_hover =
            Aesthetic::shape().with_stroke_width(Relative::multiply(Property::StrokeWidth, 1.5));

        let merged = caller_hover.resolve_partial(&wash_hover).unwrap();
        assert_eq!(
            merged.stroke_width(),
            NumericField::Relative(Relative::multiply(Property::StrokeWidth, 1.5))
        );

        // An unset caller field picks up the wash's own expression
        let merged = Aesthetic::shape().resolve_partial(&wash_hover).unwrap();
        assert_eq!(
            merged.stroke_width(),
            NumericField::Relative(Relative::add(Property::StrokeWidth, 1.0))
        );
    }

    #[test]
    fn test_partial_threads_sparse_parent() {
        let child = Aesthetic::shape().with_stroke_width(Relative::add(Property::StrokeWidth, 1.0));
        let merged = child.resolve_partial(&Aesthetic::shape()).unwrap();
        assert!(merged.stroke_width().is_symbolic());
    }

    #[test]
    fn test_result_kind_matches_child() {
        let child = Aesthetic::text();
        let resolved = child.resolve(&concrete_parent()).unwrap();
        assert_eq!(resolved.kind(), Kind::Text);
    }

    #[test]
    fn test_line_fill_forced_null() {
        let line = Aesthetic::line().with_fill(color("red"));
        // Kept as written
        assert_eq!(line.fill(), &Field::Value(color("red")));
        assert_eq!(line.mismatches(), vec![Property::Fill]);

        let resolved = line.resolve(&concrete_parent()).unwrap();
        assert!(resolved.fill().is_null());
        assert!(resolved.fill_opacity().is_null());
        assert_eq!(resolved.kind(), Kind::Line);
    }

    #[test]
    fn test_line_path_fill_forced_null() {
        let path = Aesthetic::path(Some(Category::Line))
            .with_fill(color("red"))
            .with_fill_opacity(Relative::multiply(Property::FillOpacity, 0.5));

        let resolved = path.resolve(&concrete_parent()).unwrap();
        assert!(resolved.fill().is_null());
        assert!(resolved.fill_opacity().is_null());
        assert_eq!(resolved.kind(), Kind::Path);
    }

    #[test]
    fn test_line_skips_fill_opacity_relative() {
        let parent = concrete_parent().with_fill_opacity(NumericField::Null);
        let line = Aesthetic::line().with_fill_opacity(Relative::multiply(Property::FillOpacity, 0.8));

        assert!(line.resolve(&parent).is_ok());
        assert!(line.resolve_partial(&parent).is_ok());

        let confined = Aesthetic::shape()
            .with_fill_opacity(Relative::multiply(Property::FillOpacity, 0.8))
            .confined_to(Category::Line);
        assert!(confined.fill_opacity().is_unset());
        let resolved = confined.resolve(&parent).unwrap();
        assert!(resolved.fill_opacity().is_null());
    }

    #[test]
    fn test_cleared() {
        let cleared = Aesthetic::cleared(Kind::Shape);
        assert!(Property::ALL.into_iter().all(|p| cleared.is_set(p)));
        assert!(cleared.fill().is_null());
    }

    #[test]
    fn test_serde_sparse() {
        let leaf = Aesthetic::shape()
            .with_fill(Field::Null)
            .with_stroke_width(Relative::add(Property::StrokeWidth, 1.0));
        let json = serde_json::to_value(&leaf).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "kind": "shape",
                "fill": null,
                "stroke_width": {"relative": ["stroke_width", "+", 1.0]},
            })
        );
    }
}
