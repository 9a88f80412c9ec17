//! Indexed aesthetics for counting and cycling interaction modes.
//!
//! Instead of boolean select/hover layers, an [`IndexedAesthetic`] holds, per
//! property, either a single value or an ordered sequence. The region's click
//! count picks one element of each sequence:
//!
//! - wrap modes (cycling) use `count mod len`,
//! - clamp modes (counting) use `min(count, len - 1)`.
//!
//! An untouched region has count 0, so index 0 is what every region looks
//! like before the first interaction.

use serde::{Deserialize, Serialize};

use crate::{
    aesthetic::Aesthetic,
    category::{Category, Kind},
    color::Color,
    dash::DashStyle,
    error::ResolveError,
    field::{Field, NumericField},
    property::Property,
};

/// How a click count maps onto a sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRule {
    Wrap,
    Clamp,
}

impl IndexRule {
    /// Maps `count` onto `0..len`. `len` must be non-zero.
    pub fn index(self, count: u32, len: usize) -> usize {
        debug_assert!(len > 0, "sequences are never empty");
        let count = count as usize;
        match self {
            Self::Wrap => count % len,
            Self::Clamp => count.min(len - 1),
        }
    }
}

/// A single value, or one value per count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indexed<F> {
    Many(Vec<F>),
    One(F),
}

impl<F: Default> Default for Indexed<F> {
    fn default() -> Self {
        Self::One(F::default())
    }
}

impl<F: Clone + Default> Indexed<F> {
    /// Returns the element selected by `count` under `rule`.
    ///
    /// An empty sequence behaves as an unset single value.
    pub fn at(&self, count: u32, rule: IndexRule) -> F {
        match self {
            Self::One(value) => value.clone(),
            Self::Many(values) if values.is_empty() => F::default(),
            Self::Many(values) => values[rule.index(count, values.len())].clone(),
        }
    }

    /// Returns the number of distinct steps; a single value has one.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len().max(1),
        }
    }

    fn try_map<G, E>(&self, mut f: impl FnMut(&F) -> Result<G, E>) -> Result<Indexed<G>, E> {
        Ok(match self {
            Self::One(value) => Indexed::One(f(value)?),
            Self::Many(values) => Indexed::Many(values.iter().map(f).collect::<Result<_, _>>()?),
        })
    }
}

impl<F: Default + PartialEq> Indexed<F> {
    /// Returns true for a single unset value.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::One(value) if *value == F::default())
    }
}

impl<F> From<F> for Indexed<F> {
    fn from(value: F) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for Indexed<Field<T>> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values.into_iter().map(Field::Value).collect())
    }
}

impl From<Vec<f64>> for Indexed<NumericField> {
    fn from(values: Vec<f64>) -> Self {
        Self::Many(values.into_iter().map(NumericField::Value).collect())
    }
}

/// A leaf aesthetic whose properties vary with a click count.
///
/// # Examples
///
/// ```
/// use livery_core::{
///     aesthetic::Aesthetic,
///     color::Color,
///     indexed::{IndexRule, IndexedAesthetic},
/// };
///
/// let heat = IndexedAesthetic::shape().with_fill(vec![
///     Color::new("#eee").unwrap(),
///     Color::new("#fdd").unwrap(),
///     Color::new("#f66").unwrap(),
/// ]);
///
/// let third = heat.at(2, IndexRule::Clamp);
/// assert_eq!(third.fill().value().unwrap().as_str(), "#f66");
/// let wrapped = heat.at(3, IndexRule::Wrap);
/// assert_eq!(wrapped.fill().value().unwrap().as_str(), "#eee");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedAesthetic {
    #[serde(default)]
    kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(default, skip_serializing_if = "Indexed::is_unset")]
    fill: Indexed<Field<Color>>,
    #[serde(default, skip_serializing_if = "Indexed::is_unset")]
    fill_opacity: Indexed<NumericField>,
    #[serde(default, skip_serializing_if = "Indexed::is_unset")]
    stroke: Indexed<Field<Color>>,
    #[serde(default, skip_serializing_if = "Indexed::is_unset")]
    stroke_width: Indexed<NumericField>,
    #[serde(default, skip_serializing_if = "Indexed::is_unset")]
    stroke_dasharray: Indexed<Field<DashStyle>>,
    #[serde(default, skip_serializing_if = "Indexed::is_unset")]
    non_scaling_stroke: Indexed<Field<bool>>,
}

impl IndexedAesthetic {
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

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Indexed<Field<Color>>>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_fill_opacity(mut self, opacity: impl Into<Indexed<NumericField>>) -> Self {
        self.fill_opacity = opacity.into();
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Indexed<Field<Color>>>) -> Self {
        self.stroke = stroke.into();
        self
    }

    pub fn with_stroke_width(mut self, width: impl Into<Indexed<NumericField>>) -> Self {
        self.stroke_width = width.into();
        self
    }

    pub fn with_stroke_dasharray(mut self, dash: impl Into<Indexed<Field<DashStyle>>>) -> Self {
        self.stroke_dasharray = dash.into();
        self
    }

    pub fn with_non_scaling_stroke(mut self, flag: impl Into<Indexed<Field<bool>>>) -> Self {
        self.non_scaling_stroke = flag.into();
        self
    }

    /// Returns the number of steps of the longest sequence.
    pub fn steps(&self) -> usize {
        [
            self.fill.len(),
            self.fill_opacity.len(),
            self.stroke.len(),
            self.stroke_width.len(),
            self.stroke_dasharray.len(),
            self.non_scaling_stroke.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    /// Returns the properties that are set at any index and fall outside the
    /// kind's declared field set.
    pub fn mismatches(&self) -> Vec<Property> {
        let set = [
            (Property::Fill, !self.fill.is_unset()),
            (Property::FillOpacity, !self.fill_opacity.is_unset()),
            (Property::Stroke, !self.stroke.is_unset()),
            (Property::StrokeWidth, !self.stroke_width.is_unset()),
            (Property::StrokeDasharray, !self.stroke_dasharray.is_unset()),
            (Property::NonScalingStroke, !self.non_scaling_stroke.is_unset()),
        ];
        set.into_iter()
            .filter(|&(property, is_set)| is_set && !self.kind.supports(property))
            .map(|(property, _)| property)
            .collect()
    }

    /// Returns this entry as it applies to a region of `category`.
    ///
    /// For line regions every fill and fill opacity step is dropped.
    pub fn confined_to(&self, category: Category) -> IndexedAesthetic {
        let mut confined = self.clone();
        if category == Category::Line {
            confined.fill = Indexed::default();
            confined.fill_opacity = Indexed::default();
        }
        confined
    }

    /// Picks the leaf aesthetic for a click count.
    pub fn at(&self, count: u32, rule: IndexRule) -> Aesthetic {
        Aesthetic {
            kind: self.kind,
            category: self.category,
            fill: self.fill.at(count, rule),
            fill_opacity: self.fill_opacity.at(count, rule),
            stroke: self.stroke.at(count, rule),
            stroke_width: self.stroke_width.at(count, rule),
            stroke_dasharray: self.stroke_dasharray.at(count, rule),
            non_scaling_stroke: self.non_scaling_stroke.at(count, rule),
        }
    }

    /// Merges every element of every sequence over a parent leaf.
    ///
    /// Relative expressions whose referenced parent property is unset or
    /// symbolic are carried through.
    pub fn merge_over(&self, parent: &Aesthetic) -> Result<IndexedAesthetic, ResolveError> {
        fn keep<T: Clone>(field: &Field<T>, parent: &Field<T>) -> Result<Field<T>, ResolveError> {
            Ok(field.inherit(parent))
        }

        Ok(Self {
            kind: self.kind,
            category: self.category,
            fill: self.fill.try_map(|f| keep(f, &parent.fill))?,
            fill_opacity: self.fill_opacity.try_map(|f| {
                Aesthetic::merge_numeric(Property::FillOpacity, *f, parent)
            })?,
            stroke: self.stroke.try_map(|f| keep(f, &parent.stroke))?,
            stroke_width: self.stroke_width.try_map(|f| {
                Aesthetic::merge_numeric(Property::StrokeWidth, *f, parent)
            })?,
            stroke_dasharray: self
                .stroke_dasharray
                .try_map(|f| keep(f, &parent.stroke_dasharray))?,
            non_scaling_stroke: self
                .non_scaling_stroke
                .try_map(|f| keep(f, &parent.non_scaling_stroke))?,
        })
    }

    /// Resolves the leaf for a click count against a fully resolved default.
    pub fn resolve_at(
        &self,
        default: &Aesthetic,
        count: u32,
        rule: IndexRule,
    ) -> Result<Aesthetic, ResolveError> {
        self.at(count, rule).resolve(default)
    }
}
