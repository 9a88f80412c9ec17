//! Element categories and leaf kinds.
//!
//! Every drawable element delivered by the geometry collaborator carries
//! exactly one [`Category`]. Every leaf aesthetic carries a [`Kind`], which is
//! a category plus the `path` kind that may declare a default category of its
//! own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::property::Property;

/// The category of a drawable element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Closed outlines: polygons, circles, rectangles.
    #[default]
    Shape,
    /// Open strokes: dividers, connectors, borders.
    Line,
    /// Labels.
    Text,
}

impl Category {
    /// All categories, in the order their default keys are probed and emitted.
    pub const ALL: [Category; 3] = [Category::Shape, Category::Line, Category::Text];

    /// Returns the reserved group-table key for this category (`__shape`, ...).
    pub fn table_key(self) -> &'static str {
        match self {
            Self::Shape => "__shape",
            Self::Line => "__line",
            Self::Text => "__text",
        }
    }

    /// Returns the category whose reserved key is `key`, if any.
    pub fn from_table_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.table_key() == key)
    }

    /// Returns the plain name of this category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Line => "line",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared kind of a leaf aesthetic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Shape,
    Line,
    Text,
    /// A free-form outline. Its effective category comes from the leaf's
    /// declared default category, falling back to shape.
    Path,
}

impl Kind {
    /// Returns the leaf kind matching an element category.
    pub fn of(category: Category) -> Self {
        match category {
            Category::Shape => Self::Shape,
            Category::Line => Self::Line,
            Category::Text => Self::Text,
        }
    }

    /// Returns the effective category of this kind.
    ///
    /// `declared` is only consulted for [`Kind::Path`].
    pub fn category(self, declared: Option<Category>) -> Category {
        match self {
            Self::Shape => Category::Shape,
            Self::Line => Category::Line,
            Self::Text => Category::Text,
            Self::Path => declared.unwrap_or(Category::Shape),
        }
    }

    /// Returns true if `property` belongs to this kind's declared field set.
    ///
    /// Properties outside the set are still stored and round-tripped; callers
    /// report them as shape mismatches.
    pub fn supports(self, property: Property) -> bool {
        match self {
            Self::Shape | Self::Path => true,
            Self::Line => !matches!(property, Property::Fill | Property::FillOpacity),
            Self::Text => !matches!(property, Property::NonScalingStroke),
        }
    }

    /// Returns the plain name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Line => "line",
            Self::Text => "text",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
