//! The wash: an application-wide theme beneath every diagram.
//!
//! A wash holds one complete state container per category. It is built by
//! merging each category seed's `__all` entry over the library built-ins, so
//! every wash base layer is fully concrete unless a seed disables it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    aesthetic::Aesthetic,
    category::{Category, Kind},
    color::Color,
    dash::DashStyle,
    error::ResolveError,
    field::{Field, NumericField},
    property::Property,
    relative::Relative,
    state::StateAesthetic,
    table::{ALL_KEY, Entry, GroupTable},
};

/// Group-table-shaped theme seeds, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WashSeeds {
    #[serde(default)]
    pub shape: GroupTable,
    #[serde(default)]
    pub line: GroupTable,
    #[serde(default)]
    pub text: GroupTable,
}

impl WashSeeds {
    pub fn get(&self, category: Category) -> &GroupTable {
        match category {
            Category::Shape => &self.shape,
            Category::Line => &self.line,
            Category::Text => &self.text,
        }
    }
}

/// Per-category state containers forming the theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Wash {
    shape: StateAesthetic,
    line: StateAesthetic,
    text: StateAesthetic,
}

impl Default for Wash {
    fn default() -> Self {
        Self::library()
    }
}

impl Wash {
    /// Returns the library built-in theme.
    pub fn library() -> Self {
        Self {
            shape: library_state(Category::Shape),
            line: library_state(Category::Line),
            text: library_state(Category::Text),
        }
    }

    /// Returns the fully resolved default leaf for a category.
    ///
    /// This is the library built-in base layer; every region's resolution
    /// starts from it.
    pub fn default_leaf(category: Category) -> Aesthetic {
        library_base(category)
    }

    /// Builds a wash from raw seeds.
    ///
    /// Only each seed's `__all` entry contributes. Other keys are ignored
    /// with a warning, as are indexed entries, which have no state form.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a seed's relative expression cannot be
    /// evaluated against the built-ins.
    pub fn from_seeds(seeds: &WashSeeds) -> Result<Self, ResolveError> {
        let mut wash = Self::library();
        for category in Category::ALL {
            let seed = seeds.get(category);
            for key in seed.keys().filter(|&key| key != ALL_KEY) {
                warn!(category = category.name(), key; "Ignoring wash seed key; only `__all` applies");
            }

            let Some(entry) = seed.get(ALL_KEY) else {
                continue;
            };
            let Some(state) = entry.to_state() else {
                warn!(category = category.name(), entry = entry.shape_name(); "Ignoring wash seed entry without a state form");
                continue;
            };

            let merged = state.confined_to(category).merge_over(wash.get(category))?;
            debug!(category = category.name(); "Merged wash seed over library defaults");
            *wash.get_mut(category) = merged;
        }
        Ok(wash)
    }

    /// Replaces the container of one category.
    pub fn with(mut self, category: Category, state: StateAesthetic) -> Self {
        *self.get_mut(category) = state;
        self
    }

    pub fn get(&self, category: Category) -> &StateAesthetic {
        match category {
            Category::Shape => &self.shape,
            Category::Line => &self.line,
            Category::Text => &self.text,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut StateAesthetic {
        match category {
            Category::Shape => &mut self.shape,
            Category::Line => &mut self.line,
            Category::Text => &mut self.text,
        }
    }

    /// Merges an optional caller entry over one category's container.
    ///
    /// A missing entry yields the wash container itself. Entries merged for
    /// lines lose their fill first.
    pub fn merge(&self, entry: Option<&Entry>, category: Category) -> Result<Entry, ResolveError> {
        let parent = self.get(category);
        match entry {
            Some(entry) => entry.confined_to(category).merge_over(parent),
            None => Ok(Entry::State(parent.clone())),
        }
    }
}

fn color(literal: &'static str) -> Color {
    Color::builtin(literal)
}

fn library_base(category: Category) -> Aesthetic {
    match category {
        Category::Shape => Aesthetic::shape()
            .with_fill(color("#e2e8f0"))
            .with_fill_opacity(1.0)
            .with_stroke(color("#94a3b8"))
            .with_stroke_width(0.5)
            .with_stroke_dasharray(DashStyle::Solid)
            .with_non_scaling_stroke(true),
        Category::Line => Aesthetic {
            fill: Field::Null,
            fill_opacity: NumericField::Null,
            ..Aesthetic::line()
                .with_stroke(color("#64748b"))
                .with_stroke_width(1.0)
                .with_stroke_dasharray(DashStyle::Solid)
                .with_non_scaling_stroke(true)
        },
        Category::Text => Aesthetic::text()
            .with_fill(color("#1e293b"))
            .with_fill_opacity(1.0)
            .with_stroke(Field::Null)
            .with_stroke_width(0.0)
            .with_stroke_dasharray(DashStyle::Solid),
    }
}

fn library_state(category: Category) -> StateAesthetic {
    let select = match category {
        Category::Shape => Aesthetic::shape()
            .with_fill(color("#60a5fa"))
            .with_stroke(color("#1d4ed8")),
        Category::Line => Aesthetic::line().with_stroke(color("#2563eb")),
        Category::Text => Aesthetic::text().with_fill(color("#1d4ed8")),
    };
    let hover = Aesthetic::new(Kind::of(category))
        .with_stroke_width(Relative::add(Property::StrokeWidth, 1.0));

    StateAesthetic::new()
        .with_base(library_base(category))
        .with_select(select)
        .with_hover(hover)
}
