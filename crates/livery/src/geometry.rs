//! Geometry metadata supplied by the outline collaborator.
//!
//! Livery never reads outlines itself. It only needs to know, per region,
//! which categories of element it draws, and which groups exist.
//!
//! # Example
//!
//! ```
//! # use livery::geometry::Geometry;
//! # use livery_core::category::Category;
//! let geometry = Geometry::new()
//!     .with_region("r1", [Category::Shape])
//!     .with_region("d1", [Category::Line])
//!     .with_group("coast", ["r1"]);
//!
//! assert_eq!(geometry.category_of("d1"), Some(Category::Line));
//! assert_eq!(geometry.groups_of("r1").collect::<Vec<_>>(), vec!["coast"]);
//! ```

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use livery_core::{category::Category, table::is_reserved};

/// The bounding viewport of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Region and group metadata for one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Region id to the categories of its drawable elements, in drawing order.
    #[serde(default)]
    regions: IndexMap<String, Vec<Category>>,
    /// Group name to member region ids, in declaration order.
    #[serde(default)]
    groups: IndexMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    viewbox: Option<ViewBox>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(
        mut self,
        id: impl Into<String>,
        categories: impl IntoIterator<Item = Category>,
    ) -> Self {
        self.regions
            .insert(id.into(), categories.into_iter().collect());
        self
    }

    pub fn with_group<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        self.groups
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_viewbox(mut self, viewbox: ViewBox) -> Self {
        self.viewbox = Some(viewbox);
        self
    }

    pub fn viewbox(&self) -> Option<ViewBox> {
        self.viewbox
    }

    /// Returns region ids in declaration order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Returns group names in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn members(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn has_region(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Returns the category of a region.
    ///
    /// A region whose elements all share one category takes that category;
    /// a mixed or empty region counts as a shape.
    pub fn category_of(&self, id: &str) -> Option<Category> {
        let categories = self.regions.get(id)?;
        let mut iter = categories.iter().copied();
        let first = iter.next().unwrap_or_default();
        Some(if iter.all(|category| category == first) {
            first
        } else {
            Category::Shape
        })
    }

    /// Returns the region ids of one category in declaration order.
    pub fn regions_of(&self, category: Category) -> Vec<&str> {
        self.regions()
            .filter(|id| self.category_of(id) == Some(category))
            .collect()
    }

    /// Returns true if at least one region has `category`.
    pub fn has_category(&self, category: Category) -> bool {
        self.regions().any(|id| self.category_of(id) == Some(category))
    }

    /// Returns the groups containing a region, in declaration order.
    pub fn groups_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.groups
            .iter()
            .filter(move |(_, members)| members.iter().any(|member| member == id))
            .map(|(name, _)| name.as_str())
    }

    /// Reports inconsistencies that do not prevent resolution.
    ///
    /// Returns one message per group member naming an unknown region and per
    /// id that shadows a reserved key or another id.
    pub fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (name, members) in &self.groups {
            if self.regions.contains_key(name) {
                problems.push(format!("group `{name}` has the same name as a region"));
            }
            for member in members.iter().filter(|member| !self.has_region(member)) {
                problems.push(format!("group `{name}` lists unknown region `{member}`"));
            }
        }
        for key in self.regions().chain(self.groups()).filter(|key| is_reserved(key)) {
            problems.push(format!("`{key}` is a reserved key and cannot name a region or group"));
        }
        for problem in &problems {
            warn!(problem = problem.as_str(); "Inconsistent geometry");
        }
        problems
    }
}
