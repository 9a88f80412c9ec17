//! The payload sent to a live surface for deferred resolution.
//!
//! A payload is self-contained: the merged table, the member list of every
//! key, the per-category default leaves and the interaction mode. A client
//! that decodes it resolves every region exactly as [`Resolver`] does on the
//! server side.

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};

use livery_core::{
    aesthetic::Aesthetic,
    category::Category,
    mode::{Mode, Selection},
    table::GroupTable,
    wash::Wash,
};

use crate::{geometry::Geometry, resolver::Resolver};

/// The fully resolved default leaf of each category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub shape: Aesthetic,
    pub line: Aesthetic,
    pub text: Aesthetic,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            shape: Wash::default_leaf(Category::Shape),
            line: Wash::default_leaf(Category::Line),
            text: Wash::default_leaf(Category::Text),
        }
    }
}

impl Defaults {
    pub fn get(&self, category: Category) -> &Aesthetic {
        match category {
            Category::Shape => &self.shape,
            Category::Line => &self.line,
            Category::Text => &self.text,
        }
    }
}

/// Everything a surface needs to resolve its regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub mode: Mode,
    /// The merged group table.
    pub aes: GroupTable,
    /// Region ids per category key, then member ids per group.
    pub members: IndexMap<String, Vec<String>>,
    pub defaults: Defaults,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tooltips: IndexMap<String, String>,
    /// The current value of the selection state machine.
    #[serde(default)]
    pub value: Selection,
}

impl Payload {
    /// Assembles a payload from a merged table and the diagram geometry.
    ///
    /// The member lists always hold all three category keys, so a client
    /// knows the category of every region without the geometry.
    pub fn assemble(
        geometry: &Geometry,
        aes: GroupTable,
        mode: Mode,
        tooltips: IndexMap<String, String>,
        value: Selection,
    ) -> Self {
        let mut members = IndexMap::new();
        for category in Category::ALL {
            let ids = geometry
                .regions_of(category)
                .into_iter()
                .map(str::to_string)
                .collect();
            members.insert(category.table_key().to_string(), ids);
        }
        for group in geometry.groups() {
            let ids = geometry.members(group).map(<[String]>::to_vec).unwrap_or_default();
            members.insert(group.to_string(), ids);
        }

        let payload = Self {
            mode,
            aes,
            members,
            defaults: Defaults::default(),
            tooltips,
            value,
        };
        trace!(payload:?; "Assembled payload");
        payload
    }

    /// Returns a resolver over this payload.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.aes, &self.members, &self.defaults, self.mode)
    }

    /// Serializes this payload to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
