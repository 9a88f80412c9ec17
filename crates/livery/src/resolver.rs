//! Per-region resolution shared by immediate and deferred mode.
//!
//! Both modes go through [`Resolver`]: the server resolves a snapshot with
//! it, and a [`SurfaceModel`](crate::surface::SurfaceModel) resolves live
//! state with it after decoding a payload. Sharing one code path is what
//! makes the two agree exactly.

use indexmap::IndexMap;
use log::debug;

use livery_core::{
    aesthetic::Aesthetic,
    category::Category,
    error::ResolveError,
    flat::FlatAesthetic,
    mode::{Mode, RegionState, Snapshot},
    table::{GroupTable, candidates, is_reserved},
};

use crate::payload::Defaults;

/// A read-only view over the parts of a payload that resolution needs.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    aes: &'a GroupTable,
    members: &'a IndexMap<String, Vec<String>>,
    defaults: &'a Defaults,
    mode: Mode,
}

impl<'a> Resolver<'a> {
    pub fn new(
        aes: &'a GroupTable,
        members: &'a IndexMap<String, Vec<String>>,
        defaults: &'a Defaults,
        mode: Mode,
    ) -> Self {
        Self {
            aes,
            members,
            defaults,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the category of a region, shape when unlisted.
    pub fn category_of(&self, region: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|category| {
                self.members
                    .get(category.table_key())
                    .is_some_and(|ids| ids.iter().any(|id| id == region))
            })
            .unwrap_or_default()
    }

    /// Returns the groups containing a region, in declaration order.
    pub fn groups_of<'r>(&'r self, region: &'r str) -> impl Iterator<Item = &'r str> + 'r {
        self.members
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .filter(move |(_, ids)| ids.iter().any(|id| id == region))
            .map(|(key, _)| key.as_str())
    }

    /// Returns every region, category by category.
    pub fn regions(&self) -> impl Iterator<Item = &'a str> + 'a {
        let members = self.members;
        Category::ALL
            .into_iter()
            .filter_map(move |category| members.get(category.table_key()))
            .flatten()
            .map(String::as_str)
    }

    /// Resolves one region to a concrete leaf.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a relative expression references a
    /// property that is null or absent in the layer below it.
    pub fn resolve(&self, region: &str, state: RegionState) -> Result<Aesthetic, ResolveError> {
        let category = self.category_of(region);
        let default = self.defaults.get(category);
        let keys = candidates(region, category, self.groups_of(region));

        match self.aes.lookup(keys) {
            Some((key, entry)) => {
                debug!(region, key, entry = entry.shape_name(); "Resolving region");
                entry
                    .confined_to(category)
                    .resolve_for_region(default, state, self.mode.index_rule())
            }
            None => Ok(default.clone()),
        }
    }

    /// Resolves one region to a flat property map.
    pub fn flat(&self, region: &str, state: RegionState) -> Result<FlatAesthetic, ResolveError> {
        let leaf = self.resolve(region, state)?;
        FlatAesthetic::flatten(&leaf, self.category_of(region))
    }

    /// Resolves the given regions for one fixed interaction state.
    pub fn snapshot<'r>(
        &self,
        regions: impl IntoIterator<Item = &'r str>,
        snapshot: &Snapshot,
    ) -> Result<IndexMap<String, FlatAesthetic>, ResolveError> {
        regions
            .into_iter()
            .map(|region| {
                let state = snapshot.state_of(self.mode, region);
                Ok((region.to_string(), self.flat(region, state)?))
            })
            .collect()
    }
}
