//! Group tables: keyed lookup of the entry governing each region.
//!
//! A table maps keys to [`Entry`] values. Four keys are reserved:
//!
//! | Key | Governs |
//! |-----|---------|
//! | `__all` | every region (global fallback) |
//! | `__shape`, `__line`, `__text` | regions of one category |
//!
//! Every other key names a group or a region id. A missing key is unset.
//!
//! Lookup walks an ordered candidate list and stops at the first key present
//! in the table: region id, then each group containing the region in
//! declaration order, then the category key, then `__all`.
//!
//! On the wire an entry is untagged: a disabled entry is `null`, a state
//! container is an object of `base`, `select` and `hover` layers, an indexed
//! entry is a leaf object with at least one array-valued property, and
//! anything else is a leaf. An indexed entry without any sequence travels as
//! the leaf it is equivalent to.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    aesthetic::Aesthetic,
    category::Category,
    error::ResolveError,
    indexed::{IndexRule, IndexedAesthetic},
    mode::RegionState,
    state::StateAesthetic,
};

/// The global fallback key.
pub const ALL_KEY: &str = "__all";

/// Returns true for `__all` and the per-category keys.
pub fn is_reserved(key: &str) -> bool {
    key == ALL_KEY || Category::from_table_key(key).is_some()
}

/// A group-table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Never style regions matched by this key; lookup stops here.
    Disabled,
    Leaf(Aesthetic),
    State(StateAesthetic),
    Indexed(IndexedAesthetic),
}

impl Entry {
    /// Returns the entry as a state container.
    ///
    /// A leaf becomes the base layer. Indexed entries have no state
    /// container form and return `None`.
    pub fn to_state(&self) -> Option<StateAesthetic> {
        match self {
            Self::Disabled => Some(StateAesthetic::disabled()),
            Self::Leaf(leaf) => Some(StateAesthetic::from(leaf.clone())),
            Self::State(state) => Some(state.clone()),
            Self::Indexed(_) => None,
        }
    }

    /// Returns a short name of the entry's shape for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Leaf(_) => "leaf",
            Self::State(_) => "state",
            Self::Indexed(_) => "indexed",
        }
    }

    /// Merges this entry over a parent state container, layer by layer.
    ///
    /// Relative expressions whose referenced parent property is still
    /// symbolic are carried through unevaluated.
    pub fn merge_over(&self, parent: &StateAesthetic) -> Result<Entry, ResolveError> {
        match self {
            Self::Disabled => Ok(Self::Disabled),
            Self::Leaf(leaf) => Ok(Self::State(
                StateAesthetic::from(leaf.clone()).merge_over(parent)?,
            )),
            Self::State(state) => Ok(Self::State(state.merge_over(parent)?)),
            Self::Indexed(indexed) => {
                let base = parent.base().aesthetic().cloned().unwrap_or_default();
                Ok(Self::Indexed(indexed.merge_over(&base)?))
            }
        }
    }

    /// Returns this entry as it applies to a region of `category`.
    ///
    /// Line regions never carry fill, so every leaf loses its fill and fill
    /// opacity before anything evaluates against them. Other categories get
    /// the entry back unchanged.
    pub fn confined_to(&self, category: Category) -> Cow<'_, Entry> {
        if category != Category::Line {
            return Cow::Borrowed(self);
        }
        Cow::Owned(match self {
            Self::Disabled => Self::Disabled,
            Self::Leaf(leaf) => Self::Leaf(leaf.confined_to(category)),
            Self::State(state) => Self::State(state.confined_to(category)),
            Self::Indexed(indexed) => Self::Indexed(indexed.confined_to(category)),
        })
    }

    /// Resolves this entry for one region.
    ///
    /// State containers use the selected and hovered flags; indexed entries
    /// use the click count under `rule`.
    pub fn resolve_for_region(
        &self,
        default: &Aesthetic,
        state: RegionState,
        rule: IndexRule,
    ) -> Result<Aesthetic, ResolveError> {
        match self {
            Self::Disabled => StateAesthetic::disabled().resolve_base(default),
            Self::Leaf(leaf) => leaf.resolve(default),
            Self::State(container) => {
                container.resolve_for_region(default, state.selected, state.hovered)
            }
            Self::Indexed(indexed) => indexed.resolve_at(default, state.count, rule),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_none(),
            Self::Leaf(leaf) => leaf.serialize(serializer),
            Self::State(state) => state.serialize(serializer),
            Self::Indexed(indexed) => indexed.serialize(serializer),
        }
    }
}

// Tried in order: state containers reject leaf keys, and leaves reject
// array-valued properties.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    State(StateAesthetic),
    Leaf(Aesthetic),
    Indexed(IndexedAesthetic),
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<EntryRepr>::deserialize(deserializer)? {
            None => Self::Disabled,
            Some(EntryRepr::State(state)) => Self::State(state),
            Some(EntryRepr::Leaf(leaf)) => Self::Leaf(leaf),
            Some(EntryRepr::Indexed(indexed)) => Self::Indexed(indexed),
        })
    }
}

impl From<Aesthetic> for Entry {
    fn from(leaf: Aesthetic) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<StateAesthetic> for Entry {
    fn from(state: StateAesthetic) -> Self {
        Self::State(state)
    }
}

impl From<IndexedAesthetic> for Entry {
    fn from(indexed: IndexedAesthetic) -> Self {
        Self::Indexed(indexed)
    }
}

/// An ordered map from keys to entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupTable {
    entries: IndexMap<String, Entry>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promotes a bare entry to a table holding only `__all`.
    pub fn from_entry(entry: impl Into<Entry>) -> Self {
        Self::new().with(ALL_KEY, entry)
    }

    pub fn with(mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Inserts an entry, replacing any previous entry under the same key but
    /// keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) {
        self.entries.insert(key.into(), entry.into());
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first candidate key present in the table with its entry.
    pub fn lookup<'a, I>(&self, candidates: I) -> Option<(&str, &Entry)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .find_map(|key| self.entries.get_key_value(key))
            .map(|(key, entry)| (key.as_str(), entry))
    }
}

impl FromIterator<(String, Entry)> for GroupTable {
    fn from_iter<T: IntoIterator<Item = (String, Entry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Builds the ordered lookup candidates for a region.
///
/// `groups` must yield the groups containing the region in declaration order.
pub fn candidates<'a>(
    region: &'a str,
    category: Category,
    groups: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut keys = vec![region];
    keys.extend(groups);
    keys.push(category.table_key());
    keys.push(ALL_KEY);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, field::Field, mode::RegionState};

    fn fill(color: &str) -> Entry {
        Entry::Leaf(Aesthetic::shape().with_fill(Color::new(color).unwrap()))
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved("__all"));
        assert!(is_reserved("__text"));
        assert!(!is_reserved("__other"));
        assert!(!is_reserved("north"));
    }

    #[test]
    fn test_region_beats_group_regardless_of_order() {
        let table = GroupTable::new()
            .with("coast", fill("blue"))
            .with("__all", fill("gray"))
            .with("r1", fill("red"));

        let keys = candidates("r1", Category::Shape, ["coast"]);
        let (key, _) = table.lookup(keys).unwrap();
        assert_eq!(key, "r1");

        let keys = candidates("r2", Category::Shape, ["coast"]);
        assert_eq!(table.lookup(keys).unwrap().0, "coast");

        let keys = candidates("r3", Category::Shape, []);
        assert_eq!(table.lookup(keys).unwrap().0, "__all");
    }

    #[test]
    fn test_first_declared_group_wins() {
        let table = GroupTable::new()
            .with("south", fill("green"))
            .with("coast", fill("blue"));
        let keys = candidates("r1", Category::Shape, ["coast", "south"]);
        assert_eq!(table.lookup(keys).unwrap().0, "coast");
    }

    #[test]
    fn test_category_key_before_all() {
        let table = GroupTable::new()
            .with("__all", fill("gray"))
            .with("__line", Entry::Disabled);
        let keys = candidates("d1", Category::Line, []);
        assert_eq!(table.lookup(keys), Some(("__line", &Entry::Disabled)));
    }

    #[test]
    fn test_disabled_entry_clears() {
        let default = Aesthetic::shape().with_fill(Color::new("white").unwrap());
        let resolved = Entry::Disabled
            .resolve_for_region(&default, RegionState::untouched(), IndexRule::Clamp)
            .unwrap();
        assert!(resolved.fill().is_null());
    }

    #[test]
    fn test_promotion() {
        let table = GroupTable::from_entry(Aesthetic::line());
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["__all"]);
    }

    #[test]
    fn test_table_serde_round_trip() {
        let table = GroupTable::new()
            .with("__all", StateAesthetic::new().with_hover(crate::state::Layer::Disabled))
            .with("r1", Entry::Disabled)
            .with("r2", Aesthetic::shape().with_fill(Field::Null));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["__all"], serde_json::json!({"hover": null}));
        assert_eq!(json["r1"], serde_json::Value::Null);
        assert_eq!(json["r2"], serde_json::json!({"kind": "shape", "fill": null}));

        let back: GroupTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_entry_wire_shapes() {
        let state: Entry = serde_json::from_value(serde_json::json!({
            "base": {"kind": "shape", "fill": "#eee"},
            "select": "inherit",
            "hover": null,
        }))
        .unwrap();
        let Entry::State(state) = state else {
            panic!("Expected state container");
        };
        assert!(state.select().is_unset());
        assert!(state.hover().is_disabled());

        let indexed: Entry = serde_json::from_value(serde_json::json!({
            "kind": "shape",
            "fill": ["#fff", "#f33"],
        }))
        .unwrap();
        assert!(matches!(indexed, Entry::Indexed(_)));

        let leaf: Entry =
            serde_json::from_value(serde_json::json!({"kind": "line", "stroke_width": 2.0}))
                .unwrap();
        assert!(matches!(leaf, Entry::Leaf(_)));

        let indexed = Entry::Indexed(
            IndexedAesthetic::shape().with_fill(vec![Color::new("#fdd").unwrap(), Color::new("#f33").unwrap()]),
        );
        let json = serde_json::to_value(&indexed).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "shape", "fill": ["#fdd", "#f33"]}));
        assert_eq!(serde_json::from_value::<Entry>(json).unwrap(), indexed);
    }

    #[test]
    fn test_line_confinement_drops_fill() {
        let entry = Entry::State(
            StateAesthetic::new()
                .with_base(Aesthetic::shape().with_fill(Color::new("red").unwrap()))
                .with_hover(Aesthetic::shape().with_fill_opacity(crate::relative::Relative::multiply(
                    crate::property::Property::FillOpacity,
                    0.8,
                ))),
        );

        assert!(matches!(entry.confined_to(Category::Shape), Cow::Borrowed(_)));

        let confined = entry.confined_to(Category::Line);
        let Entry::State(state) = confined.as_ref() else {
            panic!("Expected state container");
        };
        let base = state.base().aesthetic().unwrap();
        assert!(base.fill().is_unset());
        assert!(state.hover().aesthetic().unwrap().fill_opacity().is_unset());
    }
}
