//! Wash merge: combines caller overrides with the wash into the table a
//! surface resolves against.
//!
//! The merged table always holds `__all`. Category keys, groups and region
//! ids appear only when the caller named them, except that `__line` and
//! `__text` are synthesized for categories present in the geometry, so line
//! and text regions never fall through to shape defaults.

use log::{debug, info, warn};

use livery_core::{
    category::Category,
    error::ResolveError,
    table::{ALL_KEY, GroupTable, is_reserved},
    wash::Wash,
};

use crate::geometry::Geometry;

/// Merges a partial caller table over the wash.
///
/// Each caller entry is merged layer by layer over the wash container of the
/// category it governs: `__all` and groups over the shape wash, category keys
/// over their own wash, and region ids over the wash of the region's
/// category. Keys naming neither a group nor a region are dropped with a
/// warning.
///
/// # Errors
///
/// Returns [`ResolveError`] when a caller relative expression references a
/// property the wash holds as null.
pub fn apply(wash: &Wash, input: &GroupTable, geometry: &Geometry) -> Result<GroupTable, ResolveError> {
    let caller_all = input.get(ALL_KEY);
    let mut merged = GroupTable::new();
    merged.insert(ALL_KEY, wash.merge(caller_all, Category::Shape)?);

    for category in Category::ALL {
        let key = category.table_key();
        if let Some(entry) = input.get(key) {
            merged.insert(key, wash.merge(Some(entry), category)?);
        } else if category != Category::Shape && geometry.has_category(category) {
            debug!(key; "Synthesizing category key from `__all`");
            merged.insert(key, wash.merge(caller_all, category)?);
        }
    }

    for (key, entry) in input.iter().filter(|(key, _)| !is_reserved(key)) {
        let category = if key.starts_with("__") {
            None
        } else if geometry.has_group(key) {
            Some(Category::Shape)
        } else {
            geometry.category_of(key)
        };

        let Some(category) = category else {
            warn!(key; "Ignoring override for unknown key");
            continue;
        };

        debug!(key, category = category.name(), entry = entry.shape_name(); "Merging override");
        merged.insert(key, wash.merge(Some(entry), category)?);
    }

    info!(keys = merged.len(), overrides = input.len(); "Merged overrides over wash");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use livery_core::{
        aesthetic::Aesthetic,
        color::Color,
        flat::FlatAesthetic,
        indexed::IndexRule,
        mode::RegionState,
        property::Property,
        state::{Layer, StateAesthetic},
        table::Entry,
    };

    fn geometry() -> Geometry {
        Geometry::new()
            .with_region("r1", [Category::Shape])
            .with_region("r2", [Category::Shape])
            .with_region("d1", [Category::Line])
            .with_group("coast", ["r1"])
    }

    fn red() -> Aesthetic {
        Aesthetic::shape().with_fill(Color::new("red").unwrap())
    }

    fn state(table: &GroupTable, key: &str) -> StateAesthetic {
        match table.get(key) {
            Some(Entry::State(state)) => state.clone(),
            other => panic!("Expected state container under `{key}`, got {other:?}"),
        }
    }

    #[test]
    fn test_all_always_emitted() {
        let wash = Wash::library();
        let merged = apply(&wash, &GroupTable::new(), &Geometry::new()).unwrap();
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["__all"]);
        assert_eq!(&state(&merged, "__all"), wash.get(Category::Shape));
    }

    #[test]
    fn test_key_order() {
        let input = GroupTable::new()
            .with("r2", red())
            .with("coast", red())
            .with("__all", red());
        let merged = apply(&Wash::library(), &input, &geometry()).unwrap();
        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["__all", "__line", "r2", "coast"]
        );
    }

    #[test]
    fn test_unset_layer_takes_wash_disabled_stays() {
        let input = GroupTable::from_entry(
            StateAesthetic::new()
                .with_base(red())
                .with_hover(Layer::Disabled),
        );
        let wash = Wash::library();
        let merged = state(&apply(&wash, &input, &geometry()).unwrap(), "__all");

        assert_eq!(merged.select(), wash.get(Category::Shape).select());
        assert!(merged.hover().is_disabled());
        let base = merged.base().aesthetic().unwrap();
        assert_eq!(base.fill().value().map(Color::as_str), Some("red"));
        assert_eq!(base.stroke_width().value(), Some(0.5));
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let input = GroupTable::new()
            .with("atlantis", red())
            .with("__shapes", red())
            .with("r1", red());
        let merged = apply(&Wash::library(), &input, &geometry()).unwrap();
        assert!(!merged.contains_key("atlantis"));
        assert!(!merged.contains_key("__shapes"));
        assert!(merged.contains_key("r1"));
    }

    #[test]
    fn test_line_regions_do_not_inherit_shape_defaults() {
        let input = GroupTable::from_entry(red());
        let wash = Wash::library();
        let merged = apply(&wash, &input, &geometry()).unwrap();

        let line = merged.get("__line").unwrap();
        let leaf = line
            .resolve_for_region(
                &Wash::default_leaf(Category::Line),
                RegionState::untouched(),
                IndexRule::Clamp,
            )
            .unwrap();
        let flat = FlatAesthetic::flatten(&leaf, Category::Line).unwrap();

        let line_stroke = wash
            .get(Category::Line)
            .base()
            .aesthetic()
            .and_then(|base| base.stroke().value().cloned());
        assert_eq!(leaf.stroke().value().cloned(), line_stroke);
        assert_eq!(
            flat.get(Property::Fill),
            Some(&livery_core::flat::FlatValue::Null)
        );
    }

    #[test]
    fn test_no_text_key_without_text_regions() {
        let merged = apply(&Wash::library(), &GroupTable::new(), &geometry()).unwrap();
        assert!(merged.contains_key("__line"));
        assert!(!merged.contains_key("__text"));
        assert!(!merged.contains_key("__shape"));
    }

    #[test]
    fn test_region_merged_over_its_category_wash() {
        let input = GroupTable::new().with("d1", Aesthetic::line().with_stroke_width(3.0));
        let wash = Wash::library();
        let merged = state(&apply(&wash, &input, &geometry()).unwrap(), "d1");
        assert_eq!(merged.select(), wash.get(Category::Line).select());
    }
}
