use indexmap::IndexMap;
use serde_json::json;

use livery::{
    Livery, SurfaceSpec,
    category::Category,
    flat::{FlatAesthetic, FlatValue},
    geometry::Geometry,
    mode::{Mode, Selection, Snapshot},
    property::Property,
    surface::SurfaceModel,
};

fn choropleth() -> Geometry {
    Geometry::new()
        .with_region("r1", [Category::Shape])
        .with_region("r2", [Category::Shape])
        .with_region("r3", [Category::Shape, Category::Text])
        .with_region("d1", [Category::Line])
        .with_region("l1", [Category::Text])
        .with_group("coast", ["r1", "r2"])
        .with_group("south", ["r2", "r3"])
}

fn declare(livery: &Livery, overrides: serde_json::Value, mode: Mode) {
    let aes = livery::decode_overrides(&overrides).expect("Failed to decode overrides");
    livery
        .declare(
            "map",
            SurfaceSpec::new(choropleth()).with_aes(aes).with_mode(mode),
        )
        .expect("Failed to declare surface");
}

fn value(flat: &IndexMap<String, FlatAesthetic>, region: &str, property: Property) -> String {
    flat[region]
        .get(property)
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[test]
fn test_fill_example_end_to_end() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({
            "__all": {
                "base": {"fill": "#eee"},
                "select": {"fill": "#39f"},
                "hover": null,
            }
        }),
        Mode::Single,
    );

    let idle = Snapshot::default();
    let flat = livery.snapshot("map", &idle).expect("Failed to resolve");
    assert_eq!(value(&flat, "r1", Property::Fill), "#eee");

    let selected = Snapshot::new(Mode::Single, Selection::Ids(vec!["r1".into()]), None)
        .expect("Invalid snapshot");
    let flat = livery.snapshot("map", &selected).expect("Failed to resolve");
    assert_eq!(value(&flat, "r1", Property::Fill), "#39f");
    assert_eq!(value(&flat, "r2", Property::Fill), "#eee");

    let selected_hovered = Snapshot::new(
        Mode::Single,
        Selection::Ids(vec!["r1".into()]),
        Some("r1".into()),
    )
    .expect("Invalid snapshot");
    let hovered = livery
        .snapshot("map", &selected_hovered)
        .expect("Failed to resolve");
    assert_eq!(hovered["r1"], flat["r1"]);
}

#[test]
fn test_region_beats_group_beats_all() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({
            "__all": {"fill": "gray"},
            "south": {"fill": "green"},
            "coast": {"fill": "blue"},
            "r1": {"fill": "red"},
        }),
        Mode::Display,
    );

    let flat = livery
        .snapshot("map", &Snapshot::default())
        .expect("Failed to resolve");
    assert_eq!(value(&flat, "r1", Property::Fill), "red");
    // Both groups hold r2; `coast` is declared first in the geometry.
    assert_eq!(value(&flat, "r2", Property::Fill), "blue");
    assert_eq!(value(&flat, "r3", Property::Fill), "green");
    assert_eq!(value(&flat, "l1", Property::Fill), "gray");
}

#[test]
fn test_line_regions_keep_line_defaults() {
    let livery = Livery::default();
    declare(&livery, json!({"fill": "orange"}), Mode::Single);

    let flat = livery
        .snapshot("map", &Snapshot::default())
        .expect("Failed to resolve");
    assert_eq!(flat["d1"].get(Property::Fill), Some(&FlatValue::Null));
    assert_eq!(value(&flat, "d1", Property::Stroke), "#64748b");
    assert_eq!(value(&flat, "d1", Property::StrokeWidth), "1");
    assert_eq!(value(&flat, "r1", Property::Stroke), "#94a3b8");
}

#[test]
fn test_relative_fill_opacity_spares_line_regions() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({
            "__all": {
                "select": {"fill_opacity": "*0.5"},
                "hover": {"fill_opacity": "*0.8"},
            }
        }),
        Mode::Single,
    );

    let line_active = Snapshot::new(
        Mode::Single,
        Selection::Ids(vec!["d1".into()]),
        Some("d1".into()),
    )
    .expect("Invalid snapshot");
    let flat = livery
        .snapshot("map", &line_active)
        .expect("Failed to resolve");
    assert_eq!(flat["d1"].get(Property::Fill), Some(&FlatValue::Null));
    assert_eq!(flat["d1"].get(Property::FillOpacity), Some(&FlatValue::Null));
    assert_eq!(value(&flat, "d1", Property::Stroke), "#2563eb");
    assert_eq!(value(&flat, "d1", Property::StrokeWidth), "2");
    assert_eq!(value(&flat, "r1", Property::FillOpacity), "1");

    let shape_active = Snapshot::new(
        Mode::Single,
        Selection::Ids(vec!["r1".into()]),
        Some("r1".into()),
    )
    .expect("Invalid snapshot");
    let flat = livery
        .snapshot("map", &shape_active)
        .expect("Failed to resolve");
    assert_eq!(value(&flat, "r1", Property::FillOpacity), "0.4");

    let payload = livery.payload("map").expect("Unknown surface");
    let json = payload.to_json(false).expect("Failed to encode payload");
    let mut model = SurfaceModel::from_json(&json).expect("Failed to decode payload");
    model
        .set_selection(Selection::Ids(vec!["d1".into()]))
        .expect("Invalid selection");
    model.set_hovered(Some("d1"));
    let deferred = model.flat_map().expect("Failed to resolve surface");
    assert_eq!(deferred["d1"].get(Property::FillOpacity), Some(&FlatValue::Null));
}

#[test]
fn test_category_foreign_properties_are_not_fatal() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({
            "__all": {"fill": "orange", "fill_opacity": 0.5, "non_scaling_stroke": false},
            "__line": {"kind": "line", "fill": "red", "fill_opacity": "*0.5", "stroke_width": 2},
            "__text": {"kind": "text", "non_scaling_stroke": true, "fill": "#333"},
            "coast": {"hover": {"fill_opacity": "parent.fill_opacity - 0.25"}},
        }),
        Mode::Multiple,
    );

    let snapshot = Snapshot::new(
        Mode::Multiple,
        Selection::Ids(vec!["d1".into(), "l1".into()]),
        Some("d1".into()),
    )
    .expect("Invalid snapshot");
    let flat = livery.snapshot("map", &snapshot).expect("Failed to resolve");

    assert_eq!(flat["d1"].get(Property::Fill), Some(&FlatValue::Null));
    assert_eq!(flat["d1"].get(Property::FillOpacity), Some(&FlatValue::Null));
    assert_eq!(value(&flat, "d1", Property::StrokeWidth), "3");
    assert_eq!(value(&flat, "l1", Property::Fill), "#1d4ed8");
    assert_eq!(value(&flat, "l1", Property::NonScalingStroke), "true");
    assert_eq!(value(&flat, "r3", Property::Fill), "orange");

    let hovered = Snapshot::new(Mode::Multiple, Selection::Ids(vec![]), Some("r1".into()))
        .expect("Invalid snapshot");
    let flat = livery.snapshot("map", &hovered).expect("Failed to resolve");
    assert_eq!(value(&flat, "r1", Property::FillOpacity), "0.75");
}

#[test]
fn test_untouched_regions_use_first_step() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({"fill": ["#fff", "#fdd", "#f99", "#f33"]}),
        Mode::Cycle { period: 4 },
    );

    let counts = Selection::Counts(IndexMap::from([("r1".to_string(), 6), ("r2".to_string(), 0)]));
    let snapshot =
        Snapshot::new(Mode::Cycle { period: 4 }, counts, None).expect("Invalid snapshot");
    let flat = livery.snapshot("map", &snapshot).expect("Failed to resolve");

    assert_eq!(value(&flat, "r1", Property::Fill), "#f99");
    assert_eq!(value(&flat, "r2", Property::Fill), "#fff");
    assert_eq!(value(&flat, "r3", Property::Fill), "#fff");
}

#[test]
fn test_hover_stacks_on_selection() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({
            "base": {"stroke_width": 1},
            "select": {"stroke_width": 2},
            "hover": {"stroke_width": "*1.5"},
        }),
        Mode::Multiple,
    );

    let snapshot = Snapshot::new(
        Mode::Multiple,
        Selection::Ids(vec!["r1".into(), "r2".into()]),
        Some("r1".into()),
    )
    .expect("Invalid snapshot");
    let flat = livery.snapshot("map", &snapshot).expect("Failed to resolve");

    assert_eq!(value(&flat, "r1", Property::StrokeWidth), "3");
    assert_eq!(value(&flat, "r2", Property::StrokeWidth), "2");
    assert_eq!(value(&flat, "r3", Property::StrokeWidth), "1");
}

#[test]
fn test_deferred_matches_immediate() {
    let livery = Livery::default();
    declare(
        &livery,
        json!({
            "__all": {
                "base": {"fill": "#eee", "fill_opacity": 0.7, "stroke_width": 0.3},
                "select": {"fill": "#39f", "fill_opacity": "*1.1"},
                "hover": {"stroke_width": "parent.stroke_width * 1.7"},
            },
            "__text": {"fill": "#333"},
            "coast": {"stroke_dasharray": "dotted"},
            "r3": {"fill": ["#fff", "#ccc", "#999"], "stroke_width": [0.1, 0.2]},
        }),
        Mode::Multiple,
    );

    let payload = livery.payload("map").expect("Unknown surface");
    let json = payload.to_json(false).expect("Failed to encode payload");
    let mut model = SurfaceModel::from_json(&json).expect("Failed to decode payload");

    let selections = [
        vec![],
        vec!["r1".to_string()],
        vec!["r2".to_string(), "r3".to_string(), "d1".to_string()],
    ];
    let hovers = [None, Some("r1"), Some("r3"), Some("l1")];

    for ids in &selections {
        for hovered in hovers {
            let snapshot = Snapshot::new(
                Mode::Multiple,
                Selection::Ids(ids.clone()),
                hovered.map(str::to_string),
            )
            .expect("Invalid snapshot");
            let immediate = livery.snapshot("map", &snapshot).expect("Failed to resolve");

            model
                .set_selection(Selection::Ids(ids.clone()))
                .expect("Invalid selection");
            model.set_hovered(hovered);
            let deferred = model.flat_map().expect("Failed to resolve surface");

            assert_eq!(deferred.len(), immediate.len());
            for (region, flat) in &immediate {
                assert_eq!(&deferred[region.as_str()], flat, "{region} {ids:?} {hovered:?}");
            }
        }
    }
}

#[test]
fn test_invalid_selection_rejected() {
    let livery = Livery::default();
    declare(&livery, json!({}), Mode::Single);

    let snapshot = Snapshot {
        selection: Selection::Ids(vec!["r1".into(), "r2".into()]),
        hovered: None,
    };
    assert!(livery.snapshot("map", &snapshot).is_err());
    assert!(livery.snapshot("atlas", &Snapshot::default()).is_err());
}
