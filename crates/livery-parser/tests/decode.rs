use livery_core::{
    category::Kind,
    field::{Field, NumericField},
    indexed::IndexRule,
    property::Property,
    relative::Relative,
    state::StateAesthetic,
    table::{Entry, GroupTable},
};
use livery_parser::{decode_entry, decode_table, decode_wash, error::ErrorCode};
use serde_json::json;

#[test]
fn test_choropleth_overrides() {
    let raw = json!({
        "__all": {
            "base": {"fill": "#eee", "stroke": "white"},
            "select": {"fill": "#39f"},
            "hover": {"stroke_width": "*1.5"},
        },
        "__line": {"kind": "line", "stroke_dasharray": "dotted"},
        "coast": {"hover": null},
        "r12": {"base": {"fill": "none"}},
    });

    let decoded = decode_table(&raw).expect("Failed to decode");
    assert!(decoded.warnings.is_empty());

    let table = decoded.value;
    assert_eq!(
        table.keys().collect::<Vec<_>>(),
        vec!["__all", "__line", "coast", "r12"]
    );

    match table.get("__all") {
        Some(Entry::State(state)) => {
            let hover = state.hover().aesthetic().expect("hover layer is set");
            assert_eq!(
                hover.stroke_width(),
                NumericField::Relative(Relative::multiply(Property::StrokeWidth, 1.5))
            );
        }
        other => panic!("Expected state container, got {other:?}"),
    }

    match table.get("__line") {
        Some(Entry::Leaf(leaf)) => assert_eq!(leaf.kind(), Kind::Line),
        other => panic!("Expected line leaf, got {other:?}"),
    }

    match table.get("r12") {
        Some(Entry::State(state)) => {
            let base = state.base().aesthetic().expect("base layer is set");
            assert!(base.fill().is_null());
        }
        other => panic!("Expected state container, got {other:?}"),
    }
}

#[test]
fn test_heatmap_sequence() {
    let raw = json!({
        "fill": ["inherit", "#fdd", "#f99", "#f33"],
        "stroke_width": 1,
    });

    let entry = decode_entry(&raw).expect("Failed to decode").value;
    let Entry::Indexed(indexed) = entry else {
        panic!("Expected indexed aesthetic");
    };

    assert_eq!(indexed.steps(), 4);
    assert!(indexed.at(0, IndexRule::Clamp).fill().is_unset());
    assert_eq!(
        indexed
            .at(9, IndexRule::Clamp)
            .fill()
            .value()
            .map(|color| color.as_str()),
        Some("#f33")
    );
    assert_eq!(
        indexed
            .at(5, IndexRule::Wrap)
            .fill()
            .value()
            .map(|color| color.as_str()),
        Some("#fdd")
    );
}

#[test]
fn test_every_error_reported() {
    let raw = json!({
        "r1": {"fill": 3},
        "r2": {"select": {"stroke_width": "parent.fill * 2"}},
        "r3": 7,
    });

    let err = decode_table(&raw).expect_err("Expected decode failure");
    let codes: Vec<_> = err.errors().filter_map(|diag| diag.code()).collect();
    assert_eq!(codes, vec![ErrorCode::E100, ErrorCode::E003, ErrorCode::E104]);

    let paths: Vec<_> = err.errors().filter_map(|diag| diag.path()).collect();
    assert_eq!(paths, vec!["r1.fill", "r2.select.stroke_width", "r3"]);
}

#[test]
fn test_payload_table_decodes_unchanged() {
    let table = GroupTable::new()
        .with(
            "__all",
            StateAesthetic::new()
                .with_hover(livery_core::state::Layer::Disabled)
                .with_base(
                    livery_core::aesthetic::Aesthetic::shape()
                        .with_fill(Field::Null)
                        .with_stroke_width(Relative::add(Property::StrokeWidth, 1.0)),
                ),
        )
        .with("r1", Entry::Disabled);

    let raw = serde_json::to_value(&table).expect("Failed to encode");
    let decoded = decode_table(&raw).expect("Failed to decode");

    assert_eq!(decoded.value, table);
}

#[test]
fn test_wash_only_all_applies() {
    let decoded = decode_wash(&json!({
        "shape": {"__all": {"base": {"fill": "#f8fafc"}}, "coast": {"fill": "blue"}},
    }))
    .expect("Failed to decode");

    assert_eq!(decoded.warnings.len(), 1);
    assert_eq!(decoded.warnings[0].code(), Some(ErrorCode::W003));
    assert_eq!(decoded.warnings[0].path(), Some("shape.coast"));
    assert_eq!(decoded.value.shape.keys().collect::<Vec<_>>(), vec!["__all"]);
}
