use std::sync::mpsc;

use indexmap::IndexMap;
use serde_json::json;

use livery::{
    Livery, LiveryError, SurfaceSpec,
    category::Category,
    config::AppConfig,
    geometry::Geometry,
    mode::{Mode, Selection, Snapshot},
    property::Property,
    surface::SurfaceModel,
    update::{UpdateMessage, Updates},
};

fn geometry() -> Geometry {
    Geometry::new()
        .with_region("r1", [Category::Shape])
        .with_region("r2", [Category::Shape])
}

#[test]
fn test_update_reaches_surface_and_registry() {
    let livery = Livery::default();
    let payload = livery
        .declare("map", SurfaceSpec::new(geometry()).with_mode(Mode::Multiple))
        .expect("Failed to declare surface");
    let mut model = SurfaceModel::new(payload).expect("Invalid payload");

    let overrides =
        livery::decode_overrides(&json!({"r2": {"fill": "#c00"}})).expect("Failed to decode");
    let (mut tx, rx) = mpsc::channel::<UpdateMessage>();
    livery
        .update(
            "map",
            Updates::new()
                .with_aes(overrides)
                .with_value(Selection::Ids(vec!["r1".into()])),
            &mut tx,
        )
        .expect("Failed to send update");

    let message = rx.recv().expect("Failed to receive update");
    assert_eq!(message.target, "map");
    let merged = message.updates.aes.clone().expect("aes was sent");
    assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["__all", "r2"]);

    model
        .apply_update(message.updates)
        .expect("Failed to apply update");
    let deferred = model.flat_map().expect("Failed to resolve surface");
    assert_eq!(
        deferred["r2"].get(Property::Fill).map(ToString::to_string),
        Some("#c00".to_string())
    );

    let snapshot = Snapshot {
        selection: Selection::Ids(vec!["r1".into()]),
        hovered: None,
    };
    let immediate = livery.snapshot("map", &snapshot).expect("Failed to resolve");
    assert_eq!(immediate["r2"], deferred["r2"]);
    assert_eq!(immediate["r1"], deferred["r1"]);
    assert_eq!(
        livery.payload("map").expect("Unknown surface").value,
        Selection::Ids(vec!["r1".into()])
    );
}

#[test]
fn test_update_rejected_for_mode() {
    let livery = Livery::default();
    livery
        .declare("map", SurfaceSpec::new(geometry()))
        .expect("Failed to declare surface");

    let mut sent: Vec<UpdateMessage> = Vec::new();
    let result = livery.update(
        "map",
        Updates::new().with_value(Selection::Ids(vec!["r1".into(), "r2".into()])),
        &mut sent,
    );
    assert!(matches!(result, Err(LiveryError::Mode(_))));
    assert!(sent.is_empty());

    let result = livery.update("nowhere", Updates::new(), &mut sent);
    assert!(matches!(result, Err(LiveryError::UnknownSurface(_))));
}

#[test]
fn test_redeclare_replaces() {
    let livery = Livery::default();
    livery
        .declare(
            "map",
            SurfaceSpec::new(geometry())
                .with_tooltips(IndexMap::from([("r1".to_string(), "One".to_string())])),
        )
        .expect("Failed to declare surface");
    livery
        .declare("map", SurfaceSpec::new(geometry()).with_mode(Mode::Display))
        .expect("Failed to redeclare surface");

    let payload = livery.payload("map").expect("Unknown surface");
    assert_eq!(payload.mode, Mode::Display);
    assert!(payload.tooltips.is_empty());
}

#[test]
fn test_configured_wash_applies() {
    let config: AppConfig = serde_json::from_value(json!({
        "wash": {"shape": {"__all": {"base": {"fill": "#f8fafc"}, "hover": null}}},
    }))
    .expect("Failed to parse config");
    let livery = Livery::new(config).expect("Failed to build engine");
    livery
        .declare("map", SurfaceSpec::new(geometry()))
        .expect("Failed to declare surface");

    let snapshot = Snapshot {
        selection: Selection::default(),
        hovered: Some("r1".into()),
    };
    let flat = livery.snapshot("map", &snapshot).expect("Failed to resolve");
    assert_eq!(
        flat["r2"].get(Property::Fill).map(ToString::to_string),
        Some("#f8fafc".to_string())
    );
    assert_eq!(flat["r1"], flat["r2"]);
}

#[test]
fn test_bad_wash_reports_parse_error() {
    let config: AppConfig = serde_json::from_value(json!({
        "wash": {"line": {"__all": {"stroke": 12}}},
    }))
    .expect("Failed to parse config");
    assert!(matches!(
        Livery::new(config),
        Err(LiveryError::Parse { .. })
    ));
}
