//! Livery - aesthetic resolution for interactive diagrams.
//!
//! Given a diagram's geometry, a theme ("wash"), caller overrides and the
//! interaction state of every region, Livery decides the fill, stroke,
//! opacity and dash pattern each region shows. Resolution runs either once
//! for a fixed snapshot (immediate mode) or continuously on a live surface
//! from a self-contained payload (deferred mode); both give the same answer.

pub mod config;
pub mod geometry;
pub mod merge;
pub mod payload;
pub mod registry;
pub mod resolver;
pub mod surface;
pub mod update;

mod error;

pub use livery_core::{
    aesthetic, category, color, dash, field, flat, indexed, mode, property, relative, state,
    table, wash,
};

pub use error::LiveryError;

use indexmap::IndexMap;
use log::{debug, info, trace};
use serde_json::Value;

use livery_core::{
    flat::FlatAesthetic,
    mode::{Mode, Selection, Snapshot},
    table::GroupTable,
    wash::Wash,
};

use config::AppConfig;
use geometry::Geometry;
use payload::Payload;
use registry::{Declaration, Registry};
use update::{UpdateMessage, UpdateSink, Updates};

/// Everything a caller declares about one surface.
///
/// `aes` holds the caller's partial overrides; the wash fills in the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSpec {
    geometry: Geometry,
    aes: GroupTable,
    mode: Mode,
    tooltips: IndexMap<String, String>,
    selection: Selection,
}

impl SurfaceSpec {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    pub fn with_aes(mut self, aes: GroupTable) -> Self {
        self.aes = aes;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tooltips(mut self, tooltips: IndexMap<String, String>) -> Self {
        self.tooltips = tooltips;
        self
    }

    /// Sets the initial value of the selection state machine.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// Entry point for declaring, resolving and updating surfaces.
///
/// # Examples
///
/// ```rust
/// use livery::{Livery, SurfaceSpec, category::Category, geometry::Geometry};
/// use livery::mode::{Mode, Selection, Snapshot};
/// use livery::property::Property;
/// use serde_json::json;
///
/// let livery = Livery::default();
/// let geometry = Geometry::new()
///     .with_region("r1", [Category::Shape])
///     .with_region("r2", [Category::Shape]);
/// let overrides = livery::decode_overrides(&json!({
///     "__all": {"base": {"fill": "#eee"}, "select": {"fill": "#39f"}, "hover": null},
/// }))
/// .expect("Failed to decode overrides");
///
/// livery
///     .declare("map", SurfaceSpec::new(geometry).with_aes(overrides).with_mode(Mode::Single))
///     .expect("Failed to declare surface");
///
/// let snapshot = Snapshot::new(Mode::Single, Selection::Ids(vec!["r2".into()]), None)
///     .expect("Invalid snapshot");
/// let flat = livery.snapshot("map", &snapshot).expect("Failed to resolve");
///
/// assert_eq!(flat["r1"].get(Property::Fill).unwrap().to_string(), "#eee");
/// assert_eq!(flat["r2"].get(Property::Fill).unwrap().to_string(), "#39f");
/// ```
#[derive(Debug, Default)]
pub struct Livery {
    config: AppConfig,
    wash: Wash,
    registry: Registry,
}

impl Livery {
    /// Creates an engine, building the wash from the configured seeds.
    ///
    /// # Errors
    ///
    /// Returns `LiveryError` when the wash seeds fail to decode or hold a
    /// relative expression the library defaults cannot satisfy.
    pub fn new(config: AppConfig) -> Result<Self, LiveryError> {
        let wash = match config.wash() {
            Some(raw) => {
                let seeds = livery_parser::decode_wash(raw)
                    .map_err(|err| LiveryError::new_parse_error(err, "wash"))?
                    .into_value();
                Wash::from_seeds(&seeds)?
            }
            None => Wash::library(),
        };
        debug!("Wash built");

        Ok(Self {
            config,
            wash,
            registry: Registry::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn wash(&self) -> &Wash {
        &self.wash
    }

    /// Declares a surface and returns the payload to send to it.
    ///
    /// Redeclaring an id replaces the previous declaration.
    ///
    /// # Errors
    ///
    /// Returns `LiveryError` when the mode or initial selection is invalid,
    /// or when the overrides cannot be merged over the wash.
    pub fn declare(&self, id: impl Into<String>, spec: SurfaceSpec) -> Result<Payload, LiveryError> {
        let id = id.into();
        info!(id = id.as_str(), mode:? = spec.mode; "Declaring surface");

        let SurfaceSpec {
            geometry,
            aes,
            mode,
            tooltips,
            selection,
        } = spec;
        let mode = mode.validate()?;
        selection.validate(mode)?;
        geometry.lint();

        let merged = merge::apply(&self.wash, &aes, &geometry)?;
        let payload = Payload::assemble(&geometry, merged, mode, tooltips, selection);
        self.registry.insert(
            id,
            Declaration {
                geometry,
                payload: payload.clone(),
            },
        );
        Ok(payload)
    }

    /// Returns the current payload of a declared surface.
    pub fn payload(&self, id: &str) -> Result<Payload, LiveryError> {
        self.declaration(id).map(|declaration| declaration.payload)
    }

    /// Resolves every region of a surface for one fixed interaction state.
    ///
    /// Regions come out in geometry declaration order, each as a flat map
    /// with no relative expression left.
    ///
    /// # Errors
    ///
    /// Returns `LiveryError` for an unknown surface, a snapshot the surface's
    /// mode rejects, or a relative expression that cannot be evaluated.
    pub fn snapshot(
        &self,
        id: &str,
        snapshot: &Snapshot,
    ) -> Result<IndexMap<String, FlatAesthetic>, LiveryError> {
        let declaration = self.declaration(id)?;
        let mode = declaration.payload.mode;
        snapshot.selection.validate(mode)?;

        info!(id, regions = declaration.geometry.regions().count(); "Resolving snapshot");
        let flat = declaration
            .payload
            .resolver()
            .snapshot(declaration.geometry.regions(), snapshot)?;
        trace!(flat:?; "Resolved snapshot");
        Ok(flat)
    }

    /// Pushes updates to a declared surface.
    ///
    /// A present `aes` is treated as caller overrides: it is merged over the
    /// wash before being sent, and replaces the surface's table wholesale.
    /// The registry is updated too, so later snapshots reflect the change.
    ///
    /// # Errors
    ///
    /// Returns `LiveryError` for an unknown surface, a value the surface's
    /// mode rejects, or overrides that cannot be merged.
    pub fn update(
        &self,
        id: &str,
        updates: Updates,
        sink: &mut impl UpdateSink,
    ) -> Result<(), LiveryError> {
        let declaration = self.declaration(id)?;
        if let Some(value) = &updates.value {
            value.validate(declaration.payload.mode)?;
        }

        let aes = updates
            .aes
            .as_ref()
            .map(|aes| merge::apply(&self.wash, aes, &declaration.geometry))
            .transpose()?;
        let updates = Updates { aes, ..updates };

        self.registry.modify(id, |declaration| {
            let payload = &mut declaration.payload;
            if let Some(aes) = &updates.aes {
                payload.aes = aes.clone();
            }
            if let Some(value) = &updates.value {
                payload.value = value.clone();
            }
            if let Some(tooltips) = &updates.tooltips {
                payload.tooltips = tooltips.clone();
            }
        });

        debug!(id; "Sending surface update");
        sink.send(UpdateMessage {
            target: id.to_string(),
            updates,
        });
        Ok(())
    }

    fn declaration(&self, id: &str) -> Result<Declaration, LiveryError> {
        self.registry
            .get(id)
            .ok_or_else(|| LiveryError::UnknownSurface(id.to_string()))
    }
}

/// Decodes raw caller overrides into a group table.
///
/// A bare entry is promoted to `{"__all": entry}`. Warnings are logged and
/// dropped.
///
/// # Errors
///
/// Returns `LiveryError::Parse` with every fatal diagnostic found.
pub fn decode_overrides(raw: &Value) -> Result<GroupTable, LiveryError> {
    livery_parser::decode_table(raw)
        .map(|decoded| decoded.into_value())
        .map_err(|err| LiveryError::new_parse_error(err, "overrides"))
}
