//! The deferred-mode client model of one rendered surface.
//!
//! A [`SurfaceModel`] is what the reactive host runs: it decodes the payload,
//! tracks the live hover and selection value, applies update messages, and
//! resolves every region through the same [`Resolver`](crate::resolver::Resolver)
//! the server uses for snapshots.

use indexmap::IndexMap;
use log::{debug, trace};

use livery_core::{
    error::{ModeError, ResolveError},
    flat::FlatAesthetic,
    mode::{RegionState, Selection, Snapshot},
};

use crate::{error::LiveryError, payload::Payload, update::Updates};

/// Live state of one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceModel {
    payload: Payload,
    hovered: Option<String>,
}

impl SurfaceModel {
    /// Creates a model from a payload after validating its mode and value.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError`] when the mode or the selection value violates
    /// the mode's invariants.
    pub fn new(payload: Payload) -> Result<Self, ModeError> {
        payload.mode.validate()?;
        payload.value.validate(payload.mode)?;
        Ok(Self {
            payload,
            hovered: None,
        })
    }

    /// Decodes a payload as sent over the wire.
    pub fn from_json(json: &str) -> Result<Self, LiveryError> {
        let payload: Payload = serde_json::from_str(json)?;
        Ok(Self::new(payload)?)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Moves the pointer onto a region, or off every region.
    pub fn set_hovered(&mut self, region: Option<impl Into<String>>) {
        self.hovered = region.map(Into::into);
    }

    /// Replaces the selection value.
    pub fn set_selection(&mut self, value: Selection) -> Result<(), ModeError> {
        value.validate(self.payload.mode)?;
        self.payload.value = value;
        Ok(())
    }

    /// Applies an update message; present fields replace wholesale.
    ///
    /// A rejected value leaves the model untouched.
    pub fn apply_update(&mut self, updates: Updates) -> Result<(), ModeError> {
        if let Some(value) = &updates.value {
            value.validate(self.payload.mode)?;
        }

        let Updates {
            aes,
            value,
            tooltips,
        } = updates;
        if let Some(aes) = aes {
            debug!(keys = aes.len(); "Replacing surface table");
            self.payload.aes = aes;
        }
        if let Some(value) = value {
            self.payload.value = value;
        }
        if let Some(tooltips) = tooltips {
            self.payload.tooltips = tooltips;
        }
        Ok(())
    }

    /// Returns the tooltip of a region.
    pub fn tooltip(&self, region: &str) -> Option<&str> {
        self.payload.tooltips.get(region).map(String::as_str)
    }

    /// Returns the live state of a region.
    pub fn state_of(&self, region: &str) -> RegionState {
        self.snapshot().state_of(self.payload.mode, region)
    }

    /// Resolves one region under the live state.
    pub fn resolve(&self, region: &str) -> Result<FlatAesthetic, ResolveError> {
        self.payload.resolver().flat(region, self.state_of(region))
    }

    /// Resolves every region under the live state.
    pub fn flat_map(&self) -> Result<IndexMap<String, FlatAesthetic>, ResolveError> {
        let resolver = self.payload.resolver();
        let flat = resolver.snapshot(resolver.regions(), &self.snapshot())?;
        trace!(regions = flat.len(); "Resolved surface");
        Ok(flat)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            selection: self.payload.value.clone(),
            hovered: self.hovered.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use livery_core::{
        aesthetic::Aesthetic,
        category::Category,
        color::Color,
        mode::Mode,
        property::Property,
        table::GroupTable,
        wash::Wash,
    };

    use super::*;
    use crate::{geometry::Geometry, merge};

    fn model(mode: Mode) -> SurfaceModel {
        let geometry = Geometry::new()
            .with_region("r1", [Category::Shape])
            .with_region("r2", [Category::Shape]);
        let input = GroupTable::from_entry(Aesthetic::shape().with_fill(Color::new("#eee").unwrap()));
        let aes = merge::apply(&Wash::library(), &input, &geometry).unwrap();
        SurfaceModel::new(Payload::assemble(
            &geometry,
            aes,
            mode,
            IndexMap::from([("r1".to_string(), "First".to_string())]),
            Selection::default(),
        ))
        .unwrap()
    }

    #[test]
    fn test_rejected_value_leaves_model_untouched() {
        let mut model = model(Mode::Single);
        let before = model.clone();
        let result = model.apply_update(
            Updates::new()
                .with_value(Selection::Ids(vec!["r1".to_string(), "r2".to_string()]))
                .with_tooltips(IndexMap::new()),
        );
        assert!(result.is_err());
        assert_eq!(model, before);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut model = model(Mode::Multiple);
        model
            .apply_update(Updates::new().with_tooltips(IndexMap::from([(
                "r2".to_string(),
                "Second".to_string(),
            )])))
            .unwrap();
        assert_eq!(model.tooltip("r1"), None);
        assert_eq!(model.tooltip("r2"), Some("Second"));
    }

    #[test]
    fn test_hover_follows_pointer() {
        let mut model = model(Mode::Single);
        model.set_hovered(Some("r2"));
        assert!(model.state_of("r2").hovered);
        assert!(!model.state_of("r1").hovered);

        let hovered = model.resolve("r2").unwrap();
        let idle = model.resolve("r1").unwrap();
        assert_ne!(
            hovered.get(Property::StrokeWidth),
            idle.get(Property::StrokeWidth)
        );

        model.set_hovered(None::<String>);
        assert_eq!(model.resolve("r2").unwrap(), idle);
    }

    #[test]
    fn test_invalid_payload_rejected() {
        let mut payload = model(Mode::Single).payload().clone();
        payload.mode = Mode::Cycle { period: 1 };
        assert_eq!(SurfaceModel::new(payload), Err(ModeError::CyclePeriod(1)));
    }
}
