//! State containers: the base/select/hover triple governing one element or
//! group.
//!
//! Each layer is either unset (inherit the default), disabled (never apply),
//! or a leaf aesthetic. Resolution is sequential: the select layer resolves
//! against the result of the base layer, and the hover layer resolves against
//! the post-select result, so hover expressions stack on top of selection and
//! never the reverse.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{aesthetic::Aesthetic, category::Category, error::ResolveError};

/// One layer of a [`StateAesthetic`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Layer {
    /// Inherit whatever the parent provides.
    #[default]
    Unset,
    /// Never apply this layer.
    Disabled,
    Set(Aesthetic),
}

impl Layer {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub fn aesthetic(&self) -> Option<&Aesthetic> {
        match self {
            Self::Set(aesthetic) => Some(aesthetic),
            _ => None,
        }
    }

    /// Merges this layer over a parent layer that may itself be symbolic.
    ///
    /// An unset layer takes the parent layer, a disabled layer stays
    /// disabled, and a set layer resolves partially against a set parent.
    pub fn merge_over(&self, parent: &Layer) -> Result<Layer, ResolveError> {
        Ok(match (self, parent) {
            (Self::Unset, parent) => parent.clone(),
            (Self::Disabled, _) => Self::Disabled,
            (Self::Set(child), Self::Set(parent)) => Self::Set(child.resolve_partial(parent)?),
            (Self::Set(child), _) => Self::Set(child.clone()),
        })
    }

    /// Applies this layer on top of a resolved aesthetic.
    ///
    /// Unset and disabled layers leave `current` untouched.
    pub fn apply(&self, current: Aesthetic) -> Result<Aesthetic, ResolveError> {
        match self {
            Self::Set(layer) => layer.resolve(&current),
            Self::Unset | Self::Disabled => Ok(current),
        }
    }
}

impl From<Aesthetic> for Layer {
    fn from(aesthetic: Aesthetic) -> Self {
        Self::Set(aesthetic)
    }
}

impl Serialize for Layer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_str("inherit"),
            Self::Disabled => serializer.serialize_none(),
            Self::Set(aesthetic) => aesthetic.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayerRepr {
    Keyword(String),
    Set(Aesthetic),
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<LayerRepr>::deserialize(deserializer)? {
            None => Ok(Self::Disabled),
            Some(LayerRepr::Set(aesthetic)) => Ok(Self::Set(aesthetic)),
            Some(LayerRepr::Keyword(keyword)) if keyword == "inherit" => Ok(Self::Unset),
            Some(LayerRepr::Keyword(keyword)) => Err(serde::de::Error::custom(format!(
                "invalid layer keyword `{keyword}`, expected `inherit`, null or an aesthetic"
            ))),
        }
    }
}

/// A base/select/hover triple.
///
/// # Examples
///
/// ```
/// use livery_core::{aesthetic::Aesthetic, color::Color, state::{Layer, StateAesthetic}};
///
/// let default = Aesthetic::shape().with_fill(Color::new("white").unwrap());
/// let state = StateAesthetic::new()
///     .with_base(Aesthetic::shape().with_fill(Color::new("#eee").unwrap()))
///     .with_select(Aesthetic::shape().with_fill(Color::new("#39f").unwrap()))
///     .with_hover(Layer::Disabled);
///
/// let idle = state.resolve_for_region(&default, false, false).unwrap();
/// assert_eq!(idle.fill().value().unwrap().as_str(), "#eee");
///
/// let active = state.resolve_for_region(&default, true, true).unwrap();
/// assert_eq!(active.fill().value().unwrap().as_str(), "#39f");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateAesthetic {
    #[serde(default, skip_serializing_if = "Layer::is_unset")]
    base: Layer,
    #[serde(default, skip_serializing_if = "Layer::is_unset")]
    select: Layer,
    #[serde(default, skip_serializing_if = "Layer::is_unset")]
    hover: Layer,
}

impl StateAesthetic {
    /// Creates a container with every layer unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container whose every layer is disabled.
    pub fn disabled() -> Self {
        Self {
            base: Layer::Disabled,
            select: Layer::Disabled,
            hover: Layer::Disabled,
        }
    }

    pub fn base(&self) -> &Layer {
        &self.base
    }

    pub fn select(&self) -> &Layer {
        &self.select
    }

    pub fn hover(&self) -> &Layer {
        &self.hover
    }

    pub fn with_base(mut self, layer: impl Into<Layer>) -> Self {
        self.base = layer.into();
        self
    }

    pub fn with_select(mut self, layer: impl Into<Layer>) -> Self {
        self.select = layer.into();
        self
    }

    pub fn with_hover(mut self, layer: impl Into<Layer>) -> Self {
        self.hover = layer.into();
        self
    }

    /// Returns the layers in resolution order.
    pub fn layers(&self) -> [&Layer; 3] {
        [&self.base, &self.select, &self.hover]
    }

    /// Merges this container over a parent container, layer by layer.
    pub fn merge_over(&self, parent: &StateAesthetic) -> Result<StateAesthetic, ResolveError> {
        Ok(Self {
            base: self.base.merge_over(&parent.base)?,
            select: self.select.merge_over(&parent.select)?,
            hover: self.hover.merge_over(&parent.hover)?,
        })
    }

    /// Returns this container with every set layer confined to `category`.
    pub fn confined_to(&self, category: Category) -> StateAesthetic {
        let confine = |layer: &Layer| match layer {
            Layer::Set(leaf) => Layer::Set(leaf.confined_to(category)),
            other => other.clone(),
        };
        StateAesthetic {
            base: confine(&self.base),
            select: confine(&self.select),
            hover: confine(&self.hover),
        }
    }

    /// Resolves the base layer against a fully resolved default.
    ///
    /// A disabled base draws nothing: every field comes back null.
    pub fn resolve_base(&self, default: &Aesthetic) -> Result<Aesthetic, ResolveError> {
        match &self.base {
            Layer::Unset => Ok(default.clone()),
            Layer::Disabled => Ok(Aesthetic::cleared(default.kind())),
            Layer::Set(base) => base.resolve(default),
        }
    }

    /// Resolves this container for one region in a given interaction state.
    ///
    /// 1. Start from the base layer resolved against `default`.
    /// 2. If selected, apply the select layer unless unset or disabled.
    /// 3. If hovered, apply the hover layer unless unset or disabled, on top
    ///    of the post-select result.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a relative expression cannot be
    /// evaluated against the layer below it.
    pub fn resolve_for_region(
        &self,
        default: &Aesthetic,
        is_selected: bool,
        is_hovered: bool,
    ) -> Result<Aesthetic, ResolveError> {
        let mut current = self.resolve_base(default)?;

        if is_selected {
            current = self.select.apply(current)?;
        }

        if is_hovered {
            current = self.hover.apply(current)?;
        }

        Ok(current)
    }
}

impl From<Aesthetic> for StateAesthetic {
    fn from(base: Aesthetic) -> Self {
        Self::new().with_base(base)
    }
}
