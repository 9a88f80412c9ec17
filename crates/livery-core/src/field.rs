//! Tri-state property slots.
//!
//! A property can be left to inherit ([`Field::Unset`]), deliberately cleared
//! ([`Field::Null`], terminal: it renders as `none` and never inherits), or
//! given a value. Numeric properties may additionally hold a [`Relative`]
//! expression ([`NumericField`]).
//!
//! # Wire format
//!
//! | State | JSON |
//! |-------|------|
//! | Unset | key omitted, or `"inherit"` where a value is required (sequences) |
//! | Null | `null` |
//! | Value | the literal |
//! | Relative | `{"relative": [property, operator, operand]}` |

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};

use crate::relative::Relative;

const INHERIT: &str = "inherit";

/// A non-numeric property slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the explicit value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Clone> Field<T> {
    /// Returns `parent` when this slot is unset, otherwise this slot.
    pub fn inherit(&self, parent: &Self) -> Self {
        match self {
            Self::Unset => parent.clone(),
            other => other.clone(),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

/// A numeric property slot, which may defer to the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NumericField {
    #[default]
    Unset,
    Null,
    Value(f64),
    Relative(Relative),
}

impl NumericField {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true while the slot still waits on a parent value.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Relative(_))
    }

    /// Returns the explicit value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Relative> for NumericField {
    fn from(expr: Relative) -> Self {
        Self::Relative(expr)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Keyword {
    Inherit,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRepr<T> {
    Keyword(Keyword),
    Value(T),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
    Keyword(Keyword),
    Relative { relative: Relative },
    Value(f64),
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_str(INHERIT),
            Self::Null => serializer.serialize_none(),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<FieldRepr<T>>::deserialize(deserializer)? {
            None => Self::Null,
            Some(FieldRepr::Keyword(Keyword::Inherit)) => Self::Unset,
            Some(FieldRepr::Value(value)) => Self::Value(value),
        })
    }
}

impl Serialize for NumericField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_str(INHERIT),
            Self::Null => serializer.serialize_none(),
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::Relative(expr) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("relative", expr)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<NumericRepr>::deserialize(deserializer)? {
            None => Self::Null,
            Some(NumericRepr::Keyword(Keyword::Inherit)) => Self::Unset,
            Some(NumericRepr::Relative { relative }) => Self::Relative(relative),
            Some(NumericRepr::Value(value)) => Self::Value(value),
        })
    }
}
