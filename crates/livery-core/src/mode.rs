//! Interaction modes and per-region interaction state.
//!
//! The click/selection state machine lives outside this crate; what arrives
//! here is the shape of its value. Boolean modes report a list of selected
//! region ids, counting modes report a click count per region.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::ModeError, indexed::IndexRule};

/// How a surface reacts to clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mode {
    /// Regions cannot be selected; only hover applies.
    Display,
    /// At most one region is selected at a time.
    #[default]
    Single,
    /// Any number of regions may be selected.
    Multiple,
    /// Every click advances a region's count, wrapping at `period`.
    Cycle { period: u32 },
    /// Every click increments a region's count, saturating at `max`.
    Count {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
}

impl Mode {
    /// Creates a cycling mode.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::CyclePeriod`] when `period` is below 2.
    pub fn cycle(period: i64) -> Result<Self, ModeError> {
        match u32::try_from(period) {
            Ok(period) if period >= 2 => Ok(Self::Cycle { period }),
            _ => Err(ModeError::CyclePeriod(period)),
        }
    }

    /// Creates a counting mode with an optional upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::CountLimit`] when `max` is below 1.
    pub fn count(max: Option<i64>) -> Result<Self, ModeError> {
        match max {
            None => Ok(Self::Count { max: None }),
            Some(max) => match u32::try_from(max) {
                Ok(limit) if limit >= 1 => Ok(Self::Count { max: Some(limit) }),
                _ => Err(ModeError::CountLimit(max)),
            },
        }
    }

    /// Re-checks the invariants of a mode that was deserialized rather than
    /// constructed.
    pub fn validate(self) -> Result<Self, ModeError> {
        match self {
            Self::Cycle { period } => Self::cycle(i64::from(period)),
            Self::Count { max } => Self::count(max.map(i64::from)),
            other => Ok(other),
        }
    }

    /// Returns true for modes whose state is a click count.
    pub fn is_counting(self) -> bool {
        matches!(self, Self::Cycle { .. } | Self::Count { .. })
    }

    /// Returns the rule used to pick from indexed sequences.
    pub fn index_rule(self) -> IndexRule {
        match self {
            Self::Cycle { .. } => IndexRule::Wrap,
            _ => IndexRule::Clamp,
        }
    }

    /// Folds a raw click count into this mode's range.
    pub fn normalize(self, count: u32) -> u32 {
        match self {
            Self::Display => 0,
            Self::Single | Self::Multiple => count.min(1),
            Self::Cycle { period } => count % period,
            Self::Count { max: Some(max) } => count.min(max),
            Self::Count { max: None } => count,
        }
    }
}

/// The value produced by the selection state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Selected region ids, for boolean modes.
    Ids(Vec<String>),
    /// Click count per region, for counting modes.
    Counts(IndexMap<String, i64>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Ids(Vec::new())
    }
}

impl Selection {
    /// Checks this selection against a mode.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError`] on a negative count, or on more than one
    /// selected region in single mode.
    pub fn validate(&self, mode: Mode) -> Result<(), ModeError> {
        if let Self::Counts(counts) = self {
            if let Some((region, &count)) = counts.iter().find(|&(_, &count)| count < 0) {
                return Err(ModeError::NegativeCount {
                    region: region.clone(),
                    count,
                });
            }
        }

        if mode == Mode::Single {
            let selected = match self {
                Self::Ids(ids) => ids.len(),
                Self::Counts(counts) => counts.values().filter(|&&count| count > 0).count(),
            };
            if selected > 1 {
                return Err(ModeError::MultipleSelected(selected));
            }
        }

        Ok(())
    }

    /// Returns the raw count for a region. Untouched regions count 0.
    pub fn count_of(&self, region: &str) -> u32 {
        match self {
            Self::Ids(ids) => u32::from(ids.iter().any(|id| id == region)),
            Self::Counts(counts) => counts
                .get(region)
                .and_then(|&count| u32::try_from(count).ok())
                .unwrap_or(0),
        }
    }
}

/// The interaction state of one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionState {
    pub selected: bool,
    pub hovered: bool,
    pub count: u32,
}

impl RegionState {
    /// The state of a region nobody has touched.
    pub fn untouched() -> Self {
        Self::default()
    }

    /// Builds a region state from a click count already normalized for its
    /// mode.
    pub fn from_count(count: u32, hovered: bool) -> Self {
        Self {
            selected: count > 0,
            hovered,
            count,
        }
    }
}

/// A fixed interaction state for every region of a surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub selection: Selection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovered: Option<String>,
}

impl Snapshot {
    /// Creates a snapshot after checking it against `mode`.
    pub fn new(mode: Mode, selection: Selection, hovered: Option<String>) -> Result<Self, ModeError> {
        selection.validate(mode)?;
        Ok(Self { selection, hovered })
    }

    /// Returns the state of `region` under `mode`.
    pub fn state_of(&self, mode: Mode, region: &str) -> RegionState {
        let count = mode.normalize(self.selection.count_of(region));
        let hovered = self.hovered.as_deref() == Some(region);
        RegionState::from_count(count, hovered)
    }
}
