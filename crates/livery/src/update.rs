//! One-way updates pushed to a rendered surface.
//!
//! Updates are fire-and-forget: there is no acknowledgement, no ordering
//! guarantee and no rollback. The target applies whatever fields are present
//! by replacing its own values wholesale.

use std::sync::mpsc::Sender;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use livery_core::{mode::Selection, table::GroupTable};

/// The fields of a surface an update may replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Updates {
    /// A merged group table replacing the surface's table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aes: Option<GroupTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltips: Option<IndexMap<String, String>>,
}

impl Updates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aes(mut self, aes: GroupTable) -> Self {
        self.aes = Some(aes);
        self
    }

    pub fn with_value(mut self, value: Selection) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_tooltips(mut self, tooltips: IndexMap<String, String>) -> Self {
        self.tooltips = Some(tooltips);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.aes.is_none() && self.value.is_none() && self.tooltips.is_none()
    }
}

/// An update addressed to one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMessage {
    pub target: String,
    pub updates: Updates,
}

/// Receives update messages on their way to a surface.
pub trait UpdateSink {
    fn send(&mut self, message: UpdateMessage);
}

impl UpdateSink for Sender<UpdateMessage> {
    fn send(&mut self, message: UpdateMessage) {
        let target = message.target.clone();
        if Sender::send(self, message).is_err() {
            debug!(target = target.as_str(); "Dropping update for a disconnected surface");
        }
    }
}

impl UpdateSink for Vec<UpdateMessage> {
    fn send(&mut self, message: UpdateMessage) {
        self.push(message);
    }
}
