//! Configuration types for Livery.
//!
//! All types implement [`serde::Deserialize`] so they load directly from a
//! TOML or JSON document.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`OutputConfig`] - Controls how results are serialized.
//!
//! The `[wash]` section is kept raw and decoded leniently by
//! [`livery_parser::decode_wash`], so that friendly shorthand such as
//! `"none"` or `"*1.5"` works in configuration files too.
//!
//! # Example
//!
//! ```
//! # use livery::config::AppConfig;
//! let config: AppConfig = serde_json::from_str(
//!     r##"{"wash": {"shape": {"__all": {"fill": "#f8fafc"}}}, "output": {"pretty": true}}"##,
//! )
//! .unwrap();
//! assert!(config.output().pretty());
//! assert!(config.wash().is_some());
//! ```

use serde::Deserialize;
use serde_json::Value;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Raw wash seeds, one group table per category.
    #[serde(default)]
    wash: Option<Value>,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from raw wash seeds and output settings.
    pub fn new(wash: Option<Value>, output: OutputConfig) -> Self {
        Self { wash, output }
    }

    /// Returns the raw wash seeds, if any were configured.
    pub fn wash(&self) -> Option<&Value> {
        self.wash.as_ref()
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Serialization settings for payloads and flat maps.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default)]
    pretty: bool,
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
