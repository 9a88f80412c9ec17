//! Error types for Livery operations.
//!
//! This module provides the main error type [`LiveryError`] which wraps the
//! error conditions of decoding, merging and resolving aesthetics.

use std::io;

use thiserror::Error;

use livery_core::error::{ModeError, ResolveError};
use livery_parser::error::ParseError;

/// The main error type for Livery operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic collected while decoding a
/// raw record, plus a label naming the record, so callers can render all of
/// them at once.
#[derive(Debug, Error)]
pub enum LiveryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid {context}: {err}")]
    Parse { err: ParseError, context: String },

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Interaction mode error: {0}")]
    Mode(#[from] ModeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown surface `{0}`")]
    UnknownSurface(String),
}

impl LiveryError {
    /// Create a new `Parse` error labelled with the record it came from.
    pub fn new_parse_error(err: ParseError, context: impl Into<String>) -> Self {
        Self::Parse {
            err,
            context: context.into(),
        }
    }
}
