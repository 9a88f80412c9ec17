//! Error and diagnostic system for the Livery parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Key paths locating the offending value in a raw record
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors and warnings
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with optional error code, key path, and help
//! text. Multiple diagnostics are wrapped in [`ParseError`] when decoding
//! fails; successful decodes return their warnings in [`Decoded`].
//!
//! # Example
//!
//! ```
//! # use livery_parser::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::warning("`fill` does not apply to a line leaf")
//!     .with_code(ErrorCode::W002)
//!     .with_path("aes.__line.fill")
//!     .with_help("line elements never carry fill; remove the property");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use collector::Decoded;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
