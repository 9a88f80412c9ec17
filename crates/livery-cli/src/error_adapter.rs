//! Error adapter for converting LiveryError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`livery_parser::error::ParseError`] contains multiple diagnostics,
//! each diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use livery::LiveryError;
use livery_parser::error::Diagnostic;

/// Adapter for a single decoding diagnostic.
///
/// Raw records have no source text to point into, so the adapter renders the
/// key path of the offending value as part of the message.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Names the record the diagnostic came from (`wash`, `overrides`, ...).
    context: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, context: &'a str) -> Self {
        Self { diag, context }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("context", &self.context)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diag.path() {
            Some(path) => write!(f, "{} (at `{}.{path}`)", self.diag.message(), self.context),
            None => write!(f, "{} (in {})", self.diag.message(), self.context),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        if self.diag.severity().is_warning() {
            Some(miette::Severity::Warning)
        } else {
            Some(miette::Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for non-diagnostic [`LiveryError`] variants.
///
/// This adapter handles errors that don't carry decoding diagnostics, such
/// as I/O, resolution and interaction-mode errors.
pub struct ErrorAdapter<'a>(pub &'a LiveryError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LiveryError::Io(_) => "livery::io",
            LiveryError::Parse { .. } => return None,
            LiveryError::Resolve(_) => "livery::resolve",
            LiveryError::Mode(_) => "livery::mode",
            LiveryError::Json(_) => "livery::json",
            LiveryError::UnknownSurface(_) => "livery::surface",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            LiveryError::Resolve(_) => Some(Box::new(
                "relative expressions need a number in the layer below; check `null` values",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A decoding diagnostic with a key path.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`LiveryError`] into a list of reportable errors.
///
/// For [`LiveryError::Parse`], this returns one [`Reportable`] for each
/// error diagnostic; warnings were already logged while decoding. For other
/// error variants, this returns a single [`Reportable`].
pub fn to_reportables(err: &LiveryError) -> Vec<Reportable<'_>> {
    match err {
        LiveryError::Parse {
            err: parse_err,
            context,
        } => parse_err
            .errors()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, context)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
