//! Collector for accumulating diagnostics while decoding a record.
//!
//! The [`DiagnosticCollector`] lets the decoder report every malformed value
//! and every ignored key in one pass instead of failing on the first error.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// A successfully decoded value with the warnings raised along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Decoded<T> {
    /// Discards the warnings.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transforms the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// A collector for accumulating diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// Warnings are also logged as they are emitted.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        } else {
            warn!(
                code = diagnostic.code().map(|code| code.as_str()),
                path = diagnostic.path();
                "{}", diagnostic.message()
            );
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if an error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise returns the value together with the warnings.
    pub fn finish<T>(self, value: T) -> Result<Decoded<T>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(Decoded {
                value,
                warnings: self.diagnostics,
            })
        }
    }
}
