//! The core diagnostic type for the Livery error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, the key path of the offending value, and help text.

use std::fmt;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message about one value of a raw record.
///
/// Raw records are structured data, not source text, so a diagnostic points
/// at its value with a dotted key path (`aes.coast.hover.fill`) instead of a
/// source span.
///
/// # Example
///
/// ```text
/// warning[W002]: `fill` does not apply to a line leaf
///   --> aes.__line.fill
///    = help: line elements never carry fill; remove the property
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    path: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use livery_parser::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("invalid color `blu`")
    ///     .with_code(ErrorCode::E100)
    ///     .with_path("aes.r1.fill")
    ///     .with_help("use a CSS color such as `blue` or `#00f`");
    /// assert_eq!(diag.path(), Some("aes.r1.fill"));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the key path of the offending value, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the key path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            path: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at `{path}`)")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
