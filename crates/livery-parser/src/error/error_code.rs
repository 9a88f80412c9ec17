//! Error codes for the Livery diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - Relative expression shorthand errors
//! - `E1xx` - Value errors in raw records
//! - `E2xx` - Syntax errors in the documents records are read from
//! - `W0xx` - Warnings: ignored keys and values without effect

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Shorthand Errors (E0xx)
    // =========================================================================
    /// Malformed relative expression.
    ///
    /// The text is neither an operator followed by a number (`"+1"`,
    /// `"*1.5"`) nor a `parent.<property> <op> <number>` expression.
    E001,

    /// Unknown property in relative expression.
    E002,

    /// Relative expression on a non-numeric property.
    ///
    /// Only `fill_opacity` and `stroke_width` can hold or be referenced by
    /// relative expressions.
    E003,

    // =========================================================================
    // Value Errors (E1xx)
    // =========================================================================
    /// Invalid color.
    ///
    /// The value is not a CSS color string, `"none"` or null.
    E100,

    /// Expected a number or relative expression.
    E101,

    /// Expected a boolean.
    E102,

    /// Expected a dash pattern string.
    E103,

    /// Invalid entry.
    ///
    /// A group-table value must be an object, null, `false` or `"disabled"`.
    E104,

    /// Invalid leaf kind or category.
    E105,

    /// Invalid layer.
    ///
    /// A state layer must be an object, null, `false` or `"inherit"`.
    E106,

    /// Invalid record.
    ///
    /// A table or wash record must be an object.
    E107,

    // =========================================================================
    // Document Errors (E2xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The file holding a record is not valid JSON or TOML.
    E200,

    // =========================================================================
    // Warnings (W0xx)
    // =========================================================================
    /// Unknown key; it is ignored.
    W001,

    /// Property does not apply to the leaf kind; it is kept but has no effect.
    W002,

    /// Wash seed key other than `__all`; it is ignored.
    W003,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Shorthand errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            // Value errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",

            ErrorCode::E200 => "E200",
            // Warnings
            ErrorCode::W001 => "W001",
            ErrorCode::W002 => "W002",
            ErrorCode::W003 => "W003",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Shorthand errors
            ErrorCode::E001 => "malformed relative expression",
            ErrorCode::E002 => "unknown property",
            ErrorCode::E003 => "relative expression on non-numeric property",
            // Value errors
            ErrorCode::E100 => "invalid color",
            ErrorCode::E101 => "expected number",
            ErrorCode::E102 => "expected boolean",
            ErrorCode::E103 => "expected dash pattern",
            ErrorCode::E104 => "invalid entry",
            ErrorCode::E105 => "invalid kind",
            ErrorCode::E106 => "invalid layer",
            ErrorCode::E107 => "invalid record",
            // Document errors
            ErrorCode::E200 => "malformed document",
            // Warnings
            ErrorCode::W001 => "unknown key",
            ErrorCode::W002 => "property does not apply",
            ErrorCode::W003 => "ignored wash seed key",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::W002.to_string(), "W002");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "invalid color");
        assert_eq!(ErrorCode::W001.description(), "unknown key");
    }
}
