//! Error types for aesthetic resolution.
//!
//! Both error kinds are configuration errors: they are raised synchronously
//! where resolution or construction is attempted and are never coerced into a
//! fallback value.

use thiserror::Error;

use crate::{property::Property, relative::Relative};

/// An error raised while resolving an aesthetic against its parent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("relative expression `{expr}` references `{}`, which the parent does not set", .expr.property())]
    AbsentParent { expr: Relative },

    #[error("relative expression `{expr}` references `{}`, which is {found} in the parent", .expr.property())]
    NonNumericParent { expr: Relative, found: &'static str },

    #[error("property `{property}` still holds relative expression `{expr}` after resolution")]
    Unresolved { property: Property, expr: Relative },
}

/// An error raised when an interaction mode or state value is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("cycle period must be at least 2, got {0}")]
    CyclePeriod(i64),

    #[error("count limit must be at least 1, got {0}")]
    CountLimit(i64),

    #[error("count for region `{region}` must not be negative, got {count}")]
    NegativeCount { region: String, count: i64 },

    #[error("single selection mode accepts at most one selected region, got {0}")]
    MultipleSelected(usize),
}
