//! Deferred arithmetic against a property of the resolved parent.
//!
//! A [`Relative`] expression is a small closed expression tree rather than a
//! closure: it serializes to the rendering surface as the tagged triple
//! `{"relative": [property, operator, operand]}` and re-evaluates there with
//! the same arithmetic used for immediate resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::property::Property;

/// The arithmetic applied by a relative expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "*")]
    Multiply,
}

impl Operator {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Multiply => '*',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// `parent.<property> <operator> <operand>`.
///
/// # Examples
///
/// ```
/// use livery_core::{property::Property, relative::Relative};
///
/// let grow = Relative::multiply(Property::StrokeWidth, 1.5);
/// assert_eq!(grow.evaluate(2.0, Property::StrokeWidth), 3.0);
/// assert_eq!(grow.to_string(), "parent.stroke_width * 1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Property, Operator, f64)", into = "(Property, Operator, f64)")]
pub struct Relative {
    property: Property,
    op: Operator,
    operand: f64,
}

impl Relative {
    pub fn new(property: Property, op: Operator, operand: f64) -> Self {
        Self {
            property,
            op,
            operand,
        }
    }

    /// `parent.<property> + operand`
    pub fn add(property: Property, operand: f64) -> Self {
        Self::new(property, Operator::Add, operand)
    }

    /// `parent.<property> * operand`
    pub fn multiply(property: Property, operand: f64) -> Self {
        Self::new(property, Operator::Multiply, operand)
    }

    /// The parent property this expression reads.
    pub fn property(&self) -> Property {
        self.property
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn operand(&self) -> f64 {
        self.operand
    }

    /// Applies the expression to the parent's value and clamps the result to
    /// the domain of `target`, the property being assigned.
    pub fn evaluate(&self, parent: f64, target: Property) -> f64 {
        let value = match self.op {
            Operator::Add => parent + self.operand,
            Operator::Multiply => parent * self.operand,
        };
        target.clamp(value)
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parent.{} {} {}", self.property, self.op, self.operand)
    }
}

impl From<(Property, Operator, f64)> for Relative {
    fn from((property, op, operand): (Property, Operator, f64)) -> Self {
        Self::new(property, op, operand)
    }
}

impl From<Relative> for (Property, Operator, f64) {
    fn from(expr: Relative) -> Self {
        (expr.property, expr.op, expr.operand)
    }
}
