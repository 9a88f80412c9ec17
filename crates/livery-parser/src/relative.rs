//! Parser for the relative expression shorthand.
//!
//! Raw records may write a relative expression as text instead of the
//! tagged wire form:
//!
//! | Text | Meaning |
//! |------|---------|
//! | `"+1"` | parent value of the same property plus 1 |
//! | `"-0.5"` | parent value of the same property minus 0.5 |
//! | `"*1.5"`, `"x1.5"` | parent value of the same property times 1.5 |
//! | `"parent.stroke_width * 2"` | parent stroke width times 2 |
//! | `"parent.fill_opacity - 0.25"` | parent fill opacity minus 0.25 |
//!
//! Subtraction is stored as addition of the negated operand.

use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{alt, opt, preceded},
    error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue},
    token::{literal, one_of, take_while},
};

use livery_core::{
    property::Property,
    relative::{Operator, Relative},
};

use crate::error::{Diagnostic, ErrorCode, Result};

type Input<'a> = &'a str;

/// The operator as written, before subtraction is folded into addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Written {
    Plus,
    Minus,
    Times,
}

impl Written {
    fn apply(self, operand: f64) -> (Operator, f64) {
        match self {
            Self::Plus => (Operator::Add, operand),
            Self::Minus => (Operator::Add, -operand),
            Self::Times => (Operator::Multiply, operand),
        }
    }
}

fn operator(input: &mut Input<'_>) -> ModalResult<Written> {
    alt((
        '+'.value(Written::Plus),
        '-'.value(Written::Minus),
        one_of(['*', 'x', '×']).value(Written::Times),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "one of `+`, `-`, `*` or `x`",
    )))
    .parse_next(input)
}

fn operand(input: &mut Input<'_>) -> ModalResult<f64> {
    preceded(multispace0, float)
        .context(StrContext::Expected(StrContextValue::Description("a number")))
        .parse_next(input)
}

fn parent_property<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded(
        literal("parent."),
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_' || c == '-'),
    )
    .context(StrContext::Label("parent property"))
    .parse_next(input)
}

/// Parses the whole text into an optional referenced property, an operator
/// and an operand.
fn expression<'a>(input: &mut Input<'a>) -> ModalResult<(Option<&'a str>, Written, f64)> {
    let _ = multispace0.parse_next(input)?;
    let property = opt(parent_property).parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let op = operator.parse_next(input)?;
    let value = operand.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    Ok((property, op, value))
}

/// Returns true when `text` looks like an attempt at a relative expression
/// rather than a plain string value.
pub(crate) fn looks_relative(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with("parent.") || text.starts_with(['+', '-', '*', 'x', '×'])
}

/// Parses relative expression shorthand for a value assigned to `target`.
///
/// Without a `parent.` prefix the expression references `target` itself.
///
/// # Errors
///
/// Returns a diagnostic when the text is malformed, names an unknown
/// property, or involves a non-numeric property.
///
/// # Examples
///
/// ```
/// use livery_core::{property::Property, relative::Relative};
/// use livery_parser::parse_relative;
///
/// let expr = parse_relative("*1.5", Property::StrokeWidth).unwrap();
/// assert_eq!(expr, Relative::multiply(Property::StrokeWidth, 1.5));
///
/// let expr = parse_relative("parent.fill_opacity - 0.25", Property::FillOpacity).unwrap();
/// assert_eq!(expr, Relative::add(Property::FillOpacity, -0.25));
/// ```
pub fn parse_relative(text: &str, target: Property) -> Result<Relative> {
    let mut input = text;
    let (referenced, op, value) = match expression.parse_next(&mut input) {
        Ok(parsed) if input.is_empty() => parsed,
        Ok(_) => {
            return Err(malformed(text, &format!("unexpected trailing text `{input}`")));
        }
        Err(err) => return Err(malformed(text, &describe(err))),
    };

    let property = match referenced {
        None => target,
        Some(name) => name.parse::<Property>().map_err(|message| {
            Diagnostic::error(message)
                .with_code(ErrorCode::E002)
                .with_help("relative expressions reference `fill_opacity` or `stroke_width`")
        })?,
    };

    for property in [target, property] {
        if !property.is_numeric() {
            return Err(Diagnostic::error(format!(
                "relative expression `{text}` involves non-numeric property `{property}`"
            ))
            .with_code(ErrorCode::E003)
            .with_help("only `fill_opacity` and `stroke_width` support relative expressions"));
        }
    }

    let (op, operand) = op.apply(value);
    Ok(Relative::new(property, op, operand))
}

fn describe(err: ErrMode<ContextError>) -> String {
    match err {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let expected: Vec<String> = e
                .context()
                .filter_map(|ctx| match ctx {
                    StrContext::Expected(value) => Some(format!("expected {value}")),
                    StrContext::Label(label) => Some(format!("invalid {label}")),
                    _ => None,
                })
                .collect();
            if expected.is_empty() {
                "unexpected input".to_string()
            } else {
                expected.join(", ")
            }
        }
        ErrMode::Incomplete(_) => "incomplete expression".to_string(),
    }
}

fn malformed(text: &str, reason: &str) -> Diagnostic {
    Diagnostic::error(format!("malformed relative expression `{text}`: {reason}"))
        .with_code(ErrorCode::E001)
        .with_help("write `+1`, `*1.5` or `parent.stroke_width * 2`")
}
