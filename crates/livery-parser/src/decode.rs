//! Lenient decoding of raw records into core types.
//!
//! Raw records arrive as JSON values (TOML configuration is converted to JSON
//! values before it gets here). Decoding is forward compatible: keys outside
//! the declared set are reported as warnings and ignored, and properties that
//! do not apply to a leaf kind are reported but kept. Malformed values are
//! errors; every error in a record is collected before decoding fails.
//!
//! # Raw shapes
//!
//! | Raw value | Decodes to |
//! |-----------|------------|
//! | `null`, `false`, `"disabled"` | [`Entry::Disabled`] |
//! | object with `base`, `select` or `hover` | [`Entry::State`] |
//! | object with any array-valued property | [`Entry::Indexed`] |
//! | any other object | [`Entry::Leaf`] |
//!
//! These are also the shapes a payload's group table is serialized in, so a
//! serialized table decodes back unchanged.
//!
//! Within a leaf, a color may be `"none"` or `null` (explicit null) or
//! `"inherit"` (unset); a number may be a literal, `null`, a shorthand string
//! such as `"*1.5"`, or the tagged `{"relative": [..]}` form.

use serde_json::{Map, Value};

use livery_core::{
    aesthetic::Aesthetic,
    category::{Category, Kind},
    color::Color,
    dash::DashStyle,
    field::{Field, NumericField},
    indexed::{Indexed, IndexedAesthetic},
    property::Property,
    relative::Relative,
    state::{Layer, StateAesthetic},
    table::{ALL_KEY, Entry, GroupTable},
    wash::WashSeeds,
};

use crate::{
    error::{Decoded, Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    relative::{looks_relative, parse_relative},
};

const LAYER_KEYS: [&str; 3] = ["base", "select", "hover"];
const LEAF_META_KEYS: [&str; 2] = ["kind", "category"];

/// Decodes a single leaf aesthetic.
///
/// # Errors
///
/// Returns [`ParseError`] with every malformed value in the record.
pub fn decode_leaf(value: &Value) -> Result<Decoded<Aesthetic>, ParseError> {
    let mut decoder = Decoder::new();
    let leaf = decoder.leaf(value, &KeyPath::root());
    decoder.finish(leaf)
}

/// Decodes a single group-table entry.
pub fn decode_entry(value: &Value) -> Result<Decoded<Entry>, ParseError> {
    let mut decoder = Decoder::new();
    let entry = decoder.entry(value, &KeyPath::root());
    decoder.finish(entry)
}

/// Decodes a group table, promoting a bare entry to `{"__all": entry}`.
///
/// # Examples
///
/// ```
/// use livery_parser::decode_table;
/// use serde_json::json;
///
/// let bare = decode_table(&json!({"fill": "#eee", "stroke_width": "+1"})).unwrap();
/// assert_eq!(bare.value.keys().collect::<Vec<_>>(), vec!["__all"]);
///
/// let keyed = decode_table(&json!({"coast": {"fill": "#39f"}, "r7": null})).unwrap();
/// assert_eq!(keyed.value.len(), 2);
/// ```
pub fn decode_table(value: &Value) -> Result<Decoded<GroupTable>, ParseError> {
    let mut decoder = Decoder::new();
    let table = decoder.table(value, &KeyPath::root());
    decoder.finish(table)
}

/// Decodes wash seeds: an object with optional `shape`, `line` and `text`
/// tables.
///
/// Only each seed's `__all` entry takes effect; other keys are reported.
pub fn decode_wash(value: &Value) -> Result<Decoded<WashSeeds>, ParseError> {
    let mut decoder = Decoder::new();
    let seeds = decoder.wash(value, &KeyPath::root());
    decoder.finish(seeds)
}

/// A dotted path to the value being decoded.
#[derive(Debug, Clone, Default)]
struct KeyPath(Vec<String>);

impl KeyPath {
    fn root() -> Self {
        Self::default()
    }

    fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    fn render(&self) -> String {
        if self.0.is_empty() {
            "<root>".to_string()
        } else {
            self.0.join(".")
        }
    }
}

struct Decoder {
    collector: DiagnosticCollector,
}

impl Decoder {
    fn new() -> Self {
        Self {
            collector: DiagnosticCollector::new(),
        }
    }

    fn finish<T>(self, value: T) -> Result<Decoded<T>, ParseError> {
        self.collector.finish(value)
    }

    fn error(&mut self, code: ErrorCode, path: &KeyPath, message: String) {
        self.collector
            .emit(Diagnostic::error(message).with_code(code).with_path(path.render()));
    }

    fn warning(&mut self, code: ErrorCode, path: &KeyPath, message: String, help: &str) {
        self.collector.emit(
            Diagnostic::warning(message)
                .with_code(code)
                .with_path(path.render())
                .with_help(help),
        );
    }

    fn unknown_key(&mut self, path: &KeyPath, key: &str, expected: &str) {
        self.warning(
            ErrorCode::W001,
            &path.child(key),
            format!("unknown key `{key}` is ignored"),
            expected,
        );
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn table(&mut self, value: &Value, path: &KeyPath) -> GroupTable {
        match value {
            Value::Object(map) if !looks_like_entry(map) => map
                .iter()
                .map(|(key, raw)| (key.clone(), self.entry(raw, &path.child(key))))
                .collect(),
            other => GroupTable::from_entry(self.entry(other, path)),
        }
    }

    fn wash(&mut self, value: &Value, path: &KeyPath) -> WashSeeds {
        let mut seeds = WashSeeds::default();
        let Value::Object(map) = value else {
            self.error(
                ErrorCode::E107,
                path,
                format!("wash must be an object, found {}", describe(value)),
            );
            return seeds;
        };

        for (key, raw) in map {
            let child = path.child(key);
            let table = match key.as_str() {
                "shape" => &mut seeds.shape,
                "line" => &mut seeds.line,
                "text" => &mut seeds.text,
                _ => {
                    self.unknown_key(path, key, "wash seeds are `shape`, `line` and `text`");
                    continue;
                }
            };
            let parsed = self.table(raw, &child);
            for ignored in parsed.keys().filter(|&key| key != ALL_KEY) {
                self.warning(
                    ErrorCode::W003,
                    &child.child(ignored),
                    format!("wash seed key `{ignored}` is ignored"),
                    "a wash applies to every diagram; only `__all` takes effect",
                );
            }
            if let Some(entry) = parsed.get(ALL_KEY) {
                table.insert(ALL_KEY, entry.clone());
            }
        }
        seeds
    }

    // =========================================================================
    // Entries and layers
    // =========================================================================

    fn entry(&mut self, value: &Value, path: &KeyPath) -> Entry {
        match value {
            Value::Null | Value::Bool(false) => Entry::Disabled,
            Value::String(s) if s == "disabled" => Entry::Disabled,
            Value::Object(map) if LAYER_KEYS.iter().any(|key| map.contains_key(*key)) => {
                Entry::State(self.state(map, path))
            }
            Value::Object(map) if map.values().any(Value::is_array) => {
                Entry::Indexed(self.indexed(map, path))
            }
            Value::Object(map) => Entry::Leaf(self.leaf_map(map, path)),
            other => {
                self.error(
                    ErrorCode::E104,
                    path,
                    format!(
                        "expected an aesthetic object, null, false or \"disabled\", found {}",
                        describe(other)
                    ),
                );
                Entry::Disabled
            }
        }
    }

    fn state(&mut self, map: &Map<String, Value>, path: &KeyPath) -> StateAesthetic {
        let mut state = StateAesthetic::new();
        for (key, raw) in map {
            let child = path.child(key);
            match key.as_str() {
                "base" => state = state.with_base(self.layer(raw, &child)),
                "select" => state = state.with_select(self.layer(raw, &child)),
                "hover" => state = state.with_hover(self.layer(raw, &child)),
                _ => self.unknown_key(path, key, "state containers have `base`, `select` and `hover`"),
            }
        }
        state
    }

    fn layer(&mut self, value: &Value, path: &KeyPath) -> Layer {
        match value {
            Value::Null | Value::Bool(false) => Layer::Disabled,
            Value::String(s) if s == "disabled" => Layer::Disabled,
            Value::String(s) if s == "inherit" => Layer::Unset,
            Value::Object(map) => Layer::Set(self.leaf_map(map, path)),
            other => {
                self.error(
                    ErrorCode::E106,
                    path,
                    format!(
                        "expected an aesthetic object, null or \"inherit\", found {}",
                        describe(other)
                    ),
                );
                Layer::Unset
            }
        }
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    fn leaf(&mut self, value: &Value, path: &KeyPath) -> Aesthetic {
        match value {
            Value::Object(map) => self.leaf_map(map, path),
            other => {
                self.error(
                    ErrorCode::E107,
                    path,
                    format!("expected an aesthetic object, found {}", describe(other)),
                );
                Aesthetic::default()
            }
        }
    }

    fn kind(&mut self, map: &Map<String, Value>, path: &KeyPath) -> (Kind, Option<Category>) {
        let kind = match map.get("kind") {
            None => Kind::Shape,
            Some(raw) => match serde_json::from_value::<Kind>(raw.clone()) {
                Ok(kind) => kind,
                Err(_) => {
                    self.error(
                        ErrorCode::E105,
                        &path.child("kind"),
                        format!(
                            "expected one of `shape`, `line`, `text`, `path`, found {}",
                            describe(raw)
                        ),
                    );
                    Kind::Shape
                }
            },
        };

        let category = match map.get("category") {
            None | Some(Value::Null) => None,
            Some(raw) => match serde_json::from_value::<Category>(raw.clone()) {
                Ok(category) if kind == Kind::Path => Some(category),
                Ok(_) => {
                    self.warning(
                        ErrorCode::W002,
                        &path.child("category"),
                        format!("`category` only applies to path leaves, not {kind}"),
                        "remove the key or set `kind` to `path`",
                    );
                    None
                }
                Err(_) => {
                    self.error(
                        ErrorCode::E105,
                        &path.child("category"),
                        format!(
                            "expected one of `shape`, `line`, `text`, found {}",
                            describe(raw)
                        ),
                    );
                    None
                }
            },
        };

        (kind, category)
    }

    fn leaf_map(&mut self, map: &Map<String, Value>, path: &KeyPath) -> Aesthetic {
        let (kind, category) = self.kind(map, path);
        let mut leaf = Aesthetic::new(kind).with_category(category);

        for (key, raw) in map {
            if LEAF_META_KEYS.contains(&key.as_str()) {
                continue;
            }
            let Ok(property) = key.parse::<Property>() else {
                self.unknown_key(path, key, &property_help());
                continue;
            };
            let child = path.child(key);
            leaf = match property {
                Property::Fill => leaf.with_fill(self.color(raw, &child)),
                Property::FillOpacity => {
                    leaf.with_fill_opacity(self.number(raw, property, &child))
                }
                Property::Stroke => leaf.with_stroke(self.color(raw, &child)),
                Property::StrokeWidth => {
                    leaf.with_stroke_width(self.number(raw, property, &child))
                }
                Property::StrokeDasharray => leaf.with_stroke_dasharray(self.dash(raw, &child)),
                Property::NonScalingStroke => {
                    leaf.with_non_scaling_stroke(self.flag(raw, &child))
                }
            };
        }

        for property in leaf.mismatches() {
            self.mismatch(kind, property, path);
        }
        leaf
    }

    fn indexed(&mut self, map: &Map<String, Value>, path: &KeyPath) -> IndexedAesthetic {
        let (kind, category) = self.kind(map, path);
        let mut indexed = IndexedAesthetic::new(kind).with_category(category);

        for (key, raw) in map {
            if LEAF_META_KEYS.contains(&key.as_str()) {
                continue;
            }
            let Ok(property) = key.parse::<Property>() else {
                self.unknown_key(path, key, &property_help());
                continue;
            };
            let child = path.child(key);
            indexed = match property {
                Property::Fill => indexed.with_fill(self.sequence(raw, &child, Self::color)),
                Property::FillOpacity => indexed.with_fill_opacity(
                    self.sequence(raw, &child, |d, v, p| d.number(v, property, p)),
                ),
                Property::Stroke => indexed.with_stroke(self.sequence(raw, &child, Self::color)),
                Property::StrokeWidth => indexed.with_stroke_width(
                    self.sequence(raw, &child, |d, v, p| d.number(v, property, p)),
                ),
                Property::StrokeDasharray => {
                    indexed.with_stroke_dasharray(self.sequence(raw, &child, Self::dash))
                }
                Property::NonScalingStroke => {
                    indexed.with_non_scaling_stroke(self.sequence(raw, &child, Self::flag))
                }
            };
        }

        for property in indexed.mismatches() {
            self.mismatch(kind, property, path);
        }
        indexed
    }

    fn sequence<F>(
        &mut self,
        value: &Value,
        path: &KeyPath,
        mut item: impl FnMut(&mut Self, &Value, &KeyPath) -> F,
    ) -> Indexed<F> {
        match value {
            Value::Array(items) => Indexed::Many(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, raw)| item(self, raw, &path.index(i)))
                    .collect(),
            ),
            single => Indexed::One(item(self, single, path)),
        }
    }

    fn mismatch(&mut self, kind: Kind, property: Property, path: &KeyPath) {
        self.warning(
            ErrorCode::W002,
            &path.child(property.name()),
            format!("`{property}` does not apply to a {kind} leaf"),
            if kind == Kind::Line {
                "line elements never carry fill; the value is kept but has no effect"
            } else {
                "the value is kept but has no effect"
            },
        );
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn color(&mut self, value: &Value, path: &KeyPath) -> Field<Color> {
        match value {
            Value::Null => Field::Null,
            Value::String(s) if s == "none" => Field::Null,
            Value::String(s) if s == "inherit" => Field::Unset,
            Value::String(s) => match Color::new(s) {
                Ok(color) => Field::Value(color),
                Err(message) => {
                    self.error(ErrorCode::E100, path, message);
                    Field::Unset
                }
            },
            other => {
                self.error(
                    ErrorCode::E100,
                    path,
                    format!("expected a color string, found {}", describe(other)),
                );
                Field::Unset
            }
        }
    }

    fn number(&mut self, value: &Value, target: Property, path: &KeyPath) -> NumericField {
        match value {
            Value::Null => NumericField::Null,
            Value::Number(n) => match n.as_f64() {
                Some(n) => NumericField::Value(n),
                None => {
                    self.error(ErrorCode::E101, path, format!("number `{n}` is out of range"));
                    NumericField::Unset
                }
            },
            Value::String(s) if s == "inherit" => NumericField::Unset,
            Value::String(s) if looks_relative(s) => match parse_relative(s, target) {
                Ok(expr) => NumericField::Relative(expr),
                Err(diag) => {
                    self.collector.emit(diag.with_path(path.render()));
                    NumericField::Unset
                }
            },
            Value::Object(map) if map.contains_key("relative") => {
                match serde_json::from_value::<Relative>(map["relative"].clone()) {
                    Ok(expr) if expr.property().is_numeric() => NumericField::Relative(expr),
                    Ok(expr) => {
                        self.error(
                            ErrorCode::E003,
                            path,
                            format!("relative expression `{expr}` references a non-numeric property"),
                        );
                        NumericField::Unset
                    }
                    Err(err) => {
                        self.error(ErrorCode::E001, path, format!("invalid relative triple: {err}"));
                        NumericField::Unset
                    }
                }
            }
            other => {
                self.error(
                    ErrorCode::E101,
                    path,
                    format!(
                        "expected a number, null or relative expression, found {}",
                        describe(other)
                    ),
                );
                NumericField::Unset
            }
        }
    }

    fn dash(&mut self, value: &Value, path: &KeyPath) -> Field<DashStyle> {
        match value {
            Value::Null => Field::Null,
            Value::String(s) if s == "none" => Field::Null,
            Value::String(s) if s == "inherit" => Field::Unset,
            Value::String(s) => Field::Value(DashStyle::from(s.clone())),
            other => {
                self.error(
                    ErrorCode::E103,
                    path,
                    format!("expected a dash pattern string, found {}", describe(other)),
                );
                Field::Unset
            }
        }
    }

    fn flag(&mut self, value: &Value, path: &KeyPath) -> Field<bool> {
        match value {
            Value::Null => Field::Null,
            Value::Bool(flag) => Field::Value(*flag),
            Value::String(s) if s == "inherit" => Field::Unset,
            other => {
                self.error(
                    ErrorCode::E102,
                    path,
                    format!("expected a boolean, found {}", describe(other)),
                );
                Field::Unset
            }
        }
    }
}

/// Returns true if an object is itself an entry rather than a table of
/// entries.
fn looks_like_entry(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map.keys().all(|key| {
            LAYER_KEYS.contains(&key.as_str())
                || LEAF_META_KEYS.contains(&key.as_str())
                || key.parse::<Property>().is_ok()
        })
}

fn property_help() -> String {
    format!(
        "leaf keys are `kind`, `category`, {}",
        Property::ALL.map(|property| format!("`{property}`")).join(", ")
    )
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => format!("boolean `{flag}`"),
        Value::Number(n) => format!("number `{n}`"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
