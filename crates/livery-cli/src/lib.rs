//! CLI logic for the Livery tool.
//!
//! Loads configuration, geometry, overrides and a snapshot, resolves them
//! through [`Livery`], and writes the result as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format, parse_mode};

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use indexmap::IndexMap;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use livery::{
    Livery, LiveryError, SurfaceSpec, geometry::Geometry, mode::Snapshot, table::GroupTable,
};
use livery_parser::error::{Diagnostic, ErrorCode, ParseError};

/// Surface id under which the CLI declares its single diagram.
const SURFACE_ID: &str = "cli";

/// Run the Livery CLI application
///
/// Renders the requested output and writes it to the output file, or to
/// standard output when none is given.
///
/// # Errors
///
/// Returns `LiveryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Decoding errors in overrides, snapshot or geometry
/// - Interaction mode errors
/// - Resolution errors
pub fn run(args: &Args) -> Result<(), LiveryError> {
    info!(
        geometry_path = args.geometry,
        format:? = args.format;
        "Processing surface"
    );

    let output = render(args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Resolves the inputs named by `args` and returns the output document.
///
/// # Errors
///
/// See [`run`].
pub fn render(args: &Args) -> Result<String, LiveryError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let pretty = app_config.output().pretty();
    let livery = Livery::new(app_config)?;

    let geometry: Geometry = serde_json::from_str(&fs::read_to_string(&args.geometry)?)?;
    let aes = match &args.aes {
        Some(path) => livery::decode_overrides(&read_raw(path)?)?,
        None => GroupTable::new(),
    };
    let tooltips: IndexMap<String, String> = match &args.tooltips {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => IndexMap::new(),
    };
    let snapshot: Snapshot = match &args.state {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Snapshot::default(),
    };
    debug!(snapshot:?; "Loaded snapshot");

    let spec = SurfaceSpec::new(geometry)
        .with_aes(aes)
        .with_mode(args.mode)
        .with_tooltips(tooltips)
        .with_selection(snapshot.selection.clone());
    let payload = livery.declare(SURFACE_ID, spec)?;

    match args.format {
        Format::Payload => Ok(payload.to_json(pretty)?),
        Format::Flat => {
            let flat = livery.snapshot(SURFACE_ID, &snapshot)?;
            to_json(&flat, pretty)
        }
        Format::Svg => {
            let attributes: IndexMap<String, IndexMap<&str, String>> = livery
                .snapshot(SURFACE_ID, &snapshot)?
                .into_iter()
                .map(|(region, flat)| (region, flat.svg_attributes()))
                .collect();
            to_json(&attributes, pretty)
        }
    }
}

/// Reads a raw record from a JSON or TOML file, chosen by extension.
///
/// Syntax errors come back as a decode diagnostic labelled with the file.
fn read_raw(path: impl AsRef<Path>) -> Result<Value, LiveryError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let parsed = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content).map_err(|err| match err.span() {
            Some(span) => {
                let line = content[..span.start].matches('\n').count() + 1;
                format!("{} (line {line})", err.message().trim_end())
            }
            None => err.message().trim_end().to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|err| err.to_string())
    };

    parsed.map_err(|message| {
        let diagnostic = Diagnostic::error(message)
            .with_code(ErrorCode::E200)
            .with_help("fix the file's syntax; records are read as TOML for `.toml` files and JSON otherwise");
        LiveryError::new_parse_error(ParseError::from(vec![diagnostic]), path.display().to_string())
    })
}

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String, LiveryError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
