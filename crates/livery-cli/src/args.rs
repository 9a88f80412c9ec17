//! Command-line argument definitions for the Livery CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the interaction
//! mode, the output format, configuration file selection, and logging
//! verbosity.

use clap::{Parser, ValueEnum};

use livery::mode::Mode;

/// What the CLI writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The payload a live surface resolves from
    Payload,
    /// The resolved property map of every region
    #[default]
    Flat,
    /// SVG presentation attributes of every region
    Svg,
}

/// Command-line arguments for the Livery tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the geometry description (JSON)
    #[arg(help = "Path to the geometry file")]
    pub geometry: String,

    /// Path to caller overrides (JSON or TOML)
    #[arg(short, long)]
    pub aes: Option<String>,

    /// Path to an interaction snapshot (JSON)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Path to region tooltips (JSON object)
    #[arg(long)]
    pub tooltips: Option<String>,

    /// Interaction mode: display, single, multiple, cycle=N, count or count=N
    #[arg(short, long, default_value = "single", value_parser = parse_mode)]
    pub mode: Mode,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Flat)]
    pub format: Format,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Parses an interaction mode written as `name` or `name=parameter`.
pub fn parse_mode(text: &str) -> Result<Mode, String> {
    let (name, parameter) = match text.split_once('=') {
        Some((name, parameter)) => (name.trim(), Some(parameter.trim())),
        None => (text.trim(), None),
    };
    let number = |parameter: &str| {
        parameter
            .parse::<i64>()
            .map_err(|err| format!("invalid mode parameter `{parameter}`: {err}"))
    };

    match (name, parameter) {
        ("display", None) => Ok(Mode::Display),
        ("single", None) => Ok(Mode::Single),
        ("multiple", None) => Ok(Mode::Multiple),
        ("cycle", Some(period)) => Mode::cycle(number(period)?).map_err(|err| err.to_string()),
        ("cycle", None) => Err("cycle mode needs a period, as in `cycle=3`".to_string()),
        ("count", max) => Mode::count(max.map(number).transpose()?).map_err(|err| err.to_string()),
        (name, Some(_)) if matches!(name, "display" | "single" | "multiple") => {
            Err(format!("mode `{name}` takes no parameter"))
        }
        (name, _) => Err(format!(
            "unknown mode `{name}`, expected display, single, multiple, cycle=N or count[=N]"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("single"), Ok(Mode::Single));
        assert_eq!(parse_mode("cycle=3"), Ok(Mode::Cycle { period: 3 }));
        assert_eq!(parse_mode("count"), Ok(Mode::Count { max: None }));
        assert_eq!(parse_mode("count = 5"), Ok(Mode::Count { max: Some(5) }));
    }

    #[test]
    fn test_parse_mode_errors() {
        assert!(parse_mode("cycle").is_err());
        assert!(parse_mode("cycle=1").is_err());
        assert!(parse_mode("count=0").is_err());
        assert!(parse_mode("single=2").is_err());
        assert!(parse_mode("toggle").is_err());
        assert!(parse_mode("cycle=many").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "livery",
            "map.json",
            "--mode",
            "cycle=4",
            "--format",
            "svg",
        ])
        .unwrap();
        assert_eq!(args.mode, Mode::Cycle { period: 4 });
        assert_eq!(args.format, Format::Svg);
        assert!(args.output.is_none());
    }
}
