//! Emits the reference vehicle's car-control configuration as engine JSON.
//!
//! The output is a complete engine configuration fragment
//! (`{"aace.carControl": {...}}`) suitable for passing to the engine or for
//! use as a starting point for a vehicle-specific file.

use anyhow::{Context, Result, bail};
use carcontrol::runtime::init_tracing;
use carcontrol::{CAR_CONTROL_KEY, generate_car_control_config, validate_block};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let config = generate_car_control_config().context("building reference configuration")?;
    let document = config.to_engine_json()?;

    if args.validate {
        validate_block(&document[CAR_CONTROL_KEY])
            .context("generated configuration failed validation")?;
    }

    let mut rendered = if args.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };
    rendered.push('\n');

    match args.output {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    output: Option<PathBuf>,
    compact: bool,
    validate: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut parsed = CliArgs::default();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--output" | "-o" => {
                    if parsed.output.is_some() {
                        bail!("--output may only be provided once");
                    }
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("missing value for --output"))?;
                    parsed.output = Some(PathBuf::from(path));
                }
                "--compact" => parsed.compact = true,
                "--validate" => parsed.validate = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }
        Ok(parsed)
    }
}

fn usage() -> &'static str {
    "Usage: car-config [--output PATH] [--compact] [--validate]\n\
Writes the reference vehicle's aace.carControl configuration as JSON (default: pretty-printed to stdout).\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        CliArgs::parse(args.iter().map(OsString::from))
    }

    #[test]
    fn defaults_to_pretty_stdout() {
        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn parses_flags() {
        let args = parse(&["--compact", "--validate", "-o", "out.json"]).unwrap();
        assert!(args.compact);
        assert!(args.validate);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn rejects_repeated_output_and_unknown_flags() {
        assert!(parse(&["--output", "a", "--output", "b"]).is_err());
        assert!(parse(&["--output"]).is_err());
        assert!(parse(&["--pretty"]).is_err());
    }
}
