//! Loads engine configuration files and inspects the resulting controller tables.
//!
//! Without `--key` it prints one line per indexed controller; with `--key` it
//! resolves a single `endpoint` or `endpoint#instance` key and prints the
//! controller as compact JSON. Sources come from `--config` flags, or from
//! `CARCONTROL_CONFIG_PATHS` when no flag is given.

use anyhow::{Context, Result, bail};
use carcontrol::runtime::{config_paths_from_env, init_tracing, open_sources};
use carcontrol::{
    CarControlDataProvider, ConfigOrigin, ControllerKey, ControllerRef, LoadOptions,
    LoadReport,
};
use serde_json::{Value, json};
use std::env;
use std::path::PathBuf;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = CliArgs::parse(env::args_os().skip(1))?;
    if args.configs.is_empty() {
        args.configs = config_paths_from_env();
    }

    let mut files = open_sources(&args.configs)?;
    let mut provider = CarControlDataProvider::with_options(LoadOptions {
        validate_schema: args.validate,
    });
    let report = if args.generate_fallback {
        provider.initialize_or_generate(files.iter_mut())
    } else {
        provider.initialize(files.iter_mut())
    }
    .context("loading car-control configuration")?;

    for skipped in &report.skipped {
        let path = args
            .configs
            .get(skipped.index)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        eprintln!("skipped {path}: {}", skipped.reason);
    }

    match &args.key {
        Some(raw) => {
            let key = ControllerKey::parse(raw);
            let Some(found) = provider.registry().find(&key) else {
                bail!("no controller registered for {key}");
            };
            println!("{}", serde_json::to_string(&describe(&key, found))?);
        }
        None => {
            println!("{}", origin_line(&report, &args.configs));
            for line in summary_lines(&provider) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn origin_line(report: &LoadReport, configs: &[PathBuf]) -> String {
    match report.origin {
        ConfigOrigin::Source(index) => {
            let path = configs
                .get(index)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("#{index}"));
            format!("origin: {path}")
        }
        ConfigOrigin::Generated => "origin: generated reference vehicle".to_string(),
        ConfigOrigin::NotFound => "origin: none (no aace.carControl block found)".to_string(),
    }
}

fn summary_lines(provider: &CarControlDataProvider) -> Vec<String> {
    let registry = provider.registry();
    let mut lines = Vec::new();
    for (key, controller) in registry.bools() {
        lines.push(format!("bool   {key} = {}", controller.value()));
    }
    for (key, controller) in registry.modes() {
        lines.push(format!(
            "mode   {key} [{}] = {}",
            controller.modes().join(", "),
            controller.mode().unwrap_or("-")
        ));
    }
    for (key, controller) in registry.ranges() {
        lines.push(format!(
            "range  {key} [{}, {}] = {}",
            controller.minimum(),
            controller.maximum(),
            controller.value()
        ));
    }
    lines
}

fn describe(key: &ControllerKey, found: ControllerRef<'_>) -> Value {
    match found {
        ControllerRef::Bool(controller) => json!({
            "key": key.to_string(),
            "kind": "bool",
            "value": controller.value(),
        }),
        ControllerRef::Mode(controller) => json!({
            "key": key.to_string(),
            "kind": "mode",
            "modes": controller.modes(),
            "value": controller.mode(),
        }),
        ControllerRef::Range(controller) => json!({
            "key": key.to_string(),
            "kind": "range",
            "minimum": controller.minimum(),
            "maximum": controller.maximum(),
            "value": controller.value(),
        }),
    }
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    configs: Vec<PathBuf>,
    key: Option<String>,
    generate_fallback: bool,
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
                "--config" | "-c" => {
                    let path = next_value(&mut args, "--config")?;
                    parsed.configs.push(PathBuf::from(path));
                }
                "--key" | "-k" => {
                    if parsed.key.is_some() {
                        bail!("--key may only be provided once");
                    }
                    let raw = next_value(&mut args, "--key")?;
                    if raw.trim().is_empty() {
                        bail!("--key must not be empty");
                    }
                    parsed.key = Some(raw);
                }
                "--generate-fallback" => parsed.generate_fallback = true,
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

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: car-lookup [--config PATH]... [--generate-fallback] [--validate] [--key ENDPOINT[#INSTANCE]]\n\
Loads the first aace.carControl block from the given engine configuration files (default: $CARCONTROL_CONFIG_PATHS)\n\
and prints the indexed controllers, or the single controller named by --key as JSON.\n"
}
