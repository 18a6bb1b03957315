//! Command-line argument handling.

use std::io::Read;
use std::path::PathBuf;

use densify_core::{DensifyConfig, Error, Result};

/// Where the document text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Flags for a densification run. Unset flags fall back to the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub input: Input,
    pub ratio: Option<f64>,
    pub iterations: Option<i64>,
    pub timeout_ms: Option<u64>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(RunOptions),
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> std::result::Result<Command, String> {
    let mut options = RunOptions {
        input: Input::Stdin,
        ratio: None,
        iterations: None,
        timeout_ms: None,
        json: false,
    };
    let mut input_seen = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => return Ok(Command::Help),
            "--json" => options.json = true,
            "--ratio" | "-r" => options.ratio = Some(parse_flag(arg, iter.next())?),
            "--iterations" | "-n" => options.iterations = Some(parse_flag(arg, iter.next())?),
            "--timeout-ms" => options.timeout_ms = Some(parse_flag(arg, iter.next())?),
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("Unknown option: {}", flag));
            }
            path => {
                if input_seen {
                    return Err(format!("Unexpected extra argument: {}", path));
                }
                input_seen = true;
                options.input = if path == "-" {
                    Input::Stdin
                } else {
                    Input::File(PathBuf::from(path))
                };
            }
        }
    }

    Ok(Command::Run(options))
}

fn parse_flag<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> std::result::Result<T, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} has an invalid value: {}", flag, value))
}

impl RunOptions {
    /// Layer flags over `base` and validate the result.
    pub fn apply(&self, mut base: DensifyConfig) -> Result<DensifyConfig> {
        if let Some(ratio) = self.ratio {
            base.ratio = ratio;
        }
        if let Some(iterations) = self.iterations {
            base.iteration_count = usize::try_from(iterations).map_err(|_| {
                Error::Configuration(format!("--iterations must be >= 0, got {}", iterations))
            })?;
        }
        if let Some(ms) = self.timeout_ms {
            base.capability_timeout_ms = Some(ms);
        }
        base.validate()?;
        Ok(base)
    }
}

/// Read the whole document.
pub fn read_input(input: &Input) -> Result<String> {
    match input {
        Input::File(path) => Ok(std::fs::read_to_string(path)?),
        Input::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

pub fn print_usage() {
    println!("densify: iteratively rewrite an extractive summary to cover more entities");
    println!();
    println!("Usage: densify [options] [FILE|-]");
    println!();
    println!("Options:");
    println!("  -r, --ratio <R>          Fraction of sentences in the initial summary (default 0.3)");
    println!("  -n, --iterations <N>     Densification passes (default 3)");
    println!("      --timeout-ms <MS>    Deadline per entity/similarity call");
    println!("      --json               Print the run as JSON");
    println!("  -h, --help               Show this help message");
    println!();
    println!("Environment: DENSIFY_RATIO, DENSIFY_ITERATIONS, DENSIFY_MAX_MISSING,");
    println!("             DENSIFY_TIMEOUT_MS, RUST_LOG");
}
