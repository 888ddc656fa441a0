//! `ets-parse`: convert one ETS source file to IR JSON or JavaScript.

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use config::{Emit, EtsParseConfig};
use ets_syntax::{ParseOptions, convert_source, to_javascript, to_json};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: ets-parse <source-file> <output-file>";

#[derive(Parser)]
#[command(name = "ets-parse", version, about = "Convert ETS sources to IR JSON or JavaScript")]
struct Cli {
    /// ETS source file
    source: Option<PathBuf>,

    /// Output file
    output: Option<PathBuf>,

    /// Output format (default: ir)
    #[arg(long, value_enum)]
    emit: Option<Emit>,

    /// Fail on the first syntax error
    #[arg(long)]
    strict: bool,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Extra config file, applied after global and project config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Effective settings after config layers and flags.
struct Settings {
    strict: bool,
    emit: Emit,
    pretty: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &EtsParseConfig) -> Self {
        Self {
            strict: cli.strict || config.strict(),
            emit: cli.emit.unwrap_or_else(|| config.emit()),
            pretty: !cli.compact && config.pretty(),
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("ETS_PARSE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(source: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let code = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;

    let file_name = source.display().to_string();
    let options = ParseOptions {
        strict: settings.strict,
    };
    let ir = convert_source(&code, &file_name, &options)
        .with_context(|| format!("failed to convert {file_name}"))?;

    let rendered = match settings.emit {
        Emit::Ir => to_json(&ir, settings.pretty).context("failed to serialize IR")?,
        Emit::Js => to_javascript(&ir),
    };

    std::fs::write(output, rendered)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(source = %source.display(), output = %output.display(), "wrote output");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let (Some(source), Some(output)) = (cli.source.as_deref(), cli.output.as_deref()) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    init_logging(cli.verbose);

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = EtsParseConfig::load(&root, cli.config.as_deref());
    let settings = Settings::resolve(&cli, &config);

    match run(source, output, &settings) {
        Ok(()) => eprintln!("Successfully parsed: {}", source.display()),
        Err(err) => {
            eprintln!("Error parsing file: {err}");
            eprintln!("{err:?}");
            std::process::exit(1);
        }
    }
}
