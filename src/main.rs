//! `imagetest` CLI - print an inline image escape sequence for a terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imagetest::image::{DEFAULT_IMAGE_PATH, DEFAULT_MIME};
use imagetest::sequence::{Coords, PositionArg};
use imagetest::{Config, Emitter, Fixture};

/// Print an inline image escape sequence to check how a terminal renders it.
#[derive(Parser, Debug)]
#[command(name = "imagetest")]
#[command(version, about, long_about = None)]
struct Args {
    /// Image file to embed.
    #[arg(value_name = "INPUT", default_value = DEFAULT_IMAGE_PATH)]
    input: PathBuf,

    /// Escape sequence to emit.
    #[arg(short, long, value_enum, default_value_t = Fixture::Natty)]
    fixture: Fixture,

    /// MIME type announced to the terminal.
    #[arg(short, long, default_value = DEFAULT_MIME, value_name = "TYPE")]
    mime: String,

    /// Detect the MIME type from the file contents, falling back to --mime.
    #[arg(long)]
    detect_mime: bool,

    /// Width in cells (put-image fixtures).
    #[arg(long, value_name = "INT")]
    width: Option<u32>,

    /// Height in cells (put-image fixtures).
    #[arg(long, value_name = "INT")]
    height: Option<u32>,

    /// How the image fills its cells (put-image fixtures).
    #[arg(long, value_enum)]
    position: Option<PositionArg>,

    /// Place the image at column,row instead of the cursor (put-image fixtures).
    #[arg(long, value_name = "X,Y", value_parser = parse_coords)]
    at: Option<Coords>,

    /// Environment variable that must match before raw natty bytes are printed.
    #[arg(long, default_value = "TERM", value_name = "VAR")]
    gate_var: String,

    /// Value the gate variable must equal.
    #[arg(long, default_value = "natty", value_name = "VALUE")]
    gate_value: String,

    /// Print the natty sequence even if the gate does not match.
    #[arg(long)]
    force: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_coords(s: &str) -> std::result::Result<Coords, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse::<u32>().map_err(|e| format!("bad column {x:?}: {e}"))?;
    let y = y.trim().parse::<u32>().map_err(|e| format!("bad row {y:?}: {e}"))?;
    Ok(Coords { x, y })
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the sequence
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imagetest={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    let config = Config {
        fixture: args.fixture,
        image_path: args.input,
        mime: args.mime,
        detect_mime: args.detect_mime,
        gate_var: args.gate_var,
        gate_value: args.gate_value,
        force: args.force,
        width: args.width,
        height: args.height,
        position: args.position.map(Into::into),
        at: args.at,
    };

    let emitter = Emitter::new(config).context("Invalid configuration")?;

    emitter
        .run(&mut std::io::stdout().lock())
        .with_context(|| format!("Failed to emit {:?} fixture", args.fixture))?;

    Ok(())
}
