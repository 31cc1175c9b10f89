use anyhow::Result;
use ccusage_graph_core::prelude::*;
use clap::Parser;
use crossterm::style::Stylize;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod input;
mod painter;

use config::{load_config, Settings};
use input::read_input;
use painter::choose_painter;

/// Display ccusage JSON output as terminal graphs.
///
/// Usage: ccusage daily --json | ccusage-graph
#[derive(Parser, Debug)]
#[clap(author = "Red", version, about)]
pub struct Args {
    /// Graph type (bar, line)
    #[arg(short = 't', long = "type")]
    pub chart_kind: Option<ChartKind>,

    /// Time period to display (day, week, month)
    #[arg(short = 'p', long = "period", default_value = "day")]
    pub period: Period,

    /// Hide the plan threshold markers
    #[arg(long = "no-threshold")]
    pub no_threshold: bool,

    /// First threshold in USD (Pro plan)
    #[arg(long = "pro-threshold")]
    pub pro_threshold: Option<f64>,

    /// Second threshold in USD (Pro Max plan)
    #[arg(long = "max-threshold")]
    pub max_threshold: Option<f64>,

    /// Bar width in character cells
    #[arg(long = "width")]
    pub width: Option<usize>,

    /// Line chart height in rows
    #[arg(long = "height")]
    pub height: Option<usize>,

    /// Seconds to wait for the first byte on stdin
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    /// Config file (default ~/.config/ccusage-graph/config.json)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[arg(short = 'v')]
    pub verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file_config)?;
    debug!(?settings, "settings resolved");

    let input = read_input(tokio::io::stdin(), settings.timeout).await?;
    let dataset = DataLoader::new().parse_str(&input)?;

    let painter = choose_painter(args.no_color);
    let lines = Report::render(&dataset, &settings.options, painter.as_ref());

    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args).await {
        debug!(error = ?e, "run failed");
        eprintln!("{}", format!("Error: {:#}", e).red());
        // A stdin read may still be parked on the blocking pool after a
        // timeout, so leave without waiting for the runtime to wind down.
        std::process::exit(1);
    }
}
