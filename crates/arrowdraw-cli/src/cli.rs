use std::io::Write;
use std::path::{Path, PathBuf};

use arrowdraw_core::SearchStrategy;
use arrowdraw_runtime::{PassReport, ReactiveRecalculator, RecalcConfig};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};
use crate::scene::Scene;

/// Exit code for `check` when at least one arrow fails.
pub const EXIT_ARROWS_FAILED: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "arrowdraw",
    about = "Resolve connector geometry between rectangles in a scene file",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one pass over a scene and print the report as JSON.
    Resolve {
        /// Scene file (JSON).
        #[arg(long)]
        scene: PathBuf,
        /// Recalculation settings (`.toml` or JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the closest-point search strategy.
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Pretty-print the JSON report.
        #[arg(long)]
        pretty: bool,
    },

    /// Exit non-zero when any arrow in the scene fails to resolve.
    Check {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Exhaustive,
    Pruned,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Exhaustive => Self::Exhaustive,
            StrategyArg::Pruned => Self::Pruned,
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

pub fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Resolve {
            scene,
            config,
            strategy,
            pretty,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(strategy) = strategy {
                config = config.with_search(strategy.into());
            }
            let report = resolve_scene(&scene, config)?;
            if pretty {
                serde_json::to_writer_pretty(&mut *out, &report)?;
            } else {
                serde_json::to_writer(&mut *out, &report)?;
            }
            writeln!(out)?;
            Ok(())
        }
        Commands::Check { scene, config } => {
            let report = resolve_scene(&scene, load_config(config.as_deref())?)?;
            let total = report.outcomes.len();
            let failures: Vec<String> = report.failures().map(ToString::to_string).collect();
            if failures.is_empty() {
                writeln!(out, "ok: {total} arrows resolved")?;
                return Ok(());
            }
            for failure in &failures {
                writeln!(out, "{failure}")?;
            }
            Err(CliError::exit(
                EXIT_ARROWS_FAILED,
                format!("{} of {total} arrows failed", failures.len()),
            ))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RecalcConfig> {
    match path {
        Some(path) => Ok(RecalcConfig::from_file(path)?),
        None => Ok(RecalcConfig::default()),
    }
}

fn resolve_scene(path: &Path, config: RecalcConfig) -> Result<PassReport> {
    let document = Scene::from_file(path)?.into_document()?;
    debug!(scene = %path.display(), search = ?config.search, "Resolving scene");
    let recalc = ReactiveRecalculator::new(document.host(), config)?;
    recalc
        .recompute_all()
        .ok_or_else(|| CliError::exit(1, "recalculation pass did not run"))
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
