//! `dao` — replays token-weighted governance scenarios.

mod config;
mod logging;
mod scenario;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::config::CliConfig;
use crate::logging::{init_logging, LogFormat};
use crate::scenario::{Runner, Scenario};

#[derive(Parser)]
#[command(name = "dao", about = "Token-weighted governance scenario runner")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "DAO_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DAO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, env = "DAO_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Voting window length in seconds.
    #[arg(long, env = "DAO_VOTING_PERIOD")]
    voting_period: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a scenario file, printing one JSON report per step.
    Run {
        scenario: PathBuf,

        /// Stop at the first rejected step.
        #[arg(long)]
        fail_fast: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CliConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(secs) = cli.voting_period {
        config.governance.voting_period_secs = secs;
    }

    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Run {
            scenario,
            fail_fast,
        } => {
            let scenario = Scenario::from_toml_file(&scenario)?;
            let mut runner = Runner::new(&config);
            let stdout = std::io::stdout();
            let failures = runner.run(&scenario, &mut stdout.lock(), fail_fast)?;
            tracing::info!(
                proposals = runner.registry().proposal_count(),
                clock = %runner.now(),
                "run complete"
            );
            if fail_fast && failures > 0 {
                anyhow::bail!("scenario stopped after a rejected step");
            }
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}
