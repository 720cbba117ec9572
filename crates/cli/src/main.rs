//! `netgenius` command-line entry point.

mod commands;
mod render;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use ng_core::config::{load_config, AppConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "netgenius",
    version,
    about = "Network operations assistant: turns requests into automation scripts and answers"
)]
struct Cli {
    /// Project directory containing `.netgenius/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Override the configured model (`mock` runs offline).
    #[arg(long, global = true)]
    model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive chat UI (default).
    Tui,
    /// Run one request through the pipeline and print the transcript.
    Ask {
        /// Use the autonomous agent instead of the script generator.
        #[arg(long)]
        agent: bool,
        /// Run the generated script through the execution simulator.
        #[arg(long)]
        execute: bool,
        /// Print the transcript as JSON.
        #[arg(long)]
        json: bool,
        /// The request, e.g. "show interface status on 10.0.0.1".
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Find root causes in device logs.
    Logs { file: PathBuf },
    /// Security audit of a device configuration.
    Audit { file: PathBuf },
    /// Threat analysis of a packet capture summary.
    Pcap { file: PathBuf },
    /// Operational impact of a configuration change.
    Diff { old: PathBuf, new: PathBuf },
    /// Create `.netgenius/` with the default configuration and prompts.
    Init {
        /// Overwrite an existing `.netgenius/` directory.
        #[arg(long)]
        force: bool,
        /// Write only config.toml.
        #[arg(long)]
        minimal: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Command::Tui);
    if !matches!(command, Command::Tui) {
        init_stderr_logging(cli.verbose);
    }

    match command {
        Command::Tui => {
            let config = configure(&cli.root, cli.model.as_deref()).await?;
            launch_tui(&cli.root, config).await.map_err(|e| eyre!(e))
        }
        Command::Init { force, minimal } => commands::init::run(&cli.root, force, minimal).await,
        Command::Ask {
            agent,
            execute,
            json,
            text,
        } => {
            let config = configure(&cli.root, cli.model.as_deref()).await?;
            let options = commands::ask::AskOptions {
                agent,
                execute,
                json,
            };
            commands::ask::run(config, &text.join(" "), options).await
        }
        Command::Logs { file } => {
            let config = configure(&cli.root, cli.model.as_deref()).await?;
            commands::analyze::logs(config, &file).await
        }
        Command::Audit { file } => {
            let config = configure(&cli.root, cli.model.as_deref()).await?;
            commands::analyze::audit(config, &file).await
        }
        Command::Pcap { file } => {
            let config = configure(&cli.root, cli.model.as_deref()).await?;
            commands::analyze::capture(config, &file).await
        }
        Command::Diff { old, new } => {
            let config = configure(&cli.root, cli.model.as_deref()).await?;
            commands::analyze::diff(config, &old, &new).await
        }
    }
}

/// Load `.netgenius/` under `root` and apply the `--model` override.
async fn configure(root: &Path, model: Option<&str>) -> Result<AppConfig> {
    let config = load_config(root).await?;
    Ok(match model {
        Some(model) => config.with_model(model),
        None => config,
    })
}

/// The UI owns the terminal, so its logs go to a file.
async fn launch_tui(root: &Path, config: AppConfig) -> anyhow::Result<()> {
    let _log_guard = ng_tui::logging::init_file_logging(&ng_tui::logging::default_log_dir(root))?;
    ng_tui::run_app(config).await
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_stderr_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
