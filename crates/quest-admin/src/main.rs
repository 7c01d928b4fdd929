/*
[INPUT]:  CLI arguments, YAML configuration file, quest manifests, OS shutdown signals
[OUTPUT]: Quests created, edited and published; analytics and exports
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or shutdown handling
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quest_admin::AdminConfig;
use quest_admin::download::ExportKind;

#[derive(Parser, Debug)]
#[command(name = "quest-admin", version, about = "Quest administration console")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a quest manifest interactively
    Init {
        #[arg(long, short, value_name = "PATH", default_value = "quest.yaml")]
        output: PathBuf,
    },
    /// Create a quest from a manifest
    Create {
        #[arg(long, value_name = "PATH")]
        manifest: PathBuf,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Edit a quest; prints its manifest when none is given
    Edit {
        #[arg(long = "quest-id")]
        quest_id: i64,
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Enable or disable a quest for launch
    Publish {
        #[arg(long = "quest-id")]
        quest_id: i64,
        #[arg(long)]
        disable: bool,
    },
    /// Show quest analytics, or list quests when no id is given
    Analytics {
        #[arg(long = "quest-id")]
        quest_id: Option<i64>,
    },
    /// Download participants, users or boost winners as JSON
    Download {
        #[arg(value_enum)]
        export: ExportArg,
        #[arg(long)]
        id: i64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportArg {
    Participants,
    Users,
    Winners,
}

impl From<ExportArg> for ExportKind {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Participants => ExportKind::QuestParticipants,
            ExportArg::Users => ExportKind::QuestUsers,
            ExportArg::Winners => ExportKind::BoostWinners,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = args.config_path.as_ref().map(load_config).transpose()?;
    if let Some(path) = &args.config_path {
        info!(config_path = %path.display(), "configuration loaded");
    }

    match args.command {
        Command::Init { output } => cli::init::run_init(output),
        Command::Create { manifest, dry_run } => {
            cli::commands::run_create(config, &manifest, dry_run).await
        }
        Command::Edit {
            quest_id,
            manifest,
            dry_run,
        } => {
            cli::commands::run_edit(
                config.unwrap_or_default(),
                quest_id,
                manifest.as_deref(),
                dry_run,
            )
            .await
        }
        Command::Publish { quest_id, disable } => {
            cli::commands::run_publish(config.unwrap_or_default(), quest_id, disable).await
        }
        Command::Analytics { quest_id } => {
            cli::commands::run_analytics(config.unwrap_or_default(), quest_id).await
        }
        Command::Download { export, id } => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            cli::commands::run_download(config.unwrap_or_default(), export.into(), id, shutdown)
                .await
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<AdminConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    AdminConfig::from_file(path_str).context("load config")
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
