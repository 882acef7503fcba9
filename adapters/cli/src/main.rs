#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Garden Defence over stdin and stdout.

mod command;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use garden_defence_core::GameConfig;
use garden_defence_rendering::{JsonBackend, RenderingBackend, Reply, TextBackend};
use garden_defence_session::{SessionId, SessionRegistry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::command::PlayerCommand;

/// Command-line arguments accepted by the Garden Defence binary.
#[derive(Debug, Parser)]
#[command(name = "garden-defence", about = "Defend the lawn from the command line")]
struct CliArgs {
    /// TOML file overriding the default tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for picking invader lanes, overriding the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// Print one JSON object per reply instead of text.
    #[arg(long)]
    json: bool,
    /// Session the commands are played under.
    #[arg(long, default_value = "local")]
    session: String,
}

/// Entry point for the Garden Defence command-line interface.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref(), args.seed)?;

    let mut backend: Box<dyn RenderingBackend> = if args.json {
        Box::new(JsonBackend::new(io::stdout()))
    } else {
        Box::new(TextBackend::new(io::stdout()))
    };

    let registry = SessionRegistry::new(config).context("invalid game configuration")?;
    let session = SessionId::new(args.session);
    for reply in execute(&registry, &session, PlayerCommand::New).await? {
        backend.present(&reply)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let replies = match PlayerCommand::parse(&line) {
            Ok(None) => continue,
            Ok(Some(PlayerCommand::Quit)) => break,
            Ok(Some(command)) => execute(&registry, &session, command).await?,
            Err(error) => {
                let mut replies = vec![Reply::Notice {
                    message: error.to_string(),
                }];
                replies.extend(execute(&registry, &session, PlayerCommand::Help).await?);
                replies
            }
        };
        for reply in &replies {
            backend.present(reply)?;
        }
    }

    let _ = registry.end(&session).await;
    info!("goodbye");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str::<GameConfig>(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

async fn execute(
    registry: &SessionRegistry,
    id: &SessionId,
    command: PlayerCommand,
) -> Result<Vec<Reply>> {
    let reply = match command {
        PlayerCommand::New => {
            let session = registry.new_game(id.clone()).await?;
            let state = session.state().await?;
            Reply::Welcome { stock: state.stock }
        }
        PlayerCommand::Reset => {
            let state = registry.get(id).await?.reset().await?;
            Reply::Welcome { stock: state.stock }
        }
        PlayerCommand::Plant { key, row, column } => {
            let outcome = registry.get(id).await?.plant(key, row, column).await?;
            Reply::Outcome {
                success: outcome.success,
                message: outcome.message,
            }
        }
        PlayerCommand::Collect => {
            let session = registry.get(id).await?;
            let amount = session.collect_resources().await?;
            let state = session.state().await?;
            Reply::Collected {
                amount,
                stock: state.stock,
            }
        }
        PlayerCommand::Wave => {
            let outcome = registry.get(id).await?.start_wave().await?;
            Reply::Outcome {
                success: outcome.success,
                message: outcome.message,
            }
        }
        PlayerCommand::Status => Reply::Status(registry.get(id).await?.state().await?),
        PlayerCommand::Help => {
            let state = registry.get(id).await?.state().await?;
            Reply::Help {
                stock: state.stock,
                wave: state.wave,
            }
        }
        PlayerCommand::Quit => return Ok(Vec::new()),
    };
    Ok(vec![reply])
}
