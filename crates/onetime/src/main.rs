use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use onetime::{setup_manager, Config};
use serde_json::Value;
use tracing_subscriber::{filter::LevelFilter, FmtSubscriber};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue a nonce for a JSON payload and print its id
    Create { payload: String },
    /// Consume a nonce and print its JSON payload
    Use { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config)?;

    FmtSubscriber::builder()
        .with_max_level(LevelFilter::from_str(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(true)
        .init();

    let manager = setup_manager(&config).await?;

    match args.command {
        Command::Create { payload } => {
            let payload: Value =
                serde_json::from_str(&payload).wrap_err("Payload is not valid JSON")?;
            let id = manager.create(&payload).await?;
            println!("{}", id);
        }
        Command::Use { id } => {
            let payload: Value = manager.use_nonce(&id).await?;
            println!("{}", payload);
        }
    }

    Ok(())
}
