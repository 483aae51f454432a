//! # Coinnotes Desk — terminal client
//!
//! Walks the configured coin list one coin at a time, keeps the analyses in a
//! local JSON file and hands them to the backend for CSV export or Drive
//! upload.
//!
//! ```text
//!  stdin ──▶ Command::parse ──▶ Desk::execute ──▶ stdout
//!                                  │
//!               ┌──────────────────┼────────────────────┐
//!               ▼                  ▼                    ▼
//!          Cursor/Draft     AnalysisStore (json)   BackendClient ──▶ /api/*
//! ```

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod commands;
mod config;
mod cursor;
mod desk;
mod error;
mod models;
mod store;
mod token;

use commands::Command;
use config::Config;
use desk::{Desk, Reply};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("coinnotes_desk=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let config = Config::from_env().context("Failed to load desk config")?;
    info!(api = %config.api_url, data = %config.data_dir.display(), "🗒️  Coinnotes desk");

    let mut desk = Desk::open(&config);
    desk.load_coins().await;

    println!("{}", commands::HELP);
    if let Ok(Reply::Text(text)) = desk.execute(Command::Show).await {
        println!("\n{text}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        match desk.execute(command).await {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => println!("error: {e}"),
        }
    }

    info!("desk closed");
    Ok(())
}
