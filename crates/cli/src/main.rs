//! panelctl entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags and `EASYPANEL_*` environment variables
//!    become a validated [`easypanel::EndpointConfig`].
//! 2. **Wire observability**: install the only `tracing-subscriber` in the
//!    workspace, filtered by `RUST_LOG` (default `warn`), optionally as JSON.
//!    Every span and event emitted by the library crates flows through it.
//! 3. **Handle shutdown**: Ctrl-C cancels a shared token; a second Ctrl-C
//!    exits immediately.
//! 4. **Dispatch** the selected command.

mod args;
mod commands;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use clap::Parser;
use easypanel::Client;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn spawn_shutdown_listener(token: CancellationToken) {
    let hits = Arc::new(AtomicUsize::new(0));
    tokio::spawn(async move {
        loop {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            match hits.fetch_add(1, Ordering::Relaxed) {
                0 => {
                    tracing::info!("interrupt received, shutting down");
                    token.cancel();
                }
                _ => {
                    eprintln!("Force exiting.");
                    std::process::exit(130);
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let cancel = CancellationToken::new();
    spawn_shutdown_listener(cancel.clone());

    let client = Client::new(cli.connection.config()?)?;
    if cli.command.is_streaming() {
        return commands::run(&client, cli.command, cancel).await;
    }

    // Request/response commands are abandoned mid-call once interrupted.
    let run = commands::run(&client, cli.command, cancel.clone());
    tokio::select! {
        result = run => result,
        _ = cancel.cancelled() => {
            tracing::warn!("interrupted");
            Ok(())
        }
    }
}
