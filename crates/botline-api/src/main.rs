//! botline CLI and webhook server entry point.
//!
//! Binary name: `botline`
//!
//! Parses CLI arguments, loads `botline.toml`, then dispatches to the
//! command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use botline_core::message::run_dispatcher;
use botline_infra::config::load_config;
use botline_infra::secret::EnvSecrets;
use botline_observe::{init_tracing, level_filter, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "botline", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(level_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Relative attachment paths resolve against the config file's directory
    let base_dir = config_dir(&cli.config);

    match cli.command {
        Commands::Serve { port, host } => {
            let config = load_config(&cli.config).await;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let (state, dispatcher) = AppState::init(&config, &EnvSecrets::new(), &base_dir)?;

            let cancel = CancellationToken::new();
            let dispatcher_task = dispatcher.map(|parts| {
                tokio::spawn(run_dispatcher(parts.handler, parts.rx, cancel.clone()))
            });

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} botline listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            if state.whatsapp.is_some() {
                println!(
                    "  {} WhatsApp webhook at {}",
                    console::style("📨").bold(),
                    console::style("/whatsapp/webhook").cyan()
                );
            }
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            cancel.cancel();
            if let Some(task) = dispatcher_task {
                let handled = task.await?;
                tracing::info!(handled, "dispatcher drained");
            }

            println!("\n  Server stopped.");
        }

        Commands::Chat { sender } => {
            let config = load_config(&cli.config).await;
            cli::chat::chat(&config, &base_dir, &sender).await?;
        }

        Commands::CheckConfig => {
            cli::check_config::check_config(&cli.config).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

fn config_dir(config: &Path) -> PathBuf {
    match config.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        assert_eq!(config_dir(Path::new("botline.toml")), PathBuf::from("."));
        assert_eq!(config_dir(Path::new("conf/botline.toml")), PathBuf::from("conf"));
    }
}
