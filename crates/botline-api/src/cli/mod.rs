//! CLI command definitions for the `botline` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod check_config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use botline_infra::config::DEFAULT_CONFIG_FILE;

/// Rule-based chat auto-responder with a completion-API fallback.
#[derive(Parser)]
#[command(name = "botline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, global = true, env = "BOTLINE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the webhook server.
    Serve {
        /// Port to listen on (overrides `server.port`).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Talk to the conversation handler from the terminal.
    Chat {
        /// Sender identifier used for the session.
        #[arg(long, default_value = "console-user")]
        sender: String,
    },

    /// Print the effective configuration.
    CheckConfig,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
