//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Launch a RunPod GPU desktop and tear it down when you're done
#[derive(Parser)]
#[command(name = "podlaunch", version, propagate_version = true)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `launch`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a pod, open its desktop, and delete it when the session ends
    Launch(commands::launch::LaunchArgs),

    /// Show account balance and estimated runtime
    Balance(KeyArgs),

    /// Delete a pod by ID (manual cleanup)
    Terminate(commands::terminate::TerminateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Credential flags shared by commands that call the API.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Ignore the environment and saved key, prompt for a new one
    #[arg(long)]
    pub new_key: bool,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            quiet,
            no_color,
            command,
            ..
        } = self;
        let app = AppContext::new(&AppFlags { no_color, quiet });

        match command.unwrap_or_else(|| Command::Launch(commands::launch::LaunchArgs::default())) {
            Command::Launch(args) => commands::launch::run(&app, args).await,
            Command::Balance(args) => commands::balance::run(&app, args.new_key).await,
            Command::Terminate(args) => commands::terminate::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version { json } => commands::version::run(&app, json),
        }
    }
}
