//! podlaunch - launch a RunPod GPU desktop and tear it down when you're done

use std::process::ExitCode;

use clap::Parser;
use podlaunch_cli::cli::Cli;
use podlaunch_cli::output::write_line;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            write_line(&mut std::io::stderr().lock(), format_args!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
