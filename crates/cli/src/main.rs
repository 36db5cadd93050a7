//! vitals - post job health reports and maintain a status dashboard.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the shared configuration and run one command.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Status resolution or rendering (see `crates/engine`).
//! - Talking to GitHub or git (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod commands;
mod dispatch;
mod error;

use std::time::Duration;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vitals_config::{Config, ConfigError, ConfigLoader};

fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new();

    // CLI values (which already include VITALS_* via clap) take precedence;
    // from_env only fills what is still unset, e.g. the GITHUB_TOKEN fallback.
    if let Some(ref owner) = cli.owner {
        loader = loader.with_owner(owner.clone());
    }
    if let Some(ref repo) = cli.repo {
        loader = loader.with_repo(repo.clone());
    }
    if let Some(ref token) = cli.token {
        loader = loader.with_token(token.clone());
    }
    if let Some(ref url) = cli.api_url {
        loader = loader.with_api_url(url.clone());
    }
    if let Some(ref branch) = cli.branch {
        loader = loader.with_branch(branch.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }

    loader.from_env()?.build()
}

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let exit_code = tokio::select! {
        result = run_command(cli.command, &config) => match result {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                e.exit_code()
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            ExitCode::Interrupted
        }
    };

    std::process::exit(exit_code.as_i32());
}
