mod cli;
mod config;
mod error;
mod github;
mod mirror;
#[cfg(test)]
mod test_utils;
mod vcs;
mod workdir;

use clap::Parser;
use cli::Cli;
use config::Config;
use error::{MirrorError, Result};
use tracing_subscriber::EnvFilter;

// Everything runs in order on one thread: list, then clone/pull one repo at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args())) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    if cli.wants_help() {
        eprint!("{}", cli::usage());
        std::process::exit(2);
    }

    if let Err(e) = run(cli).await {
        if let MirrorError::Usage(msg) = &e {
            eprintln!("Error: {msg}\n");
            eprint!("{}", cli::usage());
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.overrides())?.validate()?;
    init_tracing(config.verbose);
    tracing::debug!(?config, "configuration resolved");

    mirror::run(&config).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,gh_mirror=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
