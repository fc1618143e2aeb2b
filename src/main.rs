//! gh-restack CLI entry point

mod cli;

use anstream::eprintln;
use anyhow::{Context, bail};
use clap::Parser;
use cli::context::Overrides;
use cli::restack::{RestackCommandOptions, run_restack};
use cli::style::{Stylize, cross};
use gh_restack::error::Error;
use gh_restack::interrupt::Interrupt;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Rebase your open pull requests onto the dependencies they declare.
///
/// A PR whose description contains `Depends on: #123` is rebased onto the
/// default branch once #123 has been merged, dropping the commits it shared
/// with #123.
#[derive(Parser, Debug)]
#[command(name = "gh-restack", version, about, long_about)]
struct Cli {
    /// Path to the repository (defaults to the current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Config file (defaults to <config dir>/gh-restack/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Remote holding the default branch [default: origin]
    #[arg(long)]
    remote: Option<String>,

    /// Restack PRs authored by this login [default: @me]
    #[arg(long)]
    author: Option<String>,

    /// Path to the git executable
    #[arg(long, value_name = "PATH")]
    git_path: Option<PathBuf>,

    /// Path to the gh executable
    #[arg(long, value_name = "PATH")]
    gh_path: Option<PathBuf>,

    /// Ask for confirmation before rebasing
    #[arg(long)]
    confirm: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(Error::DirtyWorkingCopy) => eprintln!("{} {err}", cross()),
                _ => eprintln!("{} {err:#}", "error:".error()),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let path = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("failed to read the current directory")?,
    };
    if !path.is_dir() {
        bail!("{} is not a directory", path.display());
    }

    let interrupt = Interrupt::new();
    interrupt.listen();

    let options = RestackCommandOptions {
        confirm: cli.confirm,
        overrides: Overrides {
            config: cli.config,
            remote: cli.remote,
            author: cli.author,
            git_path: cli.git_path,
            gh_path: cli.gh_path,
        },
    };

    run_restack(&path, options, &interrupt).await?;
    Ok(())
}
