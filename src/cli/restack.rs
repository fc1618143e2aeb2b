//! Restack command - rebase PRs whose dependency has been merged

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, Overrides};
use crate::cli::report::{ReportStyle, render_report, render_summary};
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::{print, println};
use dialoguer::Confirm;
use gh_restack::error::{Error, Result};
use gh_restack::interrupt::Interrupt;
use gh_restack::restack::{ensure_clean, gather_pull_requests, restack_pull_requests};
use indicatif::ProgressBar;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

/// Options for the restack command
#[derive(Debug, Clone, Default)]
pub struct RestackCommandOptions {
    /// Prompt for confirmation before rebasing
    pub confirm: bool,
    /// Config and tool overrides from the command line
    pub overrides: Overrides,
}

/// Run the restack command
pub async fn run_restack(
    path: &Path,
    options: RestackCommandOptions,
    interrupt: &Interrupt,
) -> Result<()> {
    let ctx = CommandContext::new(path, options.overrides)?;

    // Hard precondition: nothing is fetched from a dirty working copy
    ensure_clean(ctx.repo.as_ref()).await?;

    let spinner = new_spinner("Fetching pull requests...");
    let gathered = gather_pull_requests(ctx.platform.as_ref(), ctx.repo.as_ref(), &ctx.options)
        .await
        .inspect_err(|_| spinner.finish_and_clear())?;
    spinner.finish_with_message(format!("{} Fetching pull requests...", check()));

    if gathered.pull_requests.is_empty() {
        println!("{} No open or draft pull requests found.", check());
        return Ok(());
    }
    println!(
        "{} Found {} open or draft pull requests.",
        check(),
        gathered.pull_requests.len().accent()
    );

    if interrupt.is_triggered() {
        return Err(Error::Interrupted);
    }

    if options.confirm
        && !Confirm::new()
            .with_prompt("Rebase pull requests whose dependency has been merged?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
    {
        println!("{}", "Aborted".muted());
        return Ok(());
    }

    let target_base = ctx.options.target_base(&gathered.default_branch);
    let spinner = new_spinner("Rebasing pull requests...");
    let progress = CliProgress::new(spinner.clone());
    let report = restack_pull_requests(
        gathered.pull_requests,
        ctx.platform.as_ref(),
        ctx.repo.as_ref(),
        &target_base,
        &progress,
        interrupt,
    )
    .await;
    spinner.finish_with_message(format!("{} Rebasing pull requests...", check()));

    let style = ReportStyle {
        hyperlinks: std::io::stdout().is_terminal() && supports_hyperlinks::supports_hyperlinks(),
    };
    print!("{}", render_report(&report, style));
    println!();
    println!("{}", render_summary(&report));

    if interrupt.is_triggered() {
        println!("{}", "Interrupted: remaining pull requests were skipped.".warn());
    }

    Ok(())
}

fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
