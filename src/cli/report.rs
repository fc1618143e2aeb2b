//! Restack report rendering

use crate::cli::style::Stylize;
use gh_restack::restack::{ProcessedPr, RestackReport};
use gh_restack::types::{PrState, PullRequest};
use owo_colors::OwoColorize;
use std::fmt::Write;
use terminal_link::Link;

/// Rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStyle {
    /// Render PR numbers as terminal hyperlinks
    pub hyperlinks: bool,
}

/// Render both partitions of the report
pub fn render_report(report: &RestackReport, style: ReportStyle) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "Rebased pull requests".emphasis());
    let mut any = false;
    for outcome in report.rebased() {
        any = true;
        render_rebased(&mut out, outcome, style);
    }
    if !any {
        let _ = writeln!(out, "  {}", "none".muted());
    }

    let _ = writeln!(out, "\n{}", "Pull requests not rebased".emphasis());
    any = false;
    for outcome in report.not_rebased() {
        any = true;
        render_not_rebased(&mut out, outcome, style);
    }
    if !any {
        let _ = writeln!(out, "  {}", "none".muted());
    }

    out
}

/// One-line summary of the run
pub fn render_summary(report: &RestackReport) -> String {
    let rebased = report.rebased().count();
    let failed = report.error_count();
    let interrupted = report.interrupted_count();
    let skipped = report.len() - rebased - failed - interrupted;
    let mut summary = format!(
        "{} rebased, {} without dependency, {} failed",
        rebased.accent(),
        skipped.accent(),
        if failed > 0 {
            failed.error()
        } else {
            failed.accent()
        }
    );
    if interrupted > 0 {
        let _ = write!(summary, ", {} interrupted", interrupted.warn());
    }
    summary
}

fn render_rebased(out: &mut String, outcome: &ProcessedPr, style: ReportStyle) {
    let pr = outcome.pr();
    let _ = writeln!(out, "  {} ← {}", pr.base_ref, pr.head_ref);
    let _ = writeln!(
        out,
        "    └─ {} {}",
        paint_by_state(pr, &pr_label(pr, style)),
        pr.html_url
    );
    if let Some(dependency) = outcome.dependency() {
        let _ = writeln!(
            out,
            "       └─ {} {}",
            paint_by_state(dependency, &pr_label(dependency, style)),
            dependency.html_url
        );
    }
}

fn render_not_rebased(out: &mut String, outcome: &ProcessedPr, style: ReportStyle) {
    let pr = outcome.pr();
    let label = pr_label(pr, style);
    let label = if pr.is_draft {
        label.muted()
    } else {
        label.success()
    };
    let _ = writeln!(out, "  {} ← {}", pr.base_ref, pr.head_ref);
    let _ = writeln!(out, "    └─ {label} {}", pr.html_url);

    if let Some(failure) = outcome.failure() {
        let message = failure.to_string();
        let message = if failure.is_error() {
            message.error()
        } else {
            message.warn()
        };
        let _ = writeln!(out, "             {message}");
    }
}

/// `#12  ` padded to the original column width, optionally hyperlinked
fn pr_label(pr: &PullRequest, style: ReportStyle) -> String {
    let text = format!("#{:<4}", pr.number);
    if style.hyperlinks {
        Link::new(&text, &pr.html_url).to_string()
    } else {
        text
    }
}

fn paint_by_state(pr: &PullRequest, text: &str) -> String {
    match pr.state {
        PrState::Open if pr.is_draft => text.bright_black().to_string(),
        PrState::Open => text.green().to_string(),
        PrState::Merged => text.magenta().to_string(),
        PrState::Closed => text.red().to_string(),
    }
}
