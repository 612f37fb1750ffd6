//! commitgen - CLI entry point and pipeline orchestration.
//!
//! The pipeline is strictly sequential: fetch diff, assess risk, build
//! context, classify size, generate or synthesize a message, gate, emit,
//! optionally write. Every failure is terminal; only this file decides
//! exit codes (0 success, 1 failure, 2 risk abort).

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use git2::Repository;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use commitgen::config;
use commitgen::context::Context;
use commitgen::format::{self, Style};
use commitgen::git;
use commitgen::groups::suggest_commit_groups;
use commitgen::llm;
use commitgen::redact;
use commitgen::risk;

/// Exit status for a risk-threshold abort under --risk-check.
const EXIT_RISK: u8 = 2;

/// Generate commit messages from git diffs.
#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(about = "Generate commit messages from git diffs, with risk screening")]
#[command(version)]
struct Cli {
    /// Your purpose/intent for these changes (e.g. "rework the parser")
    purpose: Option<String>,

    /// Write the commit to git
    #[arg(short, long)]
    write: bool,

    /// Commit style
    #[arg(short, long, value_enum, default_value = "conventional")]
    style: Style,

    /// Generate a PR title and summary as well
    #[arg(long)]
    pr: bool,

    /// Show rationale and cost estimate on stderr
    #[arg(short, long)]
    explain: bool,

    /// Exit with code 2 if the risk score reaches the threshold
    #[arg(long)]
    risk_check: bool,

    /// Git range to analyze instead of the staged diff (A..B, or REV for REV..HEAD)
    #[arg(short, long)]
    range: Option<String>,

    /// Use the offline heuristic formatter only (no generation call)
    #[arg(long)]
    no_llm: bool,

    /// Maximum generation cost in dollars
    #[arg(long)]
    max_cost: Option<f64>,

    /// Suggest how to split a large diff into multiple focused commits
    #[arg(long)]
    suggest_groups: bool,

    /// Force writing even for very large diffs (not recommended)
    #[arg(long)]
    force_write: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    config::load_env_file();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let repo = Repository::open(".")
        .context("Not a git repository. Run commitgen from within a git repository.")?;

    // Diff source: staged index, or a user-specified range.
    let collected = match &cli.range {
        Some(spec) => git::range_diff(&repo, spec),
        None => git::staged_diff(&repo),
    }
    .context("Git command failed")?;

    if collected.text.trim().is_empty() {
        eprintln!("No diff to summarize.");
        return Ok(ExitCode::FAILURE);
    }

    // Risk assessment runs on the unredacted diff for accuracy.
    let risk = risk::assess(&collected.text);
    if cli.risk_check && risk.score >= risk::HIGH_RISK_THRESHOLD {
        eprintln!("{}", risk.report);
        return Ok(ExitCode::from(EXIT_RISK));
    }

    let redacted = redact::scrub(&collected.text);
    let ctx = Context::gather(&repo, redacted, collected.files, cli.purpose.clone());

    let max_cost = cli.max_cost.unwrap_or_else(config::max_cost_default);
    let estimated_tokens = redact::estimate_tokens(&ctx.diff);
    let too_large = redact::is_diff_too_large(&ctx.diff);

    let mut use_llm = llm::have_llm() && !cli.no_llm;
    if too_large && !cli.no_llm {
        if cli.explain {
            eprintln!(
                "[explain] Large diff detected ({estimated_tokens} tokens). Using offline mode for reliability."
            );
            eprintln!("[explain] Use '--suggest-groups' to split into multiple focused commits.");
        }
        use_llm = false;
    }

    let (subject, body, pr_title, pr_summary) = if use_llm {
        let backend = llm::ClaudeCli;
        let (out, rationale, cost) =
            llm::summarize_diff(&ctx, cli.style, cli.pr, max_cost, &backend)
                .await
                .context("Generation failed")?;
        if cli.explain {
            eprintln!("[explain] ${cost:.4} :: {rationale}");
        }
        let (subject, body) = format::enforce_limits(&out.subject, out.body.as_deref());
        (subject, body, out.pr_title, out.pr_summary)
    } else {
        let raw = format::offline_subject(&ctx, cli.style);
        let (subject, body) = format::enforce_limits(&raw, None);
        (subject, body, None, None)
    };

    // Advisory branch: suggest a split instead of emitting a message.
    if cli.suggest_groups && too_large {
        print_group_suggestions(&ctx.diff, estimated_tokens);
        return Ok(ExitCode::SUCCESS);
    }

    if subject.trim().is_empty() {
        eprintln!("Error: no commit subject generated");
        return Ok(ExitCode::FAILURE);
    }

    // Refuse to write an overly generic message for a very large diff.
    let very_large = estimated_tokens > redact::VERY_LARGE_TOKENS;
    if very_large && format::is_poor_subject(&subject) && cli.write && !cli.force_write {
        eprintln!(
            "[WARNING] Refusing to write commit for very large diff ({estimated_tokens} tokens)."
        );
        eprintln!();
        eprintln!("The generated message '{subject}' is too generic for such a large change.");
        eprintln!();
        eprintln!("[HELP] Recommended actions:");
        eprintln!("  1. Use --suggest-groups to split into focused commits");
        eprintln!("  2. Use --explain to see what's happening");
        eprintln!("  3. Use --force-write if you really want this message");
        return Ok(ExitCode::FAILURE);
    }

    println!("{subject}");
    if let Some(body) = &body {
        println!("\n{body}");
    }
    if cli.pr && let Some(title) = &pr_title {
        println!(
            "\nPR_TITLE: {title}\nPR_SUMMARY:\n{}",
            pr_summary.as_deref().unwrap_or("")
        );
    }

    if cli.write {
        let message = match &body {
            Some(b) => format!("{subject}\n\n{b}"),
            None => subject.clone(),
        };
        // Best-effort: a failed write is a warning, not a distinct status.
        match git::commit_index(&repo, &message) {
            Ok(oid) => eprintln!("Committed {}", short_id(oid)),
            Err(e) => warn!("commit failed: {e}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the commit-group advisory for an oversized diff to stderr.
fn print_group_suggestions(diff: &str, total_tokens: usize) {
    let groups = suggest_commit_groups(diff);

    eprintln!("[INFO] Large diff detected ({total_tokens} tokens). Suggested commit groups:");
    eprintln!();
    for (i, group) in groups.iter().enumerate() {
        let tokens = redact::estimate_tokens(&group.diff);
        eprintln!("Group {} ({tokens} tokens):", i + 1);
        eprintln!("  Files: {}", group.files.join(", "));
        eprintln!();
    }

    eprintln!("[HELP] To commit each group separately:");
    eprintln!("  1. git reset HEAD~  # Unstage all changes");
    eprintln!("  2. Stage files for each group: git add <files>");
    eprintln!("  3. Run commitgen for each group");
    eprintln!();
    eprintln!("[TIP] Large commits like this ({total_tokens} tokens) make code review harder");
    eprintln!("      and can hide important changes. Consider making smaller, focused");
    eprintln!("      commits as you work.");
}

fn short_id(oid: git2::Oid) -> String {
    oid.to_string().chars().take(8).collect()
}
