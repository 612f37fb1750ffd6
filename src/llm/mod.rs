//! Generated commit messages via an external text-generation backend.
//!
//! One attempt, bounded timeout, enforced cost ceiling. When the backend is
//! unavailable or the diff is too large the caller skips this path entirely
//! and uses the offline formatter instead; nothing here retries or falls
//! back on its own.

pub mod json;
pub mod prompt;
pub mod subprocess;

pub use json::extract_json;
pub use prompt::build_prompt;
pub use subprocess::{have_llm, run_claude};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::context::Context;
use crate::error::GenerateError;
use crate::format::Style;
use crate::redact::estimate_tokens;

/// Flat per-1K-token rate used for the cost ceiling and the reported cost.
const COST_PER_1K_TOKENS: f64 = 0.003;

/// Completion allowance added to the prompt estimate when costing a call.
const EXPECTED_COMPLETION_TOKENS: usize = 300;

/// Structured output of one generation. Produced once per invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitOutput {
    pub subject: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub pr_title: Option<String>,
    #[serde(default)]
    pub pr_summary: Option<String>,
}

/// Text-generation backend seam; mockable in tests.
#[async_trait]
pub trait Generate {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// The Claude Code CLI backend.
pub struct ClaudeCli;

#[async_trait]
impl Generate for ClaudeCli {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        run_claude(prompt).await
    }
}

/// Claude CLI JSON envelope when using `--output-format json`.
#[derive(Deserialize)]
struct CliEnvelope {
    result: String,
    #[serde(default)]
    is_error: bool,
}

/// Estimated dollar cost of a generation call for the given prompt.
pub fn estimate_cost(prompt: &str) -> f64 {
    let tokens = estimate_tokens(prompt) + EXPECTED_COMPLETION_TOKENS;
    tokens as f64 / 1000.0 * COST_PER_1K_TOKENS
}

/// Generate a structured commit message from the run context.
///
/// Enforces `max_cost` before the call is attempted. Returns the parsed
/// output, a rationale string for `--explain`, and the cost incurred.
pub async fn summarize_diff<G: Generate + ?Sized>(
    ctx: &Context,
    style: Style,
    want_pr: bool,
    max_cost: f64,
    backend: &G,
) -> Result<(CommitOutput, String, f64), GenerateError> {
    let prompt = build_prompt(ctx, style, want_pr);
    let prompt_tokens = estimate_tokens(&prompt);

    let cost = estimate_cost(&prompt);
    if cost > max_cost {
        return Err(GenerateError::CostCeiling {
            estimated: cost,
            max: max_cost,
        });
    }

    debug!("generation prompt: {} tokens, ceiling ${max_cost:.4}", prompt_tokens);

    let raw = backend.complete(&prompt).await?;
    let out = parse_response(&raw)?;

    let rationale = format!(
        "{} prompt tokens, {} files, {:?} style",
        prompt_tokens,
        ctx.files.len(),
        style
    );

    Ok((out, rationale, cost))
}

/// Parse a backend response: unwrap the CLI envelope when present, then
/// extract and deserialize the commit JSON.
fn parse_response(raw: &str) -> Result<CommitOutput, GenerateError> {
    let content = match serde_json::from_str::<CliEnvelope>(raw) {
        Ok(envelope) if envelope.is_error => {
            return Err(GenerateError::InvalidJson(format!(
                "backend reported an error: {}",
                truncate(&envelope.result, 200)
            )));
        }
        Ok(envelope) => envelope.result,
        Err(_) => raw.to_string(),
    };

    let json = extract_json(&content);
    serde_json::from_str(&json)
        .map_err(|e| GenerateError::InvalidJson(format!("{e}: {}", truncate(&json, 200))))
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
