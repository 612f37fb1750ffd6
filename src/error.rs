//! Error types for commitgen modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to resolve range '{spec}': {source}")]
    ResolveRange {
        spec: String,
        #[source]
        source: git2::Error,
    },

    #[error("Range '{0}' does not point at a commit")]
    RangeNotACommit(String),

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from the text-generation backend.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(
        "Claude Code CLI not found. Install with: npm install -g @anthropic-ai/claude-code, or pass --no-llm"
    )]
    NotInstalled,

    #[error(
        "Estimated cost ${estimated:.4} exceeds ceiling ${max:.4}. Raise --max-cost or use --no-llm"
    )]
    CostCeiling { estimated: f64, max: f64 },

    #[error("Failed to spawn generation process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Generation process timed out after {0} seconds")]
    Timeout(u64),

    #[error("Generation process exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Backend returned invalid JSON: {0}")]
    InvalidJson(String),
}
