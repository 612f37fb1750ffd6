//! commitgen - generates git commit messages from staged diffs.
//!
//! # Overview
//!
//! commitgen reads the staged diff (or a commit range), screens it for risk
//! signals, redacts probable secrets, and produces a commit message either
//! through the Claude Code CLI or a deterministic offline formatter. Large
//! diffs can be partitioned into suggested commit groups instead.

pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod git;
pub mod groups;
pub mod llm;
pub mod redact;
pub mod risk;

// Re-export commonly used types
pub use context::Context;
pub use error::{GenerateError, GitError};
pub use format::Style;
pub use groups::CommitGroup;
pub use llm::CommitOutput;
pub use risk::RiskAssessment;
