//! Per-run generation context.

use git2::Repository;

use crate::git;

/// Number of recent commit subjects included as style context.
pub const RECENT_SUBJECT_COUNT: usize = 5;

/// Read-only context assembled once per run and passed into generation
/// and the offline formatter.
#[derive(Debug, Clone)]
pub struct Context {
    pub repo: String,
    pub branch: String,
    pub subjects: Vec<String>,
    /// Files touched by the diff, in diff order.
    pub files: Vec<String>,
    /// Redacted diff text.
    pub diff: String,
    /// User-supplied intent for the change, if any.
    pub purpose: Option<String>,
}

impl Context {
    /// Gather repository metadata and combine it with the redacted diff.
    pub fn gather(
        repo: &Repository,
        diff: String,
        files: Vec<String>,
        purpose: Option<String>,
    ) -> Self {
        Context {
            repo: git::repo_name(repo),
            branch: git::current_branch(repo),
            subjects: git::recent_subjects(repo, RECENT_SUBJECT_COUNT),
            files,
            diff,
            purpose,
        }
    }
}
