//! Git operations using git2-rs.

pub mod diff;

pub use diff::{CollectedDiff, range_diff, staged_diff};

use git2::{Oid, Repository};

use crate::error::GitError;

/// Repository name: last segment of the `origin` remote URL, falling back
/// to the workdir directory name.
pub fn repo_name(repo: &Repository) -> String {
    if let Ok(remote) = repo.find_remote("origin")
        && let Some(url) = remote.url()
    {
        let name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(url)
            .trim_end_matches(".git");
        if !name.is_empty() {
            return name.to_string();
        }
    }

    repo.workdir()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "repository".to_string())
}

/// Current branch shorthand; `HEAD` when detached. On an unborn branch the
/// symbolic target is used so the configured branch name still shows up.
pub fn current_branch(repo: &Repository) -> String {
    match repo.head() {
        Ok(head) => head.shorthand().unwrap_or("HEAD").to_string(),
        Err(_) => repo
            .find_reference("HEAD")
            .ok()
            .and_then(|r| {
                r.symbolic_target()
                    .map(|t| t.trim_start_matches("refs/heads/").to_string())
            })
            .unwrap_or_else(|| "HEAD".to_string()),
    }
}

/// Last `count` commit subject lines, newest first. Empty on an unborn
/// branch.
pub fn recent_subjects(repo: &Repository, count: usize) -> Vec<String> {
    let mut walk = match repo.revwalk() {
        Ok(w) => w,
        Err(_) => return Vec::new(),
    };
    if walk.push_head().is_err() {
        return Vec::new();
    }

    walk.filter_map(|oid| oid.ok())
        .filter_map(|oid| repo.find_commit(oid).ok())
        .take(count)
        .map(|c| c.summary().unwrap_or("").to_string())
        .collect()
}

/// Commit the current index as-is onto HEAD with the given message.
///
/// The index is not re-staged: the tool commits exactly what was diffed.
pub fn commit_index(repo: &Repository, message: &str) -> Result<Oid, GitError> {
    let mut index = repo.index().map_err(GitError::CommitFailed)?;
    let tree_id = index.write_tree().map_err(GitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;

    let sig = repo.signature().map_err(GitError::ConfigError)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(GitError::CommitFailed)?),
        Err(e)
            if e.code() == git2::ErrorCode::UnbornBranch
                || e.code() == git2::ErrorCode::NotFound =>
        {
            None
        }
        Err(e) => return Err(GitError::CommitFailed(e)),
    };
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(GitError::CommitFailed)
}
