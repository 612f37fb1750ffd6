//! Diff collection from the index and commit ranges using git2.

use git2::{Diff, DiffFormat, DiffOptions, ErrorCode, Object, ObjectType, Repository, Tree};
use tracing::warn;

use crate::error::GitError;

/// A collected diff: unified text plus the touched file paths, in diff order.
#[derive(Debug, Clone)]
pub struct CollectedDiff {
    pub text: String,
    pub files: Vec<String>,
}

/// Stable diff flags: 3 context lines, minimal algorithm, no external driver.
fn diff_options() -> DiffOptions {
    let mut opts = DiffOptions::new();
    opts.context_lines(3).minimal(true);
    opts
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the staged diff: HEAD tree vs the index.
pub fn staged_diff(repo: &Repository) -> Result<CollectedDiff, GitError> {
    let head_tree = resolve_head_tree(repo)?;
    let mut opts = diff_options();
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
        .map_err(GitError::DiffFailed)?;
    render(&diff)
}

/// Collect a diff over a user-specified revision range.
///
/// `A..B` (or `A...B`) diffs the two trees; a single revision `R` is
/// treated as `R..HEAD`.
pub fn range_diff(repo: &Repository, spec: &str) -> Result<CollectedDiff, GitError> {
    let (from, to) = resolve_range_objects(repo, spec)?;
    let old_tree = tree_of(from, spec)?;
    let new_tree = tree_of(to, spec)?;

    let mut opts = diff_options();
    let diff = repo
        .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))
        .map_err(GitError::DiffFailed)?;
    render(&diff)
}

fn resolve_range_objects<'r>(
    repo: &'r Repository,
    spec: &str,
) -> Result<(Object<'r>, Object<'r>), GitError> {
    let err = |source| GitError::ResolveRange {
        spec: spec.to_string(),
        source,
    };

    if spec.contains("..") {
        let rev = repo.revparse(spec).map_err(err)?;
        let from = rev
            .from()
            .ok_or_else(|| GitError::RangeNotACommit(spec.to_string()))?
            .clone();
        let to = rev
            .to()
            .ok_or_else(|| GitError::RangeNotACommit(spec.to_string()))?
            .clone();
        Ok((from, to))
    } else {
        let from = repo.revparse_single(spec).map_err(err)?;
        let to = repo.revparse_single("HEAD").map_err(err)?;
        Ok((from, to))
    }
}

fn tree_of<'r>(obj: Object<'r>, spec: &str) -> Result<Tree<'r>, GitError> {
    obj.peel(ObjectType::Tree)
        .map_err(|source| GitError::ResolveRange {
            spec: spec.to_string(),
            source,
        })?
        .into_tree()
        .map_err(|_| GitError::RangeNotACommit(spec.to_string()))
}

/// Render a diff to unified text and collect touched file paths.
fn render(diff: &Diff<'_>) -> Result<CollectedDiff, GitError> {
    let mut files = Vec::new();
    for delta in diff.deltas() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string());
        if let Some(p) = path {
            if !p.is_empty() && !files.contains(&p) {
                files.push(p);
            }
        }
    }

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if matches!(origin, '+' | '-' | ' ') {
            text.push(origin);
        }
        match std::str::from_utf8(line.content()) {
            Ok(s) => text.push_str(s),
            Err(_) => warn!("skipping non-UTF-8 diff line"),
        }
        true
    })
    .map_err(GitError::DiffFailed)?;

    Ok(CollectedDiff { text, files })
}
