//! Advisory partitioning of oversized diffs into per-directory commit groups.
//!
//! Groups files that share a top-level directory (root-level files form
//! their own group) so a large change can be re-staged and committed in
//! coherent pieces. Never touches the working tree or index.

/// A suggested group: file paths plus the sub-diff covering exactly them.
#[derive(Debug, Clone)]
pub struct CommitGroup {
    pub files: Vec<String>,
    pub diff: String,
}

/// Partition a unified diff by touched file into directory clusters.
///
/// Every file in the source diff appears in exactly one group, groups are
/// disjoint, and the union of group file sets covers all touched files.
pub fn suggest_commit_groups(diff: &str) -> Vec<CommitGroup> {
    let chunks = split_file_chunks(diff);

    // Cluster in first-seen order, keyed by top-level directory.
    let mut clusters: Vec<(String, CommitGroup)> = Vec::new();
    for (path, chunk) in chunks {
        let key = cluster_key(&path);
        match clusters.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => {
                group.files.push(path);
                group.diff.push_str(&chunk);
            }
            None => clusters.push((
                key,
                CommitGroup {
                    files: vec![path],
                    diff: chunk,
                },
            )),
        }
    }

    clusters.into_iter().map(|(_, g)| g).collect()
}

/// Split a unified diff into (path, chunk) pairs at `diff --git` headers.
fn split_file_chunks(diff: &str) -> Vec<(String, String)> {
    let mut chunks = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in diff.lines() {
        if let Some(header) = line.strip_prefix("diff --git ") {
            if let Some(chunk) = current.take() {
                chunks.push(chunk);
            }
            current = Some((header_path(header), String::new()));
        }
        if let Some((_, text)) = current.as_mut() {
            text.push_str(line);
            text.push('\n');
        }
    }
    if let Some(chunk) = current.take() {
        chunks.push(chunk);
    }
    chunks
}

/// Extract the new-side path from a `diff --git a/X b/Y` header remainder.
fn header_path(header: &str) -> String {
    let raw = header.split_whitespace().last().unwrap_or(header);
    raw.strip_prefix("b/").unwrap_or(raw).to_string()
}

/// Top-level directory of a path; root-level files map to ".".
fn cluster_key(path: &str) -> String {
    match path.split_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_diff() -> String {
        let mut d = String::new();
        for path in [
            "src/main.rs",
            "src/lib.rs",
            "docs/guide.md",
            "README.md",
            "tests/it.rs",
        ] {
            d.push_str(&format!(
                "diff --git a/{path} b/{path}\n--- a/{path}\n+++ b/{path}\n@@ -1 +1 @@\n+change to {path}\n"
            ));
        }
        d
    }

    #[test]
    fn test_groups_cluster_by_top_level_directory() {
        let groups = suggest_commit_groups(&sample_diff());
        assert_eq!(groups.len(), 4); // src, docs, ., tests

        let src = groups
            .iter()
            .find(|g| g.files.contains(&"src/main.rs".to_string()))
            .unwrap();
        assert_eq!(src.files, vec!["src/main.rs", "src/lib.rs"]);
    }

    #[test]
    fn test_groups_partition_is_exact_cover() {
        let groups = suggest_commit_groups(&sample_diff());

        let mut seen = HashSet::new();
        for g in &groups {
            for f in &g.files {
                assert!(seen.insert(f.clone()), "file {f} appears in two groups");
            }
        }
        let expected: HashSet<String> = [
            "src/main.rs",
            "src/lib.rs",
            "docs/guide.md",
            "README.md",
            "tests/it.rs",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_group_diffs_carry_their_files_only() {
        let groups = suggest_commit_groups(&sample_diff());
        let docs = groups
            .iter()
            .find(|g| g.files == vec!["docs/guide.md"])
            .unwrap();
        assert!(docs.diff.contains("change to docs/guide.md"));
        assert!(!docs.diff.contains("src/main.rs"));
    }

    #[test]
    fn test_root_files_form_their_own_group() {
        let diff = "diff --git a/Cargo.toml b/Cargo.toml\n+x\ndiff --git a/README.md b/README.md\n+y\n";
        let groups = suggest_commit_groups(diff);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files, vec!["Cargo.toml", "README.md"]);
    }

    #[test]
    fn test_empty_diff_yields_no_groups() {
        assert!(suggest_commit_groups("").is_empty());
        assert!(suggest_commit_groups("not a diff at all\n").is_empty());
    }
}
