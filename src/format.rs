//! Offline message synthesis and output limiting.

use clap::ValueEnum;

use crate::context::Context;

/// Maximum subject line length after limiting.
pub const MAX_SUBJECT_LEN: usize = 72;

/// Maximum body line width after limiting.
pub const MAX_BODY_WIDTH: usize = 80;

/// Subjects containing any of these (case-insensitive) are considered too
/// generic to commit against a very large diff. Kept as literal substring
/// containment checks.
pub const POOR_MESSAGE_INDICATORS: &[&str] = &[
    "add .env",
    "update files",
    "modify",
    "add",
    "update",
    "change",
];

/// Commit message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// `type(scope): description` prefix form.
    Conventional,
    /// Plain sentence form.
    Casual,
}

/// Deterministic subject construction from context alone. No network, no
/// body; never empty given non-empty context.
pub fn offline_subject(ctx: &Context, style: Style) -> String {
    let description = match &ctx.purpose {
        Some(p) if !p.trim().is_empty() => p.trim().to_string(),
        _ => match ctx.files.len() {
            0 => format!("update {}", ctx.repo),
            1 => format!("update {}", basename(&ctx.files[0])),
            n => format!("update {n} files"),
        },
    };

    match style {
        Style::Casual => capitalize(&description),
        Style::Conventional => {
            let kind = infer_type(&ctx.files);
            match dominant_scope(&ctx.files) {
                Some(scope) => format!("{kind}({scope}): {description}"),
                None => format!("{kind}: {description}"),
            }
        }
    }
}

/// Enforce subject and body limits. Idempotent: limiting limited output
/// yields the same pair.
pub fn enforce_limits(subject: &str, body: Option<&str>) -> (String, Option<String>) {
    let mut subject: String = subject.trim().chars().take(MAX_SUBJECT_LEN).collect();
    subject.truncate(subject.trim_end().len());

    let body = body
        .map(|b| {
            b.trim_end()
                .lines()
                .flat_map(|line| wrap_line(line, MAX_BODY_WIDTH))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|b| !b.is_empty());

    (subject, body)
}

/// Whether a subject is too generic for a very large change.
pub fn is_poor_subject(subject: &str) -> bool {
    let lower = subject.to_lowercase();
    POOR_MESSAGE_INDICATORS.iter().any(|i| lower.contains(i))
}

/// Greedy word wrap of a single line. Lines already within the width pass
/// through verbatim, which keeps the wrap idempotent.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Infer a conventional-commit type from the touched file set.
fn infer_type(files: &[String]) -> &'static str {
    if files.is_empty() {
        return "chore";
    }
    if files
        .iter()
        .all(|f| f.ends_with(".md") || f.starts_with("docs/"))
    {
        return "docs";
    }
    if files
        .iter()
        .all(|f| f.starts_with("tests/") || f.contains("_test.") || f.contains("test_"))
    {
        return "test";
    }
    if files.iter().all(|f| is_manifest(f)) {
        return "chore";
    }
    "feat"
}

fn is_manifest(path: &str) -> bool {
    let name = basename(path);
    matches!(
        name,
        "Cargo.toml" | "Cargo.lock" | "package.json" | "package-lock.json" | ".gitignore"
    ) || name.ends_with(".lock")
}

/// Most frequent top-level directory among the touched files, ties going
/// to the first seen. None when every file sits at the repository root.
fn dominant_scope(files: &[String]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for f in files {
        if let Some((dir, _)) = f.split_once('/') {
            match counts.iter_mut().find(|(d, _)| *d == dir) {
                Some((_, n)) => *n += 1,
                None => counts.push((dir, 1)),
            }
        }
    }
    counts
        .iter()
        .max_by_key(|(_, n)| *n)
        .map(|(d, _)| d.to_string())
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
