//! Prompt construction for generated commit messages.

use crate::context::Context;
use crate::format::Style;

/// Build the generation prompt from the run context.
///
/// The diff in `ctx` is already redacted; recent subjects give the model
/// the repository's message conventions. Requests a JSON object for
/// reliable parsing.
pub fn build_prompt(ctx: &Context, style: Style, want_pr: bool) -> String {
    let subjects_section = if ctx.subjects.is_empty() {
        "(no prior commits)".to_string()
    } else {
        ctx.subjects
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let purpose_section = match &ctx.purpose {
        Some(p) if !p.trim().is_empty() => format!("\n## Author Intent\n{}\n", p.trim()),
        _ => String::new(),
    };

    let style_rules = match style {
        Style::Conventional => {
            "- Format: `type(scope): description`, type one of feat, fix, docs, \
             style, refactor, perf, test, build, ci, chore\n\
             - Imperative mood, lowercase after the colon, no trailing period\n\
             - Subject line at most 72 characters"
        }
        Style::Casual => {
            "- Plain sentence, capitalized, imperative mood, no type prefix\n\
             - Subject line at most 72 characters"
        }
    };

    let pr_rules = if want_pr {
        "\nAlso produce `pr_title` (a pull-request title) and `pr_summary` \
         (2-4 sentences for reviewers)."
    } else {
        "\nSet `pr_title` and `pr_summary` to null."
    };

    format!(
        r#"You are generating a git commit message for the repository "{repo}" (branch: {branch}).

## Recent Commit Subjects
{subjects_section}
{purpose_section}
## Diff
```
{diff}
```

## Subject Rules
{style_rules}

## Body Rules
- Explain WHY the change was made, not what the diff already shows
- Wrap lines at 80 characters
- For trivial changes the body may be null
{pr_rules}

Respond with ONLY a JSON object (no markdown, no explanation):
{{"subject": "...", "body": "... or null", "pr_title": null, "pr_summary": null}}"#,
        repo = ctx.repo,
        branch = ctx.branch,
        diff = ctx.diff,
    )
}
