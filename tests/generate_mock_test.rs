//! Generation path behavior against a mock backend: output contract,
//! limiting, PR fields, and the cost ceiling.

use async_trait::async_trait;

use commitgen::config;
use commitgen::context::Context;
use commitgen::error::GenerateError;
use commitgen::format::{self, Style};
use commitgen::llm::{self, Generate};

struct MockBackend {
    response: String,
}

#[async_trait]
impl Generate for MockBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerateError> {
        Ok(self.response.clone())
    }
}

fn ctx() -> Context {
    Context {
        repo: "widget".to_string(),
        branch: "feat/limits".to_string(),
        subjects: vec!["feat: earlier".to_string()],
        files: vec!["src/lib.rs".to_string(), "src/main.rs".to_string()],
        diff: "+fn added() {}\n".to_string(),
        purpose: None,
    }
}

#[tokio::test]
async fn generated_message_with_pr_fields() {
    let backend = MockBackend {
        response: r#"{"subject": "feat(lib): add helper", "body": "Needed for the parser.", "pr_title": "Add helper", "pr_summary": "Introduces a helper used by the parser."}"#.to_string(),
    };

    let (out, _, _) = llm::summarize_diff(&ctx(), Style::Conventional, true, 1.0, &backend)
        .await
        .unwrap();

    assert_eq!(out.subject, "feat(lib): add helper");
    assert_eq!(out.pr_title.as_deref(), Some("Add helper"));
    assert!(out.pr_summary.unwrap().contains("parser"));
}

#[tokio::test]
async fn generated_output_is_limited_like_offline_output() {
    let long_subject = format!("feat(core): {}", "very long description ".repeat(10));
    let backend = MockBackend {
        response: format!(r#"{{"subject": "{long_subject}", "body": null}}"#),
    };

    let (out, _, _) = llm::summarize_diff(&ctx(), Style::Conventional, false, 1.0, &backend)
        .await
        .unwrap();
    let (subject, body) = format::enforce_limits(&out.subject, out.body.as_deref());

    assert!(subject.chars().count() <= format::MAX_SUBJECT_LEN);
    assert!(body.is_none());

    // Limiting is idempotent
    let again = format::enforce_limits(&subject, body.as_deref());
    assert_eq!(again.0, subject);
}

#[tokio::test]
async fn cost_ceiling_blocks_before_any_call() {
    struct PanickingBackend;

    #[async_trait]
    impl Generate for PanickingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, GenerateError> {
            panic!("backend must not be called when the ceiling is exceeded");
        }
    }

    let err = llm::summarize_diff(&ctx(), Style::Conventional, false, 0.0, &PanickingBackend)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::CostCeiling { .. }));
}

#[tokio::test]
async fn env_default_ceiling_is_used_when_flag_absent() {
    let max_cost = temp_env::with_var(
        config::MAX_COST_ENV_VAR,
        Some("0.000001"),
        config::max_cost_default,
    );
    let backend = MockBackend {
        response: r#"{"subject": "feat: x"}"#.to_string(),
    };
    let err = llm::summarize_diff(&ctx(), Style::Conventional, false, max_cost, &backend)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::CostCeiling { .. }));
}

#[tokio::test]
async fn fenced_envelope_response_round_trips() {
    let backend = MockBackend {
        response: r#"{"result": "Here it is:\n```json\n{\"subject\": \"fix(io): retry reads\", \"body\": \"Reads failed on slow disks.\"}\n```", "is_error": false}"#.to_string(),
    };

    let (out, rationale, cost) =
        llm::summarize_diff(&ctx(), Style::Conventional, false, 1.0, &backend)
            .await
            .unwrap();

    assert_eq!(out.subject, "fix(io): retry reads");
    assert!(rationale.contains("2 files"));
    assert!(cost > 0.0);
}
