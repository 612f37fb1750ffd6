//! Claude CLI spawning with a bounded timeout.

use std::env;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::error::GenerateError;

/// Default timeout for the generation subprocess (2 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable to override the default timeout, in seconds.
const TIMEOUT_ENV_VAR: &str = "COMMITGEN_LLM_TIMEOUT";

/// Get the configured generation timeout.
///
/// Logs a warning when the override is set but not a valid number.
fn generation_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Whether a generation backend is available on this machine.
pub fn have_llm() -> bool {
    which::which("claude").is_ok()
}

/// Run the Claude CLI with a prompt and return its raw stdout.
///
/// Uses `-p` for the prompt and `--output-format json`. One attempt only;
/// a timeout or failure is terminal for the invocation.
pub async fn run_claude(prompt: &str) -> Result<String, GenerateError> {
    let timeout_duration = generation_timeout();
    let timeout_secs = timeout_duration.as_secs();

    let output = timeout(
        timeout_duration,
        Command::new("claude")
            .arg("-p")
            .arg(prompt)
            .arg("--output-format")
            .arg("json")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .map_err(|_| GenerateError::Timeout(timeout_secs))?
    .map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GenerateError::NotInstalled
        } else {
            GenerateError::SpawnFailed(e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(GenerateError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
