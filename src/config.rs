//! Configuration bootstrap: `.env` auto-loading and cost ceiling default.

use std::env;
use std::fs;
use std::path::Path;

use tracing::debug;

/// Settings file searched for in the working directory and its parents.
pub const ENV_FILE_NAME: &str = ".env";

/// Environment variable holding the default cost ceiling in dollars.
pub const MAX_COST_ENV_VAR: &str = "COMMITGEN_MAX_COST";

/// Cost ceiling used when neither the flag nor the environment sets one.
pub const DEFAULT_MAX_COST: f64 = 0.02;

/// Search upward from the current directory for a `.env` file and load it
/// into the process environment. Returns whether a file was loaded.
/// Failures are ignored: missing or unreadable files leave the environment
/// untouched.
pub fn load_env_file() -> bool {
    match env::current_dir() {
        Ok(dir) => load_env_from(&dir),
        Err(_) => false,
    }
}

/// Upward `.env` search starting at `start`. First file found wins.
pub fn load_env_from(start: &Path) -> bool {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(ENV_FILE_NAME);
        if candidate.is_file() {
            match fs::read_to_string(&candidate) {
                Ok(contents) => {
                    apply(&contents);
                    debug!("Loaded settings from {}", candidate.display());
                    return true;
                }
                Err(e) => {
                    debug!("Could not read {}: {e}", candidate.display());
                    return false;
                }
            }
        }
        if !dir.pop() {
            return false;
        }
    }
}

/// Set `KEY=VALUE` lines into the process environment, skipping blanks and
/// `#` comments.
fn apply(contents: &str) {
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            // Runs during startup, before the pipeline reads configuration.
            unsafe { env::set_var(key, value.trim()) };
        }
    }
}

/// Resolve the default cost ceiling from the environment, once at startup.
pub fn max_cost_default() -> f64 {
    env::var(MAX_COST_ENV_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_COST)
}
