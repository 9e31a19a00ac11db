//! Reader for the environment variables gh-triage depends on.

/// Environment variable holding the Messages endpoint API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Read the API key from the environment.
/// Unset and empty values are both rejected.
pub fn api_key_from_env() -> anyhow::Result<String> {
    match std::env::var(API_KEY_VAR) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => anyhow::bail!("{API_KEY_VAR} environment variable not set"),
    }
}
