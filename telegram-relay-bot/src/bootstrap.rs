//! First-run bootstrap: creates `.env` interactively when it does not exist,
//! so secrets stay out of git while first-time setup stays easy. Never
//! overwrites an existing file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Default location of the local secrets file.
pub const ENV_FILE: &str = ".env";

/// Reads one secret from the terminal with input not echoed.
pub fn prompt_secret(label: &str) -> Result<String> {
    let value = dialoguer::Password::new()
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()
        .context("failed to read credential from terminal")?;
    Ok(value.trim().to_string())
}

/// Renders the secrets file content: both credentials plus the optional
/// settings at their documented defaults.
pub fn render_env_file(platform_token: &str, provider_api_key: &str) -> String {
    format!(
        "# ---- Messaging platform ----\n\
         PLATFORM_TOKEN={platform_token}\n\
         \n\
         # ---- Completion provider ----\n\
         PROVIDER_API_KEY={provider_api_key}\n\
         PROVIDER_MODEL={model}\n\
         PROVIDER_MAX_OUTPUT_TOKENS={max_output_tokens}\n\
         PROVIDER_TEMPERATURE={temperature}\n",
        platform_token = platform_token,
        provider_api_key = provider_api_key,
        model = relay_llm::DEFAULT_MODEL,
        max_output_tokens = relay_llm::DEFAULT_MAX_OUTPUT_TOKENS,
        temperature = relay_llm::DEFAULT_TEMPERATURE,
    )
}

/// Creates the secrets file at `path` when absent, prompting for the two
/// required credentials via `prompt`. Returns true when the file was created.
/// An existing file is never touched.
pub fn ensure_env_file(path: &Path, prompt: &dyn Fn(&str) -> Result<String>) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    println!("{} not found. First-time setup starting...", path.display());
    println!("Your keys will be saved locally to {}.\n", path.display());

    let platform_token = prompt("Enter your PLATFORM_TOKEN")?;
    let provider_api_key = prompt("Enter your PROVIDER_API_KEY")?;

    fs::write(path, render_env_file(&platform_token, &provider_api_key))
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("\n{} created. Continuing...\n", path.display());
    Ok(true)
}
