//! Platform configuration: the Telegram token and optional log file path.
//! Missing `PLATFORM_TOKEN` is fatal at startup; the provider credential is
//! handled separately by the completion relay and never blocks startup.

use anyhow::Result;
use relay_llm::Settings;
use std::env;

/// Minimal platform-side configuration.
pub struct PlatformConfig {
    pub platform_token: String,
    pub log_file: Option<String>,
}

impl PlatformConfig {
    /// Loads from the environment. A CLI-provided token overrides
    /// `PLATFORM_TOKEN`; if neither is set the process must not start.
    pub fn load(token_override: Option<String>) -> Result<Self> {
        let resolved = Settings::resolve();
        let platform_token = token_override
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(resolved.platform_token);
        if platform_token.is_empty() {
            anyhow::bail!(
                "PLATFORM_TOKEN is missing. Add it to your .env file (and keep .env out of git)."
            );
        }
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            platform_token,
            log_file,
        })
    }

    /// Constructs from a given token, everything else unset.
    pub fn with_token(platform_token: String) -> Self {
        Self {
            platform_token,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_with_token() {
        let config = PlatformConfig::with_token("test_token".to_string());
        assert_eq!(config.platform_token, "test_token");
        assert!(config.log_file.is_none());
    }

    /// **Test: missing PLATFORM_TOKEN is a load error; an override token fixes it.**
    #[test]
    #[serial]
    fn test_load_requires_token() {
        env::remove_var("PLATFORM_TOKEN");
        assert!(PlatformConfig::load(None).is_err());
        let config = PlatformConfig::load(Some("cli-token".to_string())).unwrap();
        assert_eq!(config.platform_token, "cli-token");
    }
}
