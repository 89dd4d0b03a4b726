//! Settings resolver: reads named variables from the process environment,
//! trims them, and applies typed defaults. Resolution never fails; numeric
//! parse failures degrade to the documented default.

use std::env;

pub const DEFAULT_MODEL: &str = "gpt-5.2";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Resolved settings bundle for one completion request plus the platform
/// credential. Credentials may be empty; callers decide how to surface that
/// (the platform token gates startup, the provider key only gates the
/// completion path).
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider_api_key: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub platform_token: String,
}

impl Settings {
    /// Resolves all settings from the environment. Safe to call repeatedly;
    /// reads only, no side effects.
    pub fn resolve() -> Self {
        Self {
            provider_api_key: env_trimmed("PROVIDER_API_KEY"),
            model: env_or("PROVIDER_MODEL", DEFAULT_MODEL),
            max_output_tokens: env_u32("PROVIDER_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS),
            temperature: env_f32("PROVIDER_TEMPERATURE", DEFAULT_TEMPERATURE),
            platform_token: env_trimmed("PLATFORM_TOKEN"),
        }
    }

    /// True when both required credentials are non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.provider_api_key.is_empty() && !self.platform_token.is_empty()
    }

    pub fn has_provider_credential(&self) -> bool {
        !self.provider_api_key.is_empty()
    }
}

/// Reads and trims a variable; missing becomes the empty string.
fn env_trimmed(name: &str) -> String {
    env::var(name).unwrap_or_default().trim().to_string()
}

/// Reads and trims a variable; missing or empty becomes `default`.
fn env_or(name: &str, default: &str) -> String {
    let value = env_trimmed(name);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Reads a u32 variable with a safe fallback: missing, empty, or unparsable
/// values become `default`.
pub fn env_u32(name: &str, default: u32) -> u32 {
    env_trimmed(name).parse().unwrap_or(default)
}

/// Reads an f32 variable with a safe fallback: missing, empty, or unparsable
/// values become `default`.
pub fn env_f32(name: &str, default: f32) -> f32 {
    env_trimmed(name).parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_all() {
        for name in [
            "PROVIDER_API_KEY",
            "PROVIDER_MODEL",
            "PROVIDER_MAX_OUTPUT_TOKENS",
            "PROVIDER_TEMPERATURE",
            "PLATFORM_TOKEN",
        ] {
            env::remove_var(name);
        }
    }

    /// **Test: resolve with empty environment yields defaults and empty credentials.**
    #[test]
    #[serial]
    fn resolve_defaults() {
        clear_all();
        let settings = Settings::resolve();
        assert_eq!(settings.provider_api_key, "");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(settings.platform_token, "");
        assert!(!settings.is_valid());
    }

    /// **Test: credentials are trimmed; whitespace-only counts as missing.**
    #[test]
    #[serial]
    fn resolve_trims_credentials() {
        clear_all();
        env::set_var("PROVIDER_API_KEY", "  sk-test  ");
        env::set_var("PLATFORM_TOKEN", "   ");
        let settings = Settings::resolve();
        assert_eq!(settings.provider_api_key, "sk-test");
        assert!(settings.has_provider_credential());
        assert_eq!(settings.platform_token, "");
        assert!(!settings.is_valid());
        clear_all();
    }

    /// **Test: unparsable integer degrades to default, valid one is used.**
    #[test]
    #[serial]
    fn resolve_max_output_tokens() {
        clear_all();
        env::set_var("PROVIDER_MAX_OUTPUT_TOKENS", "abc");
        assert_eq!(Settings::resolve().max_output_tokens, 512);
        env::set_var("PROVIDER_MAX_OUTPUT_TOKENS", "1024");
        assert_eq!(Settings::resolve().max_output_tokens, 1024);
        clear_all();
    }

    /// **Test: empty temperature degrades to default, valid one is parsed.**
    #[test]
    #[serial]
    fn resolve_temperature() {
        clear_all();
        env::set_var("PROVIDER_TEMPERATURE", "");
        assert_eq!(Settings::resolve().temperature, 0.7);
        env::set_var("PROVIDER_TEMPERATURE", "0.2");
        assert_eq!(Settings::resolve().temperature, 0.2);
        env::set_var("PROVIDER_TEMPERATURE", "not-a-float");
        assert_eq!(Settings::resolve().temperature, 0.7);
        clear_all();
    }

    /// **Test: empty model falls back to the default model identifier.**
    #[test]
    #[serial]
    fn resolve_model_default() {
        clear_all();
        env::set_var("PROVIDER_MODEL", "  ");
        assert_eq!(Settings::resolve().model, DEFAULT_MODEL);
        env::set_var("PROVIDER_MODEL", "gpt-4o-mini");
        assert_eq!(Settings::resolve().model, "gpt-4o-mini");
        clear_all();
    }
}
