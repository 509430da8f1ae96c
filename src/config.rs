// Configuration module for jslens
// Reads from environment variables with sensible defaults

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum accepted source size in bytes (JSLENS_MAX_CODE_BYTES)
    pub max_code_bytes: usize,

    /// External summarizer command line (JSLENS_SUMMARIZER_CMD);
    /// unset means summarization is reported as unavailable.
    pub summarizer_cmd: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_code_bytes: 1_000_000,
            summarizer_cmd: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(val) = env::var("JSLENS_MAX_CODE_BYTES") {
            if let Ok(parsed) = val.parse() {
                config.max_code_bytes = parsed;
            } else {
                eprintln!(
                    "jslens: Warning: Invalid JSLENS_MAX_CODE_BYTES value: {}, using default: {}",
                    val, config.max_code_bytes
                );
            }
        }

        if let Ok(val) = env::var("JSLENS_SUMMARIZER_CMD") {
            let trimmed = val.trim();
            if trimmed.is_empty() {
                eprintln!("jslens: Warning: JSLENS_SUMMARIZER_CMD is empty, ignoring");
            } else {
                config.summarizer_cmd = Some(trimmed.to_string());
            }
        }

        config
    }

    /// Get the global configuration instance
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_code_bytes, 1_000_000);
        assert!(config.summarizer_cmd.is_none());
    }
}
