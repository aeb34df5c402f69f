//! Configuration for the analyzer and the remote completion service.
//!
//! Remote settings come from environment variables, with a `.env` file loaded first
//! when present.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

use crate::error::{MindMapError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_HISTORY_FILE: &str = "mindmap-history.jsonl";

/// Thresholds of the lexical pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    /// Sentences shorter than this (in characters) never become key points.
    #[validate(range(min = 1))]
    pub min_key_point_chars: usize,
    /// Sentences with a larger share of punctuation never become key points.
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_punctuation_ratio: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_key_point_chars: 4,
            max_punctuation_ratio: 0.3,
        }
    }
}

/// Settings of the OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoteConfig {
    #[validate(url)]
    pub api_url: String,
    /// Sent as a bearer token when set.
    pub api_key: Option<String>,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 1))]
    pub max_tokens: u32,
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 4000,
            timeout_secs: 120,
        }
    }
}

impl RemoteConfig {
    /// Load from `MINDMAP_*` environment variables, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            api_url: env::var("MINDMAP_API_URL").unwrap_or(defaults.api_url),
            api_key: env::var("MINDMAP_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            model: env::var("MINDMAP_MODEL").unwrap_or(defaults.model),
            temperature: parse_var("MINDMAP_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_var("MINDMAP_MAX_TOKENS", defaults.max_tokens)?,
            timeout_secs: parse_var("MINDMAP_TIMEOUT_SECS", defaults.timeout_secs)?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Location of the history file: `MINDMAP_HISTORY_PATH` or the working directory.
pub fn history_path() -> PathBuf {
    env::var("MINDMAP_HISTORY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_HISTORY_FILE))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MindMapError::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
        assert!(RemoteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_analyzer_config() {
        let config = AnalyzerConfig {
            min_key_point_chars: 0,
            max_punctuation_ratio: 1.5,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                ("MINDMAP_API_URL", Some("https://api.example.com/v1/chat/completions")),
                ("MINDMAP_API_KEY", Some("secret")),
                ("MINDMAP_MODEL", Some("test-model")),
                ("MINDMAP_TEMPERATURE", Some("0.2")),
                ("MINDMAP_MAX_TOKENS", None),
                ("MINDMAP_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = RemoteConfig::from_env().unwrap();
                assert_eq!(config.api_url, "https://api.example.com/v1/chat/completions");
                assert_eq!(config.api_key.as_deref(), Some("secret"));
                assert_eq!(config.model, "test-model");
                assert!((config.temperature - 0.2).abs() < f32::EPSILON);
                assert_eq!(config.max_tokens, 4000);
                assert_eq!(config.timeout_secs, 5);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_numbers() {
        temp_env::with_var("MINDMAP_MAX_TOKENS", Some("many"), || {
            let err = RemoteConfig::from_env().unwrap_err();
            assert!(matches!(err, MindMapError::Config(_)));
        });
    }

    #[test]
    fn test_from_env_rejects_bad_url() {
        temp_env::with_var("MINDMAP_API_URL", Some("not a url"), || {
            assert!(RemoteConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_history_path() {
        temp_env::with_var("MINDMAP_HISTORY_PATH", Some("/tmp/h.jsonl"), || {
            assert_eq!(history_path(), PathBuf::from("/tmp/h.jsonl"));
        });
        temp_env::with_var_unset("MINDMAP_HISTORY_PATH", || {
            assert_eq!(history_path(), PathBuf::from(DEFAULT_HISTORY_FILE));
        });
    }
}
