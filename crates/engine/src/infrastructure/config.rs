//! Engine configuration from environment variables.
//!
//! `main` loads `.env` with dotenvy first, so the same keys work from a file.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DREAMFORGE_LLM` | `ollama` (`placeholder` runs offline) |
//! | `OLLAMA_BASE_URL` / `OLLAMA_URL` | `http://localhost:11434` |
//! | `OLLAMA_MODEL` | `llama3.2` |
//! | `DREAMFORGE_LLM_TIMEOUT_SECS` | `120` |
//! | `DREAMFORGE_LLM_MAX_RETRIES` | `2` |
//! | `DREAMFORGE_CATALOG` | `catalog.json` |
//! | `DREAMFORGE_SEED` | unset (entropy) |
//! | `DREAMFORGE_GROUND_HEIGHT` | unset (no ground) |

use std::path::PathBuf;
use std::str::FromStr;

use crate::infrastructure::ollama::{
    DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::infrastructure::resilient_llm::RetryConfig;

pub const DEFAULT_CATALOG_PATH: &str = "catalog.json";

/// Which text-completion backend to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    Ollama,
    Placeholder,
}

impl FromStr for LlmBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmBackend::Ollama),
            "placeholder" | "offline" => Ok(LlmBackend::Placeholder),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub llm_backend: LlmBackend,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub llm_timeout_secs: u64,
    pub llm_max_retries: u32,
    pub catalog_path: PathBuf,
    pub seed: Option<u64>,
    pub ground_height: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            llm_backend: LlmBackend::Ollama,
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_TIMEOUT_SECS,
            llm_max_retries: RetryConfig::default().max_retries,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            seed: None,
            ground_height: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults
    /// with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            llm_backend: parse_or(&lookup, "DREAMFORGE_LLM", defaults.llm_backend),
            ollama_base_url: lookup("OLLAMA_BASE_URL")
                .or_else(|| lookup("OLLAMA_URL"))
                .unwrap_or(defaults.ollama_base_url),
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            llm_timeout_secs: parse_or(
                &lookup,
                "DREAMFORGE_LLM_TIMEOUT_SECS",
                defaults.llm_timeout_secs,
            ),
            llm_max_retries: parse_or(&lookup, "DREAMFORGE_LLM_MAX_RETRIES", defaults.llm_max_retries),
            catalog_path: lookup("DREAMFORGE_CATALOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            seed: parse_optional(&lookup, "DREAMFORGE_SEED"),
            ground_height: parse_optional(&lookup, "DREAMFORGE_GROUND_HEIGHT"),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    parse_optional(lookup, key).unwrap_or(default)
}

fn parse_optional<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
