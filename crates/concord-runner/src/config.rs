//! Text-generation backend configuration.
//!
//! Credentials and endpoints are loaded from environment variables so they
//! never live in the simulation config file. Sampling parameters and the
//! generation deadline come from the simulation config instead.

use crate::error::RunnerError;

/// Default backend kind when `LLM_BACKEND` is unset.
const DEFAULT_BACKEND: &str = "groq";

/// Default API base URL when `LLM_API_URL` is unset.
const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

/// Default model when `LLM_MODEL` is unset.
const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Backend configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Primary backend.
    pub primary_backend: LlmBackendConfig,
    /// Backend tried when the primary fails.
    pub fallback_backend: Option<LlmBackendConfig>,
    /// Directory of prompt templates overriding the built-in set.
    pub templates_dir: Option<String>,
}

/// Configuration for a single backend.
#[derive(Debug, Clone)]
pub struct LlmBackendConfig {
    /// Request format to speak.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.groq.com/openai/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported backend request formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible chat completions (Groq, `OpenAI`, `DeepSeek`, Ollama).
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl BackendType {
    /// Parse a backend name as written in the environment.
    pub fn parse(name: &str) -> Result<Self, RunnerError> {
        match name.trim().to_lowercase().as_str() {
            "openai" | "groq" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(RunnerError::Config(format!("unknown backend type: {other}"))),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Primary backend:
    /// - `LLM_API_KEY` -- required
    /// - `LLM_BACKEND` -- `groq` (default), `openai`, `deepseek`, `ollama`,
    ///   `anthropic`
    /// - `LLM_API_URL` -- defaults to the Groq endpoint
    /// - `LLM_MODEL` -- defaults to `llama3-70b-8192`
    ///
    /// Fallback backend, enabled when `LLM_FALLBACK_BACKEND` is set:
    /// - `LLM_FALLBACK_BACKEND`, `LLM_FALLBACK_API_URL`,
    ///   `LLM_FALLBACK_API_KEY`, `LLM_FALLBACK_MODEL` -- all required
    ///
    /// Other:
    /// - `PROMPT_TEMPLATES_DIR` -- directory of `.j2` overrides
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let primary_backend = LlmBackendConfig {
            backend_type: BackendType::parse(
                &lookup("LLM_BACKEND").unwrap_or_else(|| DEFAULT_BACKEND.to_owned()),
            )?,
            api_url: lookup("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            api_key: required(&lookup, "LLM_API_KEY")?,
            model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        };

        let fallback_backend = match lookup("LLM_FALLBACK_BACKEND") {
            Some(kind) => Some(LlmBackendConfig {
                backend_type: BackendType::parse(&kind)?,
                api_url: required(&lookup, "LLM_FALLBACK_API_URL")?,
                api_key: required(&lookup, "LLM_FALLBACK_API_KEY")?,
                model: required(&lookup, "LLM_FALLBACK_MODEL")?,
            }),
            None => None,
        };

        let templates_dir = lookup("PROMPT_TEMPLATES_DIR").filter(|d| !d.trim().is_empty());

        Ok(Self {
            primary_backend,
            fallback_backend,
            templates_dir,
        })
    }
}

/// Read a required variable.
fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, RunnerError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| RunnerError::Config(format!("missing required env var {name}")))
}
