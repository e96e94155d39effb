//! Action generation for Concord country agents.
//!
//! Turns an agent's identity, the active crisis and its bounded memory into a
//! prompt, calls a text-generation backend under a deadline, and guarantees
//! tagged text back. Also hosts the tag parser that recovers a structured
//! action from that text.
//!
//! # Modules
//!
//! - [`config`] -- Backend configuration from environment variables
//! - [`error`] -- Error types ([`RunnerError`])
//! - [`generator`] -- [`ActionGenerator`] with timeout and fallback handling
//! - [`llm`] -- [`CompletionBackend`] trait and HTTP backends
//! - [`parse`] -- Tag-anchored action parser
//! - [`prompt`] -- `minijinja` prompt templates

pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod parse;
pub mod prompt;

pub use config::{BackendType, LlmBackendConfig, RunnerConfig};
pub use error::RunnerError;
pub use generator::{
    ActionGenerator, Generation, GenerationRequest, MALFORMED_OUTPUT_MESSAGE, decline_text,
};
pub use llm::{CompletionBackend, LlmBackend, SamplingParams, create_backend};
pub use parse::{ParsedAction, has_required_tags, parse_action};
pub use prompt::{PromptContext, PromptEngine, RenderedPrompt};
