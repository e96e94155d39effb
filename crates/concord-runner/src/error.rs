//! Error types for the action generation pipeline.
//!
//! None of these cross the generator boundary during a run: the generator
//! turns every failure into a decline-to-act fallback. They surface only
//! while building the pipeline (configuration, template loading).

/// Errors that can occur while configuring or calling the generation stack.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// A text-generation backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    LlmBackend(String),

    /// A backend call exceeded its deadline.
    #[error("generation timed out after {0} ms")]
    Timeout(u64),

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),
}
