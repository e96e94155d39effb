//! The action generator: prompt in, tagged text out, never an error.
//!
//! Pipeline per agent-turn:
//! 1. Render the prompt from the agent, scenario, turn and roster
//! 2. Call the primary backend, then the fallback backend if one is
//!    configured and the primary failed. Each call gets its own deadline
//! 3. Check the reply for the three required tags
//!
//! Any failure along the way is replaced by a canonical decline-to-act reply
//! whose message explains the cause. The caller always receives well-formed
//! tagged text together with an [`ActionOrigin`] saying how it came about.

use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use concord_agents::{CountryAgent, Scenario};
use concord_types::{ActionOrigin, GLOBAL_TARGET, Intent, NegotiationStyle};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::llm::{CompletionBackend, LlmBackend, SamplingParams, create_backend};
use crate::parse::{INTENT_TAG, MESSAGE_TAG, TARGET_TAG, has_required_tags};
use crate::prompt::{PromptContext, PromptEngine, RenderedPrompt};

/// Message used when the backend ignored the response format.
pub const MALFORMED_OUTPUT_MESSAGE: &str =
    "(Agent decided to observe this turn due to unclear instructions or malformed response template)";

/// Inputs for one agent-turn.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// The acting agent, including its memory.
    pub agent: &'a CountryAgent,
    /// The active crisis.
    pub scenario: &'a Scenario,
    /// 1-based turn number.
    pub turn: u32,
    /// Every participating nation, including the actor.
    pub roster: &'a [String],
    /// Negotiation style hint.
    pub style: NegotiationStyle,
}

/// Tagged text for one agent-turn and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Text containing the three tags.
    pub text: String,
    /// Whether the text came from a backend or was substituted.
    pub origin: ActionOrigin,
    /// The backend that answered, if any did.
    pub backend: Option<String>,
    /// Wall-clock time spent, in milliseconds.
    pub latency_ms: u64,
}

/// Turns agent state into tagged action text.
pub struct ActionGenerator<B> {
    prompt_engine: PromptEngine,
    primary: B,
    fallback: Option<B>,
    timeout: Duration,
    sampling: SamplingParams,
}

impl ActionGenerator<LlmBackend> {
    /// Build a generator with HTTP backends from environment configuration.
    pub fn from_config(
        config: &RunnerConfig,
        timeout: Duration,
        sampling: SamplingParams,
    ) -> Result<Self, RunnerError> {
        let prompt_engine = PromptEngine::new(config.templates_dir.as_deref())?;
        let primary = create_backend(&config.primary_backend);
        let fallback = config.fallback_backend.as_ref().map(create_backend);
        Ok(Self::new(prompt_engine, primary, fallback, timeout, sampling))
    }
}

impl<B: CompletionBackend> ActionGenerator<B> {
    /// Create a generator from its parts.
    pub const fn new(
        prompt_engine: PromptEngine,
        primary: B,
        fallback: Option<B>,
        timeout: Duration,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            prompt_engine,
            primary,
            fallback,
            timeout,
            sampling,
        }
    }

    /// Produce tagged action text for one agent-turn.
    ///
    /// Never fails: every error is folded into a decline-to-act reply.
    pub async fn act(&self, request: &GenerationRequest<'_>) -> Generation {
        let agent = request.agent.name();
        let turn = request.turn;
        let start = Instant::now();

        let context = PromptContext::new(
            request.agent,
            request.scenario,
            turn,
            request.roster,
            request.style,
        );
        let prompt = match self.prompt_engine.render(&context) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(agent, turn, error = %e, "prompt render failed, declining");
                return Generation {
                    text: decline_text(&technical_difficulties(&e)),
                    origin: ActionOrigin::BackendError,
                    backend: None,
                    latency_ms: elapsed_ms(start),
                };
            }
        };

        let (text, origin, backend) = match self.call_with_fallback(&prompt).await {
            Ok((reply, backend)) => {
                if has_required_tags(&reply) {
                    debug!(agent, turn, backend = %backend, reply_len = reply.len(), "backend replied");
                    (reply, ActionOrigin::Backend, Some(backend))
                } else {
                    warn!(agent, turn, backend = %backend, reply = %reply, "malformed reply, declining");
                    (
                        decline_text(MALFORMED_OUTPUT_MESSAGE),
                        ActionOrigin::MalformedOutput,
                        Some(backend),
                    )
                }
            }
            Err(e @ RunnerError::Timeout(_)) => {
                warn!(agent, turn, error = %e, "generation deadline exceeded, declining");
                (
                    decline_text(&technical_difficulties(&e)),
                    ActionOrigin::Timeout,
                    None,
                )
            }
            Err(e) => {
                warn!(agent, turn, error = %e, "every backend failed, declining");
                (
                    decline_text(&technical_difficulties(&e)),
                    ActionOrigin::BackendError,
                    None,
                )
            }
        };

        Generation {
            text,
            origin,
            backend,
            latency_ms: elapsed_ms(start),
        }
    }

    /// Try the primary backend, then the fallback.
    ///
    /// Returns the reply and the name of the backend that produced it. When
    /// both fail, the fallback's error wins.
    async fn call_with_fallback(
        &self,
        prompt: &RenderedPrompt,
    ) -> Result<(String, String), RunnerError> {
        match self.call_backend(&self.primary, prompt).await {
            Ok(reply) => Ok((reply, self.primary.name().to_owned())),
            Err(primary_err) => {
                let Some(fallback) = &self.fallback else {
                    return Err(primary_err);
                };
                warn!(
                    backend = self.primary.name(),
                    error = %primary_err,
                    "primary backend failed, trying fallback"
                );
                let reply = self.call_backend(fallback, prompt).await?;
                Ok((reply, fallback.name().to_owned()))
            }
        }
    }

    /// One backend call bounded by the generation deadline.
    async fn call_backend(
        &self,
        backend: &B,
        prompt: &RenderedPrompt,
    ) -> Result<String, RunnerError> {
        timeout(self.timeout, backend.complete(prompt, self.sampling))
            .await
            .map_err(|_elapsed| {
                RunnerError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            })?
    }
}

/// The canonical decline-to-act reply carrying `message`.
pub fn decline_text(message: &str) -> String {
    format!(
        "{INTENT_TAG} {}\n{TARGET_TAG} {GLOBAL_TARGET}\n{MESSAGE_TAG} {message}",
        Intent::DeclineToAct.label()
    )
}

fn technical_difficulties(error: &RunnerError) -> String {
    format!("(Technical difficulties prevented action: {error})")
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
