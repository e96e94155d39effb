//! Country agents and the memory entries they record.
//!
//! All agents share one type; they differ only in the profile they carry.

use concord_types::{ActionIntent, Target};

use crate::catalog::{self, CountryProfile};
use crate::error::AgentError;
use crate::memory::{MemoryLog, PROMPT_WINDOW};

/// One participating nation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryAgent {
    name: String,
    profile: &'static CountryProfile,
    memory: MemoryLog,
}

impl CountryAgent {
    /// Create an agent from its catalog profile.
    pub fn new(name: &str) -> Result<Self, AgentError> {
        let profile = catalog::profile(name)?;
        Ok(Self::from_profile(profile))
    }

    /// Create an agent for a profile that is already resolved.
    pub fn from_profile(profile: &'static CountryProfile) -> Self {
        Self {
            name: profile.name.to_owned(),
            profile,
            memory: MemoryLog::new(),
        }
    }

    /// Nation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Static profile data.
    pub const fn profile(&self) -> &'static CountryProfile {
        self.profile
    }

    /// Append an event to this agent's memory.
    pub fn remember(&mut self, entry: impl Into<String>) {
        self.memory.push(entry);
    }

    /// The entries shown to the generator, oldest first.
    pub fn recent_memory(&self) -> Vec<&str> {
        self.memory.recent(PROMPT_WINDOW).collect()
    }

    /// Full memory log.
    pub const fn memory(&self) -> &MemoryLog {
        &self.memory
    }
}

/// Memory line recorded by the acting nation.
pub fn actor_memory(
    turn: u32,
    actor: &str,
    intent: &ActionIntent,
    target: &Target,
    message: &str,
    impact: &str,
) -> String {
    format!("Turn {turn}: {actor} - Intent: {intent}, Target: {target}, Msg: '{message}', Impact: {impact}")
}

/// Memory line recorded by the nation an action was aimed at.
pub fn received_memory(turn: u32, actor: &str, intent: &ActionIntent, message: &str) -> String {
    format!("Turn {turn}: Received from {actor} - Intent: {intent}, Msg: '{message}'")
}
