//! Action types exchanged between the generator, the impact engine and the
//! presentation layer.
//!
//! An [`Action`] lives for a single agent-turn. What survives the turn is the
//! [`ActionRecord`] in the run log and, for cooperative moves aimed at a peer,
//! an [`AgreementRecord`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionIntent, ActionOrigin, Intent};

/// Sentinel target label meaning "all nations".
pub const GLOBAL_TARGET: &str = "GLOBAL";

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Who an action is directed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Target {
    /// Every nation at once. Never touches the relationship graph.
    Global,
    /// A named nation. May or may not be on the roster.
    Country(String),
}

impl Target {
    /// Interpret a raw target label. `GLOBAL` matches case-insensitively.
    ///
    /// Returns `None` for an empty label.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.eq_ignore_ascii_case(GLOBAL_TARGET) {
            Some(Self::Global)
        } else {
            Some(Self::Country(trimmed.to_owned()))
        }
    }

    /// Label used in prompts, logs and transcripts.
    pub fn label(&self) -> &str {
        match self {
            Self::Global => GLOBAL_TARGET,
            Self::Country(name) => name,
        }
    }

    /// The named country, if this is not the global sentinel.
    pub fn country(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Country(name) => Some(name),
        }
    }
}

impl core::fmt::Display for Target {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A structured diplomatic action for one agent-turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Action {
    /// What the agent intends.
    pub intent: ActionIntent,
    /// Who the action is aimed at.
    pub target: Target,
    /// Free-text diplomatic message, possibly multi-line.
    pub message: String,
}

impl Action {
    /// The canonical substitute: decline to act, aimed at everyone.
    pub fn decline(message: impl Into<String>) -> Self {
        Self {
            intent: ActionIntent::Known(Intent::DeclineToAct),
            target: Target::Global,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Log records
// ---------------------------------------------------------------------------

/// One entry in the run's action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionRecord {
    /// 1-based turn number.
    pub turn: u32,
    /// When the action was committed.
    pub recorded_at: DateTime<Utc>,
    /// Acting nation.
    pub actor: String,
    /// Intent as applied by the impact engine.
    pub intent: ActionIntent,
    /// Target as applied by the impact engine.
    pub target: Target,
    /// The diplomatic message.
    pub message: String,
    /// Narrative impact description produced by the impact engine.
    pub impact: String,
    /// Relationship change applied to the actor/target edge, if any.
    pub relationship_delta: Option<f64>,
    /// How the action came about.
    pub origin: ActionOrigin,
    /// Name of the backend that produced the text, if one answered.
    pub backend: Option<String>,
}

/// A deal or alliance offered to a specific nation.
///
/// Purely observational: nothing in the simulation reads these back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgreementRecord {
    /// The proposing nation.
    pub actor: String,
    /// The nation the offer was made to.
    pub target: String,
    /// Turn the offer was made.
    pub turn: u32,
    /// Either [`Intent::ProposeDeal`] or [`Intent::BuildAlliances`].
    pub intent: Intent,
    /// The offer text.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_target_matches_any_case() {
        assert_eq!(Target::parse("global"), Some(Target::Global));
        assert_eq!(Target::parse(" GLOBAL "), Some(Target::Global));
        assert_eq!(
            Target::parse(" China "),
            Some(Target::Country("China".to_owned()))
        );
        assert_eq!(Target::parse("   "), None);
    }

    #[test]
    fn decline_targets_global() {
        let action = Action::decline("(Parsing Error)");
        assert_eq!(action.intent, ActionIntent::Known(Intent::DeclineToAct));
        assert_eq!(action.target, Target::Global);
    }
}
