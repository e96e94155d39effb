//! Enumeration types for the Concord simulation.
//!
//! The intent vocabulary is closed: agents may only choose one of the seven
//! [`Intent`] variants. Anything else the text backend produces is carried as
//! [`ActionIntent::Unrecognized`] so the caller can decide what to do with it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// A diplomatic intent an agent can declare for its action this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Intent {
    /// Offer a specific exchange or agreement.
    ProposeDeal,
    /// React to a previous proposal or action directed at the agent.
    Respond,
    /// Make a statement about the crisis or another nation's actions.
    Comment,
    /// Suggest cooperation or partnership.
    BuildAlliances,
    /// Ask for specific aid or support.
    RequestAssistance,
    /// Highlight a major issue needing collective attention.
    RaiseGlobalConcern,
    /// Pass the turn.
    DeclineToAct,
}

impl Intent {
    /// Every intent, in the order presented to agents.
    pub const ALL: [Self; 7] = [
        Self::ProposeDeal,
        Self::Respond,
        Self::Comment,
        Self::BuildAlliances,
        Self::RequestAssistance,
        Self::RaiseGlobalConcern,
        Self::DeclineToAct,
    ];

    /// The canonical label used in the tagged text format.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProposeDeal => "Propose a deal",
            Self::Respond => "Respond",
            Self::Comment => "Comment",
            Self::BuildAlliances => "Build alliances",
            Self::RequestAssistance => "Request assistance",
            Self::RaiseGlobalConcern => "Raise a global concern",
            Self::DeclineToAct => "Decline to act",
        }
    }

    /// Short explanation shown next to the label in agent prompts.
    pub const fn description(self) -> &'static str {
        match self {
            Self::ProposeDeal => "Offer a specific exchange or agreement",
            Self::Respond => {
                "React to a previous proposal or action directed at you - check memory"
            }
            Self::Comment => "Make a statement about the crisis or another nation's actions",
            Self::BuildAlliances => "Suggest cooperation or partnership",
            Self::RequestAssistance => "Ask for specific aid or support",
            Self::RaiseGlobalConcern => "Highlight a major issue needing collective attention",
            Self::DeclineToAct => "Pass the turn if no strategic move is beneficial",
        }
    }

    /// Match a label against the vocabulary.
    ///
    /// Only surrounding whitespace is ignored. Case must match exactly.
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL.into_iter().find(|intent| intent.label() == trimmed)
    }

    /// Deal and alliance intents: the cooperative group that lowers
    /// emissions, raises energy stability and reduces displacement.
    pub const fn is_cooperative(self) -> bool {
        matches!(self, Self::ProposeDeal | Self::BuildAlliances)
    }

    /// Concern and assistance-request intents: the distress group.
    pub const fn is_distress(self) -> bool {
        matches!(self, Self::RaiseGlobalConcern | Self::RequestAssistance)
    }
}

impl core::fmt::Display for Intent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// The intent attached to a parsed action.
///
/// Keeps the raw label when the backend produced something outside the
/// closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActionIntent {
    /// One of the seven known intents.
    Known(Intent),
    /// A label that did not match the vocabulary.
    Unrecognized(String),
}

impl ActionIntent {
    /// Classify a raw intent label.
    pub fn classify(label: &str) -> Self {
        Intent::from_label(label)
            .map_or_else(|| Self::Unrecognized(label.trim().to_owned()), Self::Known)
    }

    /// The known intent, if any.
    pub const fn known(&self) -> Option<Intent> {
        match self {
            Self::Known(intent) => Some(*intent),
            Self::Unrecognized(_) => None,
        }
    }

    /// Label for logs and transcripts.
    pub fn label(&self) -> &str {
        match self {
            Self::Known(intent) => intent.label(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<Intent> for ActionIntent {
    fn from(intent: Intent) -> Self {
        Self::Known(intent)
    }
}

impl core::fmt::Display for ActionIntent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Identifier of a crisis scenario in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum ScenarioId {
    /// Sea-level rise, extreme weather and failing harvests.
    ClimateCollapse,
    /// A novel airborne pathogen.
    GlobalPandemic,
    /// Simultaneous fossil supply disruption and slow renewable rollout.
    EnergyCrisis,
    /// Freshwater shortages across several regions.
    WaterWars,
    /// Mass displacement across continents.
    RefugeeCrisis,
    /// Competing blocs racing for general AI.
    AiColdWar,
}

impl ScenarioId {
    /// Every scenario in catalog order.
    pub const ALL: [Self; 6] = [
        Self::ClimateCollapse,
        Self::GlobalPandemic,
        Self::EnergyCrisis,
        Self::WaterWars,
        Self::RefugeeCrisis,
        Self::AiColdWar,
    ];

    /// Kebab-case key used in configuration files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::ClimateCollapse => "climate-collapse",
            Self::GlobalPandemic => "global-pandemic",
            Self::EnergyCrisis => "energy-crisis",
            Self::WaterWars => "water-wars",
            Self::RefugeeCrisis => "refugee-crisis",
            Self::AiColdWar => "ai-cold-war",
        }
    }
}

impl core::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Which secondary metric a scenario drives.
///
/// At most one secondary metric moves per action; economic growth always
/// moves regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ScenarioKind {
    /// Carbon emissions respond to diplomacy.
    Climate,
    /// Energy stability responds to diplomacy.
    Energy,
    /// Refugee migration responds to diplomacy.
    Refugee,
    /// No secondary metric.
    General,
}

// ---------------------------------------------------------------------------
// Negotiation style
// ---------------------------------------------------------------------------

/// A subtle behavioural hint rendered into every agent prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NegotiationStyle {
    /// Lean toward joint solutions.
    Cooperative,
    /// Lean toward securing national advantage.
    Competitive,
    /// No particular lean.
    #[default]
    Mixed,
}

impl NegotiationStyle {
    /// Prompt sentence for this style.
    pub const fn prompt_hint(self) -> &'static str {
        match self {
            Self::Cooperative => {
                "The mood among delegations favours cooperation; joint solutions are welcome, though your national interests still come first."
            }
            Self::Competitive => {
                "The mood among delegations is competitive; secure advantages for your country where you can."
            }
            Self::Mixed => {
                "Delegations are weighing cooperation against competition; balance both as your interests dictate."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Action origin
// ---------------------------------------------------------------------------

/// How the action recorded for an agent-turn came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActionOrigin {
    /// Parsed from well-formed backend output.
    Backend,
    /// The backend replied without the three required tags.
    MalformedOutput,
    /// Every configured backend returned an error.
    BackendError,
    /// The backend call exceeded its deadline.
    Timeout,
    /// Tags were present but the content could not be used.
    ParseError,
}
