//! Country agents, relationship graph and impact engine for Concord.
//!
//! This crate is the logic layer beneath the orchestrator. Nothing here
//! performs I/O; randomness is always injected by the caller.
//!
//! # Modules
//!
//! - [`catalog`] -- Static country profiles and crisis scenarios
//! - [`agent`] -- [`CountryAgent`] and its memory framings
//! - [`memory`] -- Bounded FIFO event memory ([`MemoryLog`])
//! - [`relations`] -- Weighted undirected graph and its statistics
//! - [`impact`] -- Action-to-metric state transition ([`apply_impact`])
//! - [`error`] -- Error types ([`AgentError`])

pub mod agent;
pub mod catalog;
pub mod error;
pub mod impact;
pub mod memory;
pub mod relations;

pub use agent::{CountryAgent, actor_memory, received_memory};
pub use catalog::{
    COUNTRY_PROFILES, CountryProfile, Scenario, available_countries, profile, scenario,
};
pub use error::AgentError;
pub use impact::{ImpactInput, ImpactOutcome, apply_impact};
pub use memory::{MEMORY_CAPACITY, MemoryLog, PROMPT_WINDOW};
pub use relations::{RelationshipGraph, STRONG_TIE_THRESHOLD};
