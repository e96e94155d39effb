//! Shared type definitions for the Concord negotiation simulator.
//!
//! Everything the presentation layer consumes is defined here and exported
//! to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- UUID wrapper identifying a run
//! - [`enums`] -- Intents, scenarios, styles and action origins
//! - [`actions`] -- Actions, targets and the log records they produce
//! - [`structs`] -- Metrics, graph snapshots and the run summary

pub mod actions;
pub mod enums;
pub mod ids;
pub mod structs;

pub use actions::{Action, ActionRecord, AgreementRecord, GLOBAL_TARGET, Target};
pub use enums::{
    ActionIntent, ActionOrigin, Intent, NegotiationStyle, ScenarioId, ScenarioKind,
};
pub use ids::RunId;
pub use structs::{
    CARBON_FLOOR, ENERGY_MAX, ENERGY_MIN, EdgeSnapshot, GROWTH_FLOOR, GraphSnapshot, Metrics,
    MetricsDelta, PEACE_MAX, PEACE_MIN, RunSummary, round_one_decimal,
};
