//! Configuration, turn orchestration and reporting for Concord.
//!
//! This crate owns the run lifecycle: it loads and validates settings,
//! drives every agent through generate, parse, impact and commit for each
//! turn, and turns the committed state into a summary and a transcript.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `concord-config.yaml` into
//!   strongly-typed structs.
//! - [`observer`] -- [`RunObserver`] hook with no-op, tracing and JSON-lines
//!   implementations.
//! - [`operator`] -- [`OperatorHandle`] for pause, resume and stop.
//! - [`report`] -- Run summary statistics and transcript rendering.
//! - [`simulation`] -- The [`Simulation`] state machine and turn loop.

pub mod config;
pub mod observer;
pub mod operator;
pub mod report;
pub mod simulation;

pub use config::{
    ConfigError, GenerationConfig, LogFormat, LoggingConfig, OutputConfig, SimulationConfig,
    SimulationSettings, TranscriptOrder,
};
pub use observer::{
    ActionView, Chain, JsonLinesObserver, NoOpObserver, ObserverError, RunObserver,
    TracingObserver,
};
pub use operator::{OperatorHandle, SimulationEndReason};
pub use simulation::{PARSE_ERROR_MESSAGE, RunPhase, RunReport, Simulation, SimulationError};
