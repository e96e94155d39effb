//! Observation hook invoked by the turn loop.
//!
//! An observer sees every agent action after it has been staged and before
//! it is committed. Returning an error aborts the run and drops the staged
//! action, so an observer that cannot keep up (a broken feed file, say)
//! never leaves the presentation layer behind the simulation state.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use concord_types::{ActionRecord, AgreementRecord, GraphSnapshot, Metrics};

/// Errors an observer may report.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// Writing to the sink failed.
    #[error("observer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The view could not be serialized.
    #[error("observer serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Any other observer-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Everything the presentation layer consumes after one agent action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionView<'a> {
    /// The staged log entry.
    pub entry: &'a ActionRecord,
    /// The staged agreement, if the action was a deal or alliance offer.
    pub agreement: Option<&'a AgreementRecord>,
    /// Metrics after the action.
    pub metrics: &'a Metrics,
    /// Metrics at run start.
    pub initial_metrics: &'a Metrics,
    /// Relationship graph after the action.
    pub graph: GraphSnapshot,
}

/// Receives progress from the turn loop.
pub trait RunObserver: Send {
    /// Called after each agent action is staged. An error aborts the run.
    fn on_action(&mut self, view: &ActionView<'_>) -> Result<(), ObserverError>;

    /// Called after every agent in `turn` has acted and memories are updated.
    fn on_turn_complete(&mut self, turn: u32) -> Result<(), ObserverError> {
        let _ = turn;
        Ok(())
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RunObserver for NoOpObserver {
    fn on_action(&mut self, _view: &ActionView<'_>) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Observer that emits one structured log line per action.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_action(&mut self, view: &ActionView<'_>) -> Result<(), ObserverError> {
        let entry = view.entry;
        info!(
            turn = entry.turn,
            actor = %entry.actor,
            intent = %entry.intent,
            target = %entry.target,
            origin = ?entry.origin,
            peace = view.metrics.peace_index,
            growth = view.metrics.economic_growth_pct,
            edges = view.graph.edges.len(),
            "{}",
            entry.impact
        );
        if let Some(agreement) = view.agreement {
            info!(
                turn = agreement.turn,
                actor = %agreement.actor,
                target = %agreement.target,
                intent = %agreement.intent,
                "agreement recorded"
            );
        }
        Ok(())
    }

    fn on_turn_complete(&mut self, turn: u32) -> Result<(), ObserverError> {
        info!(turn, "turn complete");
        Ok(())
    }
}

/// Observer that writes one JSON object per action to `W`.
///
/// Intended for dashboards tailing a feed file.
#[derive(Debug)]
pub struct JsonLinesObserver<W> {
    sink: W,
}

impl<W: Write + Send> JsonLinesObserver<W> {
    /// Wrap a writer.
    pub const fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write + Send> RunObserver for JsonLinesObserver<W> {
    fn on_action(&mut self, view: &ActionView<'_>) -> Result<(), ObserverError> {
        serde_json::to_writer(&mut self.sink, view)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }
}

/// Fans every callback out to two observers, stopping at the first error.
#[derive(Debug, Default)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: RunObserver, B: RunObserver> Chain<A, B> {
    /// Combine two observers.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: RunObserver, B: RunObserver> RunObserver for Chain<A, B> {
    fn on_action(&mut self, view: &ActionView<'_>) -> Result<(), ObserverError> {
        self.first.on_action(view)?;
        self.second.on_action(view)
    }

    fn on_turn_complete(&mut self, turn: u32) -> Result<(), ObserverError> {
        self.first.on_turn_complete(turn)?;
        self.second.on_turn_complete(turn)
    }
}

impl<O: RunObserver + ?Sized> RunObserver for Box<O> {
    fn on_action(&mut self, view: &ActionView<'_>) -> Result<(), ObserverError> {
        (**self).on_action(view)
    }

    fn on_turn_complete(&mut self, turn: u32) -> Result<(), ObserverError> {
        (**self).on_turn_complete(turn)
    }
}
