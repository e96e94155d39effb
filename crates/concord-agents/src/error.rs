//! Error types for the concord-agents crate.

/// Errors raised by catalog lookups and relationship graph updates.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The name does not match any profile in the catalog.
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// A relationship edge was requested between a node and itself.
    #[error("self-loop rejected for {0}")]
    SelfLoop(String),

    /// A relationship edge named a node outside the graph.
    #[error("{0} is not a node in the relationship graph")]
    UnknownNode(String),

    /// A roster contained the same nation twice.
    #[error("duplicate roster entry: {0}")]
    DuplicateMember(String),
}
