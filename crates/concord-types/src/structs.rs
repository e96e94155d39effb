//! World-state and summary structs.
//!
//! [`Metrics`] is a fixed-shape record rather than a name/value map, so every
//! indicator exists after every update. Deserializing a partial document fills
//! missing indicators with their starting values.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ScenarioId;
use crate::ids::RunId;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Lower bound of the peace index.
pub const PEACE_MIN: f64 = 0.05;
/// Upper bound of the peace index.
pub const PEACE_MAX: f64 = 0.95;
/// Floor for carbon emissions in gigatonnes.
pub const CARBON_FLOOR: f64 = 10.0;
/// Lower bound of the energy stability index.
pub const ENERGY_MIN: f64 = 0.1;
/// Upper bound of the energy stability index.
pub const ENERGY_MAX: f64 = 0.9;
/// Floor for economic growth in percent.
pub const GROWTH_FLOOR: f64 = -15.0;

/// The five global indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct Metrics {
    /// Overall stability, in [0.05, 0.95].
    pub peace_index: f64,
    /// Gigatonnes of CO2, at least 10.
    pub carbon_emissions_gt: f64,
    /// Millions of displaced people.
    pub refugee_migration_m: u32,
    /// Energy stability, in [0.1, 0.9].
    pub energy_stability: f64,
    /// Percent growth, at least -15, one decimal.
    pub economic_growth_pct: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            peace_index: 0.5,
            carbon_emissions_gt: 35.0,
            refugee_migration_m: 20,
            energy_stability: 0.6,
            economic_growth_pct: 2.5,
        }
    }
}

impl Metrics {
    /// Starting metrics with the given peace index, clamped into range.
    pub fn with_peace(initial_peace: f64) -> Self {
        Self {
            peace_index: initial_peace.clamp(PEACE_MIN, PEACE_MAX),
            ..Self::default()
        }
    }

    /// Change from `initial` to `self`.
    pub fn delta_from(&self, initial: &Self) -> MetricsDelta {
        MetricsDelta {
            peace_index: self.peace_index - initial.peace_index,
            carbon_emissions_gt: self.carbon_emissions_gt - initial.carbon_emissions_gt,
            refugee_migration_m: i64::from(self.refugee_migration_m)
                .saturating_sub(i64::from(initial.refugee_migration_m)),
            energy_stability: self.energy_stability - initial.energy_stability,
            economic_growth_pct: round_one_decimal(
                self.economic_growth_pct - initial.economic_growth_pct,
            ),
        }
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Difference between two metric snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MetricsDelta {
    /// Change in peace index.
    pub peace_index: f64,
    /// Change in carbon emissions.
    pub carbon_emissions_gt: f64,
    /// Change in displaced millions.
    #[ts(type = "number")]
    pub refugee_migration_m: i64,
    /// Change in energy stability.
    pub energy_stability: f64,
    /// Change in growth, one decimal.
    pub economic_growth_pct: f64,
}

// ---------------------------------------------------------------------------
// Relationship graph snapshot
// ---------------------------------------------------------------------------

/// One weighted edge between two nations.
///
/// `a` sorts before `b`; the pair is unordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EdgeSnapshot {
    /// First endpoint.
    pub a: String,
    /// Second endpoint.
    pub b: String,
    /// Trust score in [-1.0, 1.0].
    pub weight: f64,
}

/// Point-in-time view of the relationship graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GraphSnapshot {
    /// Nodes in roster order.
    pub nodes: Vec<String>,
    /// Every edge that has been touched, in pair order.
    pub edges: Vec<EdgeSnapshot>,
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// End-of-run statistics handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunSummary {
    /// The run these statistics describe.
    pub run_id: RunId,
    /// Active scenario.
    pub scenario: ScenarioId,
    /// Scenario display name.
    pub scenario_name: String,
    /// Turns fully completed.
    pub turns_completed: u32,
    /// Participating nations in roster order.
    pub roster: Vec<String>,
    /// Actions logged per completed turn.
    pub actions_per_turn: u32,
    /// Total actions in the log.
    pub total_actions: u32,
    /// Total agreement records.
    pub agreements: u32,
    /// Node with the highest degree, first in roster order on ties.
    pub most_connected: Option<String>,
    /// Node with the lowest degree, first in roster order on ties.
    pub least_connected: Option<String>,
    /// `2E / (N(N-1))`.
    pub density: f64,
    /// Number of connected components.
    pub components: u32,
    /// Strongest edge with weight above 0.1.
    pub strongest_pair: Option<EdgeSnapshot>,
    /// Metrics at run start.
    pub initial_metrics: Metrics,
    /// Metrics at run end.
    pub final_metrics: Metrics,
    /// `final_metrics - initial_metrics`.
    pub delta: MetricsDelta,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_starting_world() {
        let metrics = Metrics::default();
        assert!((metrics.peace_index - 0.5).abs() < f64::EPSILON);
        assert!((metrics.carbon_emissions_gt - 35.0).abs() < f64::EPSILON);
        assert_eq!(metrics.refugee_migration_m, 20);
        assert!((metrics.energy_stability - 0.6).abs() < f64::EPSILON);
        assert!((metrics.economic_growth_pct - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_document_is_default_filled() {
        let metrics: Metrics = serde_json::from_str(r#"{"peace_index": 0.7}"#).unwrap();
        assert!((metrics.peace_index - 0.7).abs() < f64::EPSILON);
        assert_eq!(metrics.refugee_migration_m, 20);
        assert!((metrics.carbon_emissions_gt - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn with_peace_clamps_initial_value() {
        assert!((Metrics::with_peace(0.99).peace_index - PEACE_MAX).abs() < f64::EPSILON);
        assert!((Metrics::with_peace(0.3).peace_index - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn delta_tracks_refugee_decrease() {
        let initial = Metrics::default();
        let current = Metrics {
            refugee_migration_m: 17,
            economic_growth_pct: 2.1,
            ..initial
        };
        let delta = current.delta_from(&initial);
        assert_eq!(delta.refugee_migration_m, -3);
        assert!((delta.economic_growth_pct + 0.4).abs() < 1e-9);
    }
}
