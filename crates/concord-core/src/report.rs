//! End-of-run summary and the plain-text transcript.

use chrono::{DateTime, Utc};

use concord_types::{ActionRecord, RunSummary};

use crate::config::TranscriptOrder;
use crate::simulation::Simulation;

/// First line of every transcript.
pub const TRANSCRIPT_TITLE: &str = "Concord Negotiation Transcript";

/// Separator between transcript sections and between action blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Compute statistics over the state `sim` has committed so far.
pub fn summarize(sim: &Simulation) -> RunSummary {
    let settings = sim.settings();
    let graph = sim.graph();
    let initial_metrics = *sim.initial_metrics();
    let final_metrics = *sim.metrics();

    RunSummary {
        run_id: sim.run_id(),
        scenario: settings.scenario,
        scenario_name: sim.scenario().name.to_owned(),
        turns_completed: sim.turns_completed(),
        roster: settings.roster.clone(),
        actions_per_turn: count(settings.roster.len()),
        total_actions: count(sim.actions().len()),
        agreements: count(sim.agreements().len()),
        most_connected: graph.most_connected().map(str::to_owned),
        least_connected: graph.least_connected().map(str::to_owned),
        density: graph.density(),
        components: count(graph.components()),
        strongest_pair: graph.strongest_pair(),
        initial_metrics,
        final_metrics,
        delta: final_metrics.delta_from(&initial_metrics),
    }
}

/// Render the committed action log as human-readable text.
///
/// A header (title, scenario, turns, nations, date) is followed by one block
/// per action in the requested order.
pub fn render_transcript(
    sim: &Simulation,
    order: TranscriptOrder,
    generated_at: DateTime<Utc>,
) -> String {
    let settings = sim.settings();
    let heading = match order {
        TranscriptOrder::Chronological => "AGENT ACTION LOG (Chronological)",
        TranscriptOrder::NewestFirst => "AGENT ACTION LOG (Newest First)",
    };

    let mut out = format!(
        "{TRANSCRIPT_TITLE}\nScenario: {}\nTurns: {} of {}\nNations: {}\nDate: {}{BLOCK_SEPARATOR}{heading}:\n\n",
        sim.scenario().name,
        sim.turns_completed(),
        settings.turns,
        settings.roster.join(", "),
        generated_at.format("%Y-%m-%d %H:%M"),
    );

    let blocks: Vec<String> = match order {
        TranscriptOrder::Chronological => sim.actions().iter().map(render_block).collect(),
        TranscriptOrder::NewestFirst => sim.actions().iter().rev().map(render_block).collect(),
    };
    out.push_str(&blocks.join(BLOCK_SEPARATOR));
    out
}

/// Render one action as a transcript block. Blank lines are dropped and
/// remaining lines trimmed.
pub fn render_block(record: &ActionRecord) -> String {
    let raw = format!(
        "Turn {} \u{2022} {} \u{2022} {}\nIntent: {} | Target: {}\nMessage: \"{}\"\nImpact: {}",
        record.turn,
        record.recorded_at.format("%H:%M:%S"),
        record.actor,
        record.intent,
        record.target,
        record.message,
        record.impact,
    );
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
