//! The turn orchestrator.
//!
//! A [`Simulation`] moves through `Idle -> Running(turn) -> Complete`, or
//! ends `Aborted` on an operator stop or a fatal error. Each turn draws a
//! fresh random order over the roster and runs every agent through
//! generate, parse, impact and commit, one at a time.
//!
//! Metric and graph changes for an agent are staged on copies, shown to the
//! observer, then committed. A failure before commit drops that agent's
//! action and leaves every earlier commit in place. Memory updates are held
//! back until the turn ends so no agent sees events from its own turn.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use concord_agents::{
    AgentError, CountryAgent, ImpactInput, RelationshipGraph, Scenario, actor_memory, apply_impact,
    received_memory, scenario,
};
use concord_runner::{ActionGenerator, CompletionBackend, GenerationRequest, parse_action};
use concord_types::{
    Action, ActionOrigin, ActionRecord, AgreementRecord, Metrics, RunId, RunSummary,
};

use crate::config::{ConfigError, SimulationSettings, TranscriptOrder};
use crate::observer::{ActionView, ObserverError, RunObserver};
use crate::operator::{OperatorHandle, SimulationEndReason};
use crate::report;

/// Message carried by the decline substituted for unusable tagged text.
pub const PARSE_ERROR_MESSAGE: &str = "(Parsing Error)";

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum RunPhase {
    /// Set up, not started.
    Idle,
    /// Executing the given 1-based turn.
    Running {
        /// Current turn.
        turn: u32,
    },
    /// Every configured turn ran.
    Complete,
    /// Ended early by an operator stop or a fatal error.
    Aborted,
}

/// Errors that end or prevent a run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The settings cannot start a run. Nothing was mutated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Agent or graph state rejected an update.
    #[error("agent state rejected an update: {0}")]
    Agent(#[from] AgentError),

    /// An observer failed; the in-flight action was dropped.
    #[error("observer failed: {0}")]
    Observer(#[from] ObserverError),

    /// An internal invariant did not hold.
    #[error("internal error: {0}")]
    Internal(String),

    /// [`Simulation::run`] was called on a run that already started.
    #[error("simulation has already run")]
    AlreadyRan,
}

/// Outcome of a run that was not aborted by an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Why the run ended.
    pub end_reason: SimulationEndReason,
    /// End-of-run statistics.
    pub summary: RunSummary,
}

/// Memory entry waiting for the end of the turn, keyed by roster position.
type PendingMemory = (usize, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnOutcome {
    Completed,
    Stopped,
}

/// One negotiation run and all the state it owns.
#[derive(Debug)]
pub struct Simulation {
    run_id: RunId,
    settings: SimulationSettings,
    scenario: &'static Scenario,
    agents: Vec<CountryAgent>,
    graph: RelationshipGraph,
    initial_metrics: Metrics,
    metrics: Metrics,
    actions: Vec<ActionRecord>,
    agreements: Vec<AgreementRecord>,
    phase: RunPhase,
    turns_completed: u32,
    started_at: DateTime<Utc>,
    rng: StdRng,
}

impl Simulation {
    /// Validate `settings` and set up a run in the `Idle` phase.
    ///
    /// Seeds the RNG from `settings.seed` when present, OS entropy otherwise.
    pub fn new(settings: SimulationSettings) -> Result<Self, SimulationError> {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(settings, rng)
    }

    /// Set up a run with an explicit RNG.
    pub fn with_rng(settings: SimulationSettings, rng: StdRng) -> Result<Self, SimulationError> {
        settings.validate()?;
        let agents = settings
            .roster
            .iter()
            .map(|name| CountryAgent::new(name))
            .collect::<Result<Vec<_>, _>>()?;
        let graph = RelationshipGraph::new(&settings.roster)?;
        let initial_metrics = Metrics::with_peace(settings.initial_peace);

        Ok(Self {
            run_id: RunId::new(),
            scenario: scenario(settings.scenario),
            settings,
            agents,
            graph,
            initial_metrics,
            metrics: initial_metrics,
            actions: Vec::new(),
            agreements: Vec::new(),
            phase: RunPhase::Idle,
            turns_completed: 0,
            started_at: Utc::now(),
            rng,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Identifier of this run.
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Settings the run was built from.
    pub const fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Active scenario.
    pub const fn scenario(&self) -> &'static Scenario {
        self.scenario
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Turns fully completed.
    pub const fn turns_completed(&self) -> u32 {
        self.turns_completed
    }

    /// When the run was set up.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Agents in roster order.
    pub fn agents(&self) -> &[CountryAgent] {
        &self.agents
    }

    /// Look up an agent by name.
    pub fn agent(&self, name: &str) -> Option<&CountryAgent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Relationship graph.
    pub const fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Metrics at run start.
    pub const fn initial_metrics(&self) -> &Metrics {
        &self.initial_metrics
    }

    /// Current metrics.
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Committed actions, oldest first.
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Committed agreement records, oldest first.
    pub fn agreements(&self) -> &[AgreementRecord] {
        &self.agreements
    }

    /// Statistics over the state committed so far.
    pub fn summary(&self) -> RunSummary {
        report::summarize(self)
    }

    /// Plain-text transcript of the committed action log.
    pub fn transcript(&self, order: TranscriptOrder, generated_at: DateTime<Utc>) -> String {
        report::render_transcript(self, order, generated_at)
    }

    // -----------------------------------------------------------------------
    // Turn loop
    // -----------------------------------------------------------------------

    /// Run every configured turn.
    ///
    /// Returns a report on completion or operator stop. On a fatal error the
    /// run is left `Aborted` with everything committed before the failure
    /// still readable through the accessors.
    pub async fn run<B, O>(
        &mut self,
        generator: &ActionGenerator<B>,
        observer: &mut O,
        operator: &OperatorHandle,
    ) -> Result<RunReport, SimulationError>
    where
        B: CompletionBackend,
        O: RunObserver + ?Sized,
    {
        if self.phase != RunPhase::Idle {
            return Err(SimulationError::AlreadyRan);
        }

        info!(
            run_id = %self.run_id,
            scenario = %self.settings.scenario,
            roster = ?self.settings.roster,
            turns = self.settings.turns,
            severity = self.settings.severity,
            seed = ?self.settings.seed,
            "simulation starting"
        );

        for turn in 1..=self.settings.turns {
            self.phase = RunPhase::Running { turn };
            let outcome = match self.run_turn(turn, generator, observer, operator).await {
                Ok(outcome) => outcome,
                Err(e) => return Err(self.abort(e)),
            };
            if outcome == TurnOutcome::Stopped {
                self.phase = RunPhase::Aborted;
                info!(turn, turns_completed = self.turns_completed, "operator stop honoured");
                return Ok(self.report(SimulationEndReason::OperatorStop));
            }
            self.turns_completed = turn;
            if let Err(e) = observer.on_turn_complete(turn) {
                return Err(self.abort(e.into()));
            }
        }

        self.phase = RunPhase::Complete;
        info!(
            run_id = %self.run_id,
            actions = self.actions.len(),
            agreements = self.agreements.len(),
            peace = self.metrics.peace_index,
            "simulation complete"
        );
        Ok(self.report(SimulationEndReason::Completed))
    }

    async fn run_turn<B, O>(
        &mut self,
        turn: u32,
        generator: &ActionGenerator<B>,
        observer: &mut O,
        operator: &OperatorHandle,
    ) -> Result<TurnOutcome, SimulationError>
    where
        B: CompletionBackend,
        O: RunObserver + ?Sized,
    {
        let mut order: Vec<usize> = (0..self.agents.len()).collect();
        order.shuffle(&mut self.rng);
        debug!(
            turn,
            order = ?order
                .iter()
                .filter_map(|&i| self.settings.roster.get(i))
                .collect::<Vec<_>>(),
            "turn order drawn"
        );

        let final_turn = turn == self.settings.turns;
        let delay = Duration::from_millis(self.settings.action_delay_ms);
        let mut pending: Vec<PendingMemory> = Vec::new();
        let mut outcome = TurnOutcome::Completed;

        for (position, &index) in order.iter().enumerate() {
            operator.wait_if_paused().await;
            if operator.is_stop_requested() {
                outcome = TurnOutcome::Stopped;
                break;
            }

            match self.run_agent_cycle(turn, index, generator, observer).await {
                Ok(memories) => pending.extend(memories),
                Err(e) => {
                    self.apply_memories(pending);
                    return Err(e);
                }
            }

            let last_action = final_turn && position.saturating_add(1) == order.len();
            if !last_action && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        self.apply_memories(pending);
        Ok(outcome)
    }

    /// Generate, parse, stage, observe and commit one agent's action.
    ///
    /// Returns the memory entries to record at the end of the turn.
    async fn run_agent_cycle<B, O>(
        &mut self,
        turn: u32,
        index: usize,
        generator: &ActionGenerator<B>,
        observer: &mut O,
    ) -> Result<Vec<PendingMemory>, SimulationError>
    where
        B: CompletionBackend,
        O: RunObserver + ?Sized,
    {
        let agent = self
            .agents
            .get(index)
            .ok_or_else(|| SimulationError::Internal(format!("no agent at roster position {index}")))?;
        let actor = agent.name().to_owned();

        let request = GenerationRequest {
            agent,
            scenario: self.scenario,
            turn,
            roster: &self.settings.roster,
            style: self.settings.style,
        };
        let generation = generator.act(&request).await;
        let (action, origin) = resolve_action(
            &generation.text,
            generation.origin,
            self.settings.strict_intents,
            turn,
            &actor,
        );

        // Stage on copies so a failure below leaves committed state untouched.
        let mut metrics = self.metrics;
        let mut graph = self.graph.clone();
        let impact = apply_impact(
            &ImpactInput {
                actor: &actor,
                intent: &action.intent,
                target: &action.target,
                message: &action.message,
                roster: &self.settings.roster,
                scenario_kind: self.scenario.kind,
                severity: self.settings.severity,
            },
            &mut metrics,
            &mut self.rng,
        );
        let peer = impact.relationship_peer.as_deref();
        if let Some(peer) = peer {
            graph.adjust(&actor, peer, impact.relationship_delta)?;
        }

        let mut memories = vec![(
            index,
            actor_memory(
                turn,
                &actor,
                &action.intent,
                &action.target,
                &action.message,
                &impact.description,
            ),
        )];
        if let Some(peer_index) =
            peer.and_then(|peer| self.settings.roster.iter().position(|name| name == peer))
        {
            memories.push((
                peer_index,
                received_memory(turn, &actor, &action.intent, &action.message),
            ));
        }

        let agreement = match (action.intent.known(), peer) {
            (Some(intent), Some(peer)) if intent.is_cooperative() => Some(AgreementRecord {
                actor: actor.clone(),
                target: peer.to_owned(),
                turn,
                intent,
                message: action.message.clone(),
            }),
            _ => None,
        };

        let record = ActionRecord {
            turn,
            recorded_at: Utc::now(),
            actor,
            intent: action.intent,
            target: action.target,
            message: action.message,
            impact: impact.description,
            relationship_delta: peer.map(|_| impact.relationship_delta),
            origin,
            backend: generation.backend,
        };

        let view = ActionView {
            entry: &record,
            agreement: agreement.as_ref(),
            metrics: &metrics,
            initial_metrics: &self.initial_metrics,
            graph: graph.snapshot(),
        };
        if let Err(e) = observer.on_action(&view) {
            error!(turn, actor = %record.actor, error = %e, "observer failed, dropping staged action");
            return Err(e.into());
        }

        info!(
            turn,
            agent = %record.actor,
            intent = %record.intent,
            target = %record.target,
            origin = ?record.origin,
            latency_ms = generation.latency_ms,
            "action committed"
        );
        self.metrics = metrics;
        self.graph = graph;
        self.actions.push(record);
        if let Some(agreement) = agreement {
            self.agreements.push(agreement);
        }
        Ok(memories)
    }

    fn apply_memories(&mut self, pending: Vec<PendingMemory>) {
        for (index, entry) in pending {
            if let Some(agent) = self.agents.get_mut(index) {
                agent.remember(entry);
            }
        }
    }

    fn abort(&mut self, error: SimulationError) -> SimulationError {
        self.phase = RunPhase::Aborted;
        error!(
            run_id = %self.run_id,
            turns_completed = self.turns_completed,
            actions = self.actions.len(),
            error = %error,
            "simulation aborted"
        );
        error
    }

    fn report(&self, end_reason: SimulationEndReason) -> RunReport {
        RunReport {
            end_reason,
            summary: self.summary(),
        }
    }
}

/// Turn generator text into the action the impact engine will apply.
///
/// Missing fields always fall back to a decline. An unrecognized intent
/// falls back too when `strict` is set, and passes through otherwise.
fn resolve_action(
    text: &str,
    origin: ActionOrigin,
    strict: bool,
    turn: u32,
    actor: &str,
) -> (Action, ActionOrigin) {
    match parse_action(text).into_action() {
        Some(action) if !strict || action.intent.known().is_some() => (action, origin),
        Some(action) => {
            warn!(turn, actor, intent = %action.intent, "unrecognized intent, declining");
            (Action::decline(PARSE_ERROR_MESSAGE), ActionOrigin::ParseError)
        }
        None => {
            warn!(turn, actor, text, "incomplete tagged text, declining");
            (Action::decline(PARSE_ERROR_MESSAGE), ActionOrigin::ParseError)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use concord_types::{ActionIntent, Intent, Target};

    use super::*;

    #[test]
    fn complete_text_passes_through() {
        let (action, origin) = resolve_action(
            "[Intent]: Propose a deal\n[Target]: China\n[Message]: Let us talk.",
            ActionOrigin::Backend,
            true,
            1,
            "USA",
        );
        assert_eq!(origin, ActionOrigin::Backend);
        assert_eq!(action.intent, ActionIntent::Known(Intent::ProposeDeal));
        assert_eq!(action.target, Target::Country("China".to_owned()));
    }

    #[test]
    fn missing_target_becomes_parse_error_decline() {
        let (action, origin) = resolve_action(
            "[Intent]: Respond\n[Message]: Fine.",
            ActionOrigin::Backend,
            true,
            1,
            "USA",
        );
        assert_eq!(origin, ActionOrigin::ParseError);
        assert_eq!(action, Action::decline(PARSE_ERROR_MESSAGE));
    }

    #[test]
    fn unrecognized_intent_depends_on_strictness() {
        let text = "[Intent]: Impose sanctions\n[Target]: Russia\n[Message]: Enough.";
        let (strict, strict_origin) = resolve_action(text, ActionOrigin::Backend, true, 2, "EU");
        assert_eq!(strict_origin, ActionOrigin::ParseError);
        assert_eq!(strict.target, Target::Global);

        let (lenient, lenient_origin) = resolve_action(text, ActionOrigin::Backend, false, 2, "EU");
        assert_eq!(lenient_origin, ActionOrigin::Backend);
        assert_eq!(
            lenient.intent,
            ActionIntent::Unrecognized("Impose sanctions".to_owned())
        );
    }

    #[test]
    fn generator_fallback_origin_is_kept() {
        let (action, origin) = resolve_action(
            "[Intent]: Decline to act\n[Target]: GLOBAL\n[Message]: (Technical difficulties prevented action: down)",
            ActionOrigin::BackendError,
            true,
            3,
            "India",
        );
        assert_eq!(origin, ActionOrigin::BackendError);
        assert_eq!(action.intent, ActionIntent::Known(Intent::DeclineToAct));
    }

    #[test]
    fn invalid_settings_are_refused_before_running() {
        let settings = SimulationSettings {
            roster: vec!["USA".to_owned()],
            ..SimulationSettings::default()
        };
        assert!(matches!(
            Simulation::new(settings),
            Err(SimulationError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn new_simulation_starts_idle_with_initial_metrics() {
        let settings = SimulationSettings {
            initial_peace: 0.3,
            seed: Some(9),
            ..SimulationSettings::default()
        };
        let sim = Simulation::new(settings).unwrap();
        assert_eq!(sim.phase(), RunPhase::Idle);
        assert!((sim.metrics().peace_index - 0.3).abs() < f64::EPSILON);
        assert_eq!(sim.metrics(), sim.initial_metrics());
        assert_eq!(sim.agents().len(), 2);
        assert_eq!(sim.graph().edge_count(), 0);
        assert!(sim.actions().is_empty());
    }
}
