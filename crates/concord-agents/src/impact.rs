//! Impact engine: maps one structured action onto metric and relationship
//! changes.
//!
//! The shape of every change is fixed by the intent; only magnitudes are
//! drawn from the injected RNG. Order of evaluation:
//!
//! 1. Peace index moves by the intent's formula and is clamped.
//! 2. At most one scenario-specific metric moves, using the *updated* peace.
//! 3. Economic growth always moves, then rounds to one decimal.
//!
//! A relationship delta is produced only when the target is a roster member
//! other than the actor.

use rand::Rng;

use concord_types::{
    ActionIntent, CARBON_FLOOR, ENERGY_MAX, ENERGY_MIN, GROWTH_FLOOR, Intent, Metrics, PEACE_MAX,
    PEACE_MIN, ScenarioKind, Target, round_one_decimal,
};

/// Peace index around which secondary metrics neither improve nor degrade.
const PEACE_PIVOT: f64 = 0.55;

/// Everything the engine needs to know about one action.
#[derive(Debug, Clone, Copy)]
pub struct ImpactInput<'a> {
    /// Acting nation.
    pub actor: &'a str,
    /// Declared intent, possibly outside the vocabulary.
    pub intent: &'a ActionIntent,
    /// Action target.
    pub target: &'a Target,
    /// Diplomatic message. Does not influence magnitudes.
    pub message: &'a str,
    /// Participating nations.
    pub roster: &'a [String],
    /// Which secondary metric the scenario drives.
    pub scenario_kind: ScenarioKind,
    /// Crisis severity, 1 to 10.
    pub severity: u8,
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactOutcome {
    /// Narrative description for the log.
    pub description: String,
    /// Change to apply to the actor/peer edge. Zero when there is no peer.
    pub relationship_delta: f64,
    /// Roster member whose edge with the actor is affected.
    pub relationship_peer: Option<String>,
}

/// Apply an action to `metrics` and return its narrative and relationship
/// effect.
pub fn apply_impact<R: Rng + ?Sized>(
    input: &ImpactInput<'_>,
    metrics: &mut Metrics,
    rng: &mut R,
) -> ImpactOutcome {
    let actor = input.actor;
    let target = input.target.label();
    let peer = resolve_peer(input);
    let has_peer = peer.is_some();
    let severity = severity_factor(input.severity);
    let peace = metrics.peace_index;

    let (description, peace_change, relationship_delta) = match input.intent.known() {
        Some(Intent::ProposeDeal) => {
            let suffix = if has_peer {
                "Potential for mutual benefit."
            } else {
                "Global cooperation suggested."
            };
            (
                format!("{actor} proposed a deal to {target}. {suffix}"),
                rng.random_range(0.005..0.015) * (1.1 - peace),
                peer_delta(rng, has_peer, 0.05, 0.15),
            )
        }
        Some(Intent::Respond) => {
            let mut description = format!("{actor} responded regarding {target}.");
            if has_peer {
                description.push_str(" Dialogue continues.");
            }
            (
                description,
                rng.random_range(-0.01..0.01),
                peer_delta(rng, has_peer, -0.05, 0.05),
            )
        }
        Some(Intent::Comment) => (
            format!("{actor} commented on the situation regarding {target}."),
            rng.random_range(-0.005..0.005),
            0.0,
        ),
        Some(Intent::BuildAlliances) => {
            let suffix = if has_peer {
                "Strengthening ties."
            } else {
                "Promoting general cooperation."
            };
            (
                format!("{actor} seeks to build an alliance with {target}. {suffix}"),
                rng.random_range(0.01..0.02) * (1.1 - peace),
                peer_delta(rng, has_peer, 0.1, 0.2),
            )
        }
        Some(Intent::RequestAssistance) => {
            let suffix = if has_peer {
                "Seeking support."
            } else {
                "Highlighting global need."
            };
            (
                format!("{actor} requested assistance from {target}. {suffix}"),
                -rng.random_range(0.005..0.015) * (1.0 + severity),
                peer_delta(rng, has_peer, -0.05, 0.02),
            )
        }
        Some(Intent::RaiseGlobalConcern) => (
            format!("{actor} raised a global concern."),
            rng.random_range(-0.02..0.005) * (1.0 + severity),
            0.0,
        ),
        Some(Intent::DeclineToAct) => (format!("{actor} chose to observe this turn."), 0.0, 0.0),
        None => (
            format!("{actor} took an unrecognized action ({}).", input.intent),
            rng.random_range(-0.01..0.01),
            0.0,
        ),
    };

    metrics.peace_index = (peace + peace_change).clamp(PEACE_MIN, PEACE_MAX);
    let group = IntentGroup::of(input.intent);

    match input.scenario_kind {
        ScenarioKind::Climate => apply_carbon(metrics, group, rng),
        ScenarioKind::Energy => apply_energy(metrics, group, rng),
        ScenarioKind::Refugee => apply_refugees(metrics, group, rng),
        ScenarioKind::General => {}
    }
    apply_growth(metrics, group, severity, rng);

    tracing::debug!(
        actor,
        intent = %input.intent,
        target,
        peace_change,
        relationship_delta,
        peace = metrics.peace_index,
        "impact applied"
    );

    ImpactOutcome {
        description,
        relationship_delta,
        relationship_peer: peer,
    }
}

/// Severity 1..=10 scaled to 0.1..=1.0.
fn severity_factor(severity: u8) -> f64 {
    f64::from(severity) / 10.0
}

fn resolve_peer(input: &ImpactInput<'_>) -> Option<String> {
    input
        .target
        .country()
        .filter(|name| *name != input.actor && input.roster.iter().any(|m| m == name))
        .map(str::to_owned)
}

fn peer_delta<R: Rng + ?Sized>(rng: &mut R, has_peer: bool, low: f64, high: f64) -> f64 {
    if has_peer {
        rng.random_range(low..high)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Secondary metrics
// ---------------------------------------------------------------------------

/// Intent grouping shared by every secondary-metric rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntentGroup {
    /// Deal or alliance.
    Cooperative,
    /// Concern or assistance request.
    Distress,
    /// Everything else, including unrecognized intents.
    Neutral,
}

impl IntentGroup {
    fn of(intent: &ActionIntent) -> Self {
        match intent.known() {
            Some(i) if i.is_cooperative() => Self::Cooperative,
            Some(i) if i.is_distress() => Self::Distress,
            _ => Self::Neutral,
        }
    }
}

fn apply_carbon<R: Rng + ?Sized>(metrics: &mut Metrics, group: IntentGroup, rng: &mut R) {
    let peace = metrics.peace_index;
    let bias = match group {
        IntentGroup::Cooperative => -0.05,
        IntentGroup::Distress => 0.05,
        IntentGroup::Neutral => 0.0,
    };
    let change = rng.random_range(-0.05..0.3) + (PEACE_PIVOT - peace) * 0.3 + bias;
    metrics.carbon_emissions_gt = (metrics.carbon_emissions_gt + change).max(CARBON_FLOOR);
}

fn apply_energy<R: Rng + ?Sized>(metrics: &mut Metrics, group: IntentGroup, rng: &mut R) {
    let peace = metrics.peace_index;
    let bias = match group {
        IntentGroup::Cooperative => 0.02,
        IntentGroup::Distress => -0.02,
        IntentGroup::Neutral => 0.0,
    };
    let change = (peace - 0.5) * 0.04 + rng.random_range(-0.02..0.02) + bias;
    metrics.energy_stability = (metrics.energy_stability + change).clamp(ENERGY_MIN, ENERGY_MAX);
}

fn apply_refugees<R: Rng + ?Sized>(metrics: &mut Metrics, group: IntentGroup, rng: &mut R) {
    let peace = metrics.peace_index;
    let current = metrics.refugee_migration_m;
    metrics.refugee_migration_m = match group {
        IntentGroup::Cooperative => {
            let multiplier = if peace > 0.6 { 2 } else { 1 };
            let decrease = rng.random_range(0..=2_u32).saturating_mul(multiplier);
            current.saturating_sub(decrease)
        }
        IntentGroup::Distress => {
            let multiplier = if peace < 0.4 { 2 } else { 1 };
            let increase = rng.random_range(0..=1_u32).saturating_mul(multiplier);
            current.saturating_add(increase)
        }
        IntentGroup::Neutral => current.saturating_add_signed(rng.random_range(-1..=1_i32)),
    };
}

fn apply_growth<R: Rng + ?Sized>(
    metrics: &mut Metrics,
    group: IntentGroup,
    severity: f64,
    rng: &mut R,
) {
    let peace = metrics.peace_index;
    let intent_bonus = match group {
        IntentGroup::Cooperative => 0.05,
        IntentGroup::Distress => -0.03,
        IntentGroup::Neutral => 0.0,
    };
    let drift = (peace - PEACE_PIVOT) * 0.25 - severity * 0.1;
    let next = metrics.economic_growth_pct + drift + intent_bonus + rng.random_range(-0.08..0.08);
    metrics.economic_growth_pct = round_one_decimal(next.max(GROWTH_FLOOR));
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn roster() -> Vec<String> {
        vec!["USA".to_owned(), "China".to_owned(), "India".to_owned()]
    }

    fn input<'a>(
        intent: &'a ActionIntent,
        target: &'a Target,
        roster: &'a [String],
        kind: ScenarioKind,
    ) -> ImpactInput<'a> {
        ImpactInput {
            actor: "USA",
            intent,
            target,
            message: "We propose cooperation.",
            roster,
            scenario_kind: kind,
            severity: 5,
        }
    }

    fn is_one_decimal(value: f64) -> bool {
        (value * 10.0 - (value * 10.0).round()).abs() < 1e-9
    }

    #[test]
    fn deal_to_peer_raises_peace_and_trust() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::ProposeDeal);
        let target = Target::Country("China".to_owned());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut metrics = Metrics::default();
            let outcome = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::General),
                &mut metrics,
                &mut rng,
            );
            assert!(metrics.peace_index > 0.5);
            assert!(outcome.relationship_delta >= 0.05 && outcome.relationship_delta < 0.15);
            assert_eq!(outcome.relationship_peer.as_deref(), Some("China"));
            assert_eq!(
                outcome.description,
                "USA proposed a deal to China. Potential for mutual benefit."
            );
        }
    }

    #[test]
    fn global_target_never_produces_a_peer() {
        let roster = roster();
        let target = Target::Global;
        let mut rng = StdRng::seed_from_u64(11);
        for intent in Intent::ALL {
            let intent = ActionIntent::Known(intent);
            let mut metrics = Metrics::default();
            let outcome = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::General),
                &mut metrics,
                &mut rng,
            );
            assert!(outcome.relationship_peer.is_none());
            assert!(outcome.relationship_delta.abs() < f64::EPSILON);
        }
    }

    #[test]
    fn self_and_outsider_targets_never_produce_a_peer() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::BuildAlliances);
        let mut rng = StdRng::seed_from_u64(3);
        for name in ["USA", "Atlantis"] {
            let target = Target::Country(name.to_owned());
            let mut metrics = Metrics::default();
            let outcome = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::General),
                &mut metrics,
                &mut rng,
            );
            assert!(outcome.relationship_peer.is_none());
            assert!(outcome.relationship_delta.abs() < f64::EPSILON);
            assert!(outcome.description.ends_with("Promoting general cooperation."));
        }
    }

    #[test]
    fn comment_to_peer_touches_edge_without_delta() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::Comment);
        let target = Target::Country("India".to_owned());
        let mut metrics = Metrics::default();
        let outcome = apply_impact(
            &input(&intent, &target, &roster, ScenarioKind::General),
            &mut metrics,
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(outcome.relationship_peer.as_deref(), Some("India"));
        assert!(outcome.relationship_delta.abs() < f64::EPSILON);
    }

    #[test]
    fn decline_leaves_peace_untouched() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::DeclineToAct);
        let target = Target::Global;
        let mut metrics = Metrics::with_peace(0.42);
        let outcome = apply_impact(
            &input(&intent, &target, &roster, ScenarioKind::General),
            &mut metrics,
            &mut StdRng::seed_from_u64(5),
        );
        assert!((metrics.peace_index - 0.42).abs() < f64::EPSILON);
        assert_eq!(outcome.description, "USA chose to observe this turn.");
    }

    #[test]
    fn unrecognized_intent_is_described() {
        let roster = roster();
        let intent = ActionIntent::Unrecognized("Threaten".to_owned());
        let target = Target::Country("China".to_owned());
        let mut metrics = Metrics::default();
        let outcome = apply_impact(
            &input(&intent, &target, &roster, ScenarioKind::General),
            &mut metrics,
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(outcome.description, "USA took an unrecognized action (Threaten).");
        assert!(outcome.relationship_delta.abs() < f64::EPSILON);
        assert_eq!(outcome.relationship_peer.as_deref(), Some("China"));
    }

    #[test]
    fn request_assistance_delta_keeps_asymmetric_range() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::RequestAssistance);
        let target = Target::Country("India".to_owned());
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..500 {
            let mut metrics = Metrics::default();
            let outcome = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::General),
                &mut metrics,
                &mut rng,
            );
            assert!(outcome.relationship_delta >= -0.05 && outcome.relationship_delta < 0.02);
            assert!(metrics.peace_index < 0.5);
        }
    }

    const TOLERANCE: f64 = 1e-12;

    /// Peace change of one action applied to fresh metrics at `peace`.
    fn peace_change(intent: Intent, target: &Target, peace: f64, rng: &mut StdRng) -> f64 {
        let roster = roster();
        let intent = ActionIntent::Known(intent);
        let mut metrics = Metrics::with_peace(peace);
        let _ = apply_impact(
            &input(&intent, target, &roster, ScenarioKind::General),
            &mut metrics,
            rng,
        );
        metrics.peace_index - peace
    }

    fn assert_within(value: f64, low: f64, high: f64) {
        assert!(
            value >= low - TOLERANCE && value < high + TOLERANCE,
            "{value} outside [{low}, {high})"
        );
    }

    #[test]
    fn alliance_with_peer_keeps_its_ranges() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::BuildAlliances);
        let target = Target::Country("India".to_owned());
        let mut rng = StdRng::seed_from_u64(17);
        for peace in [0.2, 0.5, 0.8] {
            for _ in 0..500 {
                let mut metrics = Metrics::with_peace(peace);
                let outcome = apply_impact(
                    &input(&intent, &target, &roster, ScenarioKind::General),
                    &mut metrics,
                    &mut rng,
                );
                assert_within(outcome.relationship_delta, 0.1, 0.2);
                assert_within(
                    metrics.peace_index - peace,
                    0.01 * (1.1 - peace),
                    0.02 * (1.1 - peace),
                );
                assert_eq!(
                    outcome.description,
                    "USA seeks to build an alliance with India. Strengthening ties."
                );
            }
        }
    }

    #[test]
    fn peace_change_ranges_per_intent() {
        // Severity 5 scales concern and assistance requests by 1.5.
        let global = Target::Global;
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..1_000 {
            assert_within(peace_change(Intent::Respond, &global, 0.5, &mut rng), -0.01, 0.01);
            assert_within(peace_change(Intent::Comment, &global, 0.5, &mut rng), -0.005, 0.005);
            assert_within(
                peace_change(Intent::RaiseGlobalConcern, &global, 0.5, &mut rng),
                -0.03,
                0.0075,
            );
            let request = peace_change(Intent::RequestAssistance, &global, 0.5, &mut rng);
            assert!(request > -0.0225 - TOLERANCE && request <= -0.0075 + TOLERANCE);
        }
    }

    #[test]
    fn unrecognized_intent_peace_change_is_small() {
        let roster = roster();
        let intent = ActionIntent::Unrecognized("Threaten".to_owned());
        let target = Target::Global;
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..1_000 {
            let mut metrics = Metrics::default();
            let _ = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::General),
                &mut metrics,
                &mut rng,
            );
            assert_within(metrics.peace_index - 0.5, -0.01, 0.01);
        }
    }

    #[test]
    fn energy_follows_intent_group() {
        let roster = roster();
        let target = Target::Global;
        let alliance = ActionIntent::Known(Intent::BuildAlliances);
        let request = ActionIntent::Known(Intent::RequestAssistance);
        let decline = ActionIntent::Known(Intent::DeclineToAct);
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..1_000 {
            let mut metrics = Metrics::default();
            let _ = apply_impact(
                &input(&alliance, &target, &roster, ScenarioKind::Energy),
                &mut metrics,
                &mut rng,
            );
            assert_within(metrics.energy_stability - 0.6, 0.0, 0.041);
            assert!(metrics.energy_stability > 0.6);

            let mut metrics = Metrics::default();
            let _ = apply_impact(
                &input(&request, &target, &roster, ScenarioKind::Energy),
                &mut metrics,
                &mut rng,
            );
            assert!(metrics.energy_stability < 0.6);
            assert!(metrics.energy_stability - 0.6 > -0.041);

            let mut metrics = Metrics::default();
            let _ = apply_impact(
                &input(&decline, &target, &roster, ScenarioKind::Energy),
                &mut metrics,
                &mut rng,
            );
            assert_within(metrics.energy_stability - 0.6, -0.02, 0.02);
        }
    }

    /// Refugee change of one action applied to fresh metrics at `peace`.
    fn refugee_change(intent: Intent, peace: f64, rng: &mut StdRng) -> i64 {
        let roster = roster();
        let intent = ActionIntent::Known(intent);
        let target = Target::Global;
        let mut metrics = Metrics::with_peace(peace);
        let before = metrics.refugee_migration_m;
        let _ = apply_impact(
            &input(&intent, &target, &roster, ScenarioKind::Refugee),
            &mut metrics,
            rng,
        );
        i64::from(metrics.refugee_migration_m).saturating_sub(i64::from(before))
    }

    #[test]
    fn distress_doubles_refugee_increase_when_peace_is_low() {
        let mut rng = StdRng::seed_from_u64(37);
        let mut seen_low = Vec::new();
        let mut seen_mid = Vec::new();
        for _ in 0..300 {
            seen_low.push(refugee_change(Intent::RequestAssistance, 0.2, &mut rng));
            seen_mid.push(refugee_change(Intent::RequestAssistance, 0.5, &mut rng));
        }
        assert!(seen_low.iter().all(|c| *c == 0 || *c == 2));
        assert!(seen_low.contains(&2));
        assert!(seen_mid.iter().all(|c| *c == 0 || *c == 1));
        assert!(seen_mid.contains(&1));
    }

    #[test]
    fn cooperation_doubles_refugee_decrease_when_peace_is_high() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut seen_high = Vec::new();
        let mut seen_mid = Vec::new();
        for _ in 0..300 {
            seen_high.push(refugee_change(Intent::ProposeDeal, 0.8, &mut rng));
            seen_mid.push(refugee_change(Intent::ProposeDeal, 0.5, &mut rng));
        }
        assert!(seen_high.iter().all(|c| [0, -2, -4].contains(c)));
        assert!(seen_high.contains(&-4));
        assert!(seen_mid.iter().all(|c| (-2..=0).contains(c)));
        assert!(seen_mid.contains(&-2));
    }

    /// Mean growth change over many fresh applications of `intent`.
    fn mean_growth_change(intent: Intent, rng: &mut StdRng) -> f64 {
        let roster = roster();
        let intent = ActionIntent::Known(intent);
        let target = Target::Global;
        let mut total = 0.0;
        for _ in 0..5_000 {
            let mut metrics = Metrics::default();
            let _ = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::General),
                &mut metrics,
                rng,
            );
            total += metrics.economic_growth_pct - 2.5;
        }
        total / 5_000.0
    }

    #[test]
    fn growth_carries_intent_bonus() {
        // Versus a decline: +0.05 bonus for cooperation, -0.03 for distress,
        // plus a small peace-driven term and rounding to one decimal.
        let mut rng = StdRng::seed_from_u64(43);
        let decline = mean_growth_change(Intent::DeclineToAct, &mut rng);
        let alliance = mean_growth_change(Intent::BuildAlliances, &mut rng);
        let concern = mean_growth_change(Intent::RaiseGlobalConcern, &mut rng);
        assert!(alliance - decline > 0.03 && alliance - decline < 0.065);
        assert!(concern - decline > -0.045 && concern - decline < -0.02);
    }

    #[test]
    fn bounds_hold_under_repeated_pressure() {
        let roster = roster();
        let target = Target::Country("China".to_owned());
        let kinds = [
            ScenarioKind::Climate,
            ScenarioKind::Energy,
            ScenarioKind::Refugee,
            ScenarioKind::General,
        ];
        let mut rng = StdRng::seed_from_u64(42);
        for kind in kinds {
            for intent in Intent::ALL {
                let intent = ActionIntent::Known(intent);
                let mut metrics = Metrics::with_peace(0.1);
                for _ in 0..2_000 {
                    let _ = apply_impact(&input(&intent, &target, &roster, kind), &mut metrics, &mut rng);
                    assert!((PEACE_MIN..=PEACE_MAX).contains(&metrics.peace_index));
                    assert!((ENERGY_MIN..=ENERGY_MAX).contains(&metrics.energy_stability));
                    assert!(metrics.carbon_emissions_gt >= CARBON_FLOOR);
                    assert!(metrics.economic_growth_pct >= GROWTH_FLOOR);
                    assert!(is_one_decimal(metrics.economic_growth_pct));
                }
            }
        }
    }

    #[test]
    fn only_the_scenario_metric_moves() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::Comment);
        let target = Target::Global;
        let mut rng = StdRng::seed_from_u64(99);
        let start = Metrics::default();

        let mut energy = start;
        let _ = apply_impact(
            &input(&intent, &target, &roster, ScenarioKind::Energy),
            &mut energy,
            &mut rng,
        );
        assert!((energy.carbon_emissions_gt - start.carbon_emissions_gt).abs() < f64::EPSILON);
        assert_eq!(energy.refugee_migration_m, start.refugee_migration_m);

        let mut general = start;
        let _ = apply_impact(
            &input(&intent, &target, &roster, ScenarioKind::General),
            &mut general,
            &mut rng,
        );
        assert!((general.carbon_emissions_gt - start.carbon_emissions_gt).abs() < f64::EPSILON);
        assert!((general.energy_stability - start.energy_stability).abs() < f64::EPSILON);
        assert_eq!(general.refugee_migration_m, start.refugee_migration_m);
    }

    #[test]
    fn cooperation_never_increases_refugees() {
        let roster = roster();
        let intent = ActionIntent::Known(Intent::ProposeDeal);
        let target = Target::Country("India".to_owned());
        let mut rng = StdRng::seed_from_u64(8);
        let mut metrics = Metrics::default();
        for _ in 0..100 {
            let before = metrics.refugee_migration_m;
            let _ = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::Refugee),
                &mut metrics,
                &mut rng,
            );
            assert!(metrics.refugee_migration_m <= before);
        }
    }

    #[test]
    fn climate_cooperation_is_biased_down() {
        // With peace at the top of its range, the expected carbon change of a
        // deal is 0.125 - 0.12 - 0.05 < 0.
        let roster = roster();
        let intent = ActionIntent::Known(Intent::ProposeDeal);
        let target = Target::Country("China".to_owned());
        let mut rng = StdRng::seed_from_u64(1234);
        let mut total = 0.0;
        for _ in 0..5_000 {
            let mut metrics = Metrics::with_peace(0.95);
            let before = metrics.carbon_emissions_gt;
            let _ = apply_impact(
                &input(&intent, &target, &roster, ScenarioKind::Climate),
                &mut metrics,
                &mut rng,
            );
            total += metrics.carbon_emissions_gt - before;
        }
        assert!(total < 0.0);
    }
}
