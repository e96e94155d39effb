//! Command-line entry point for the Concord negotiation simulation.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `concord-config.yaml` (or `CONCORD_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Load backend credentials from the environment
//! 4. Build the action generator and the simulation
//! 5. Wire Ctrl-C to an operator stop
//! 6. Run every turn, streaming actions to the observers
//! 7. Write the transcript and the run report

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context as _;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use concord_core::{
    Chain, JsonLinesObserver, LogFormat, LoggingConfig, OperatorHandle, OutputConfig, RunObserver,
    Simulation, SimulationConfig, TracingObserver,
};
use concord_runner::{ActionGenerator, RunnerConfig};

/// Config file used when `CONCORD_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "concord-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, an artifact cannot be
/// written, or the run aborts.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(config = %config_source, "concord-engine starting");

    let settings = &config.simulation;
    info!(
        scenario = %settings.scenario,
        roster = ?settings.roster,
        turns = settings.turns,
        severity = settings.severity,
        initial_peace = settings.initial_peace,
        style = ?settings.style,
        strict_intents = settings.strict_intents,
        "configuration loaded"
    );

    // 3. Backend credentials.
    let runner_config = RunnerConfig::from_env().context("failed to load backend configuration")?;
    info!(
        backend = ?runner_config.primary_backend.backend_type,
        model = %runner_config.primary_backend.model,
        fallback = runner_config.fallback_backend.is_some(),
        templates_dir = ?runner_config.templates_dir,
        timeout_ms = config.generation.timeout_ms,
        "backend configuration loaded"
    );

    // 4. Generator and simulation.
    let generator = ActionGenerator::from_config(
        &runner_config,
        config.generation.timeout(),
        config.generation.sampling(),
    )
    .context("failed to load prompt templates")?;
    let mut simulation =
        Simulation::new(config.simulation.clone()).context("simulation refused to start")?;

    // 5. Ctrl-C requests a stop at the next agent boundary.
    let operator = OperatorHandle::new();
    let interrupt = operator.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current agent");
            interrupt.request_stop();
        }
    });

    // 6. Run.
    let mut observer = build_observer(&config.output)?;
    let result = simulation.run(&generator, &mut observer, &operator).await;
    drop(observer);

    // 7. Artifacts. The transcript is written even for an aborted run.
    write_transcript(&simulation, &config.output)?;

    match result {
        Ok(report) => {
            if let Some(path) = &config.output.report_path {
                let json = serde_json::to_string_pretty(&report)
                    .context("failed to serialize run report")?;
                write_file(path, &json)?;
                info!(path = %path, "run report written");
            }
            info!(
                end_reason = ?report.end_reason,
                turns_completed = report.summary.turns_completed,
                actions = report.summary.total_actions,
                agreements = report.summary.agreements,
                density = report.summary.density,
                peace_delta = report.summary.delta.peace_index,
                "concord-engine shutdown complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(
                error = %e,
                turns_completed = simulation.turns_completed(),
                actions = simulation.actions().len(),
                "simulation aborted"
            );
            Err(e).context("simulation aborted")
        }
    }
}

/// Load the run configuration.
///
/// `CONCORD_CONFIG` must point at an existing file when set. Otherwise
/// `concord-config.yaml` in the working directory is used if present, and
/// defaults if not.
fn load_config() -> anyhow::Result<(SimulationConfig, String)> {
    if let Ok(path) = std::env::var("CONCORD_CONFIG") {
        let config = SimulationConfig::from_file(Path::new(&path))
            .with_context(|| format!("failed to load {path}"))?;
        return Ok((config, path));
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        let config = SimulationConfig::from_file(default_path)
            .with_context(|| format!("failed to load {DEFAULT_CONFIG_PATH}"))?;
        Ok((config, DEFAULT_CONFIG_PATH.to_owned()))
    } else {
        Ok((SimulationConfig::default(), "defaults".to_owned()))
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Structured logging always, plus the JSON-lines feed when configured.
fn build_observer(output: &OutputConfig) -> anyhow::Result<Box<dyn RunObserver>> {
    let Some(path) = &output.action_feed_path else {
        return Ok(Box::new(TracingObserver));
    };
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
    info!(path = %path, "streaming actions to feed");
    Ok(Box::new(Chain::new(
        TracingObserver,
        JsonLinesObserver::new(BufWriter::new(file)),
    )))
}

fn write_transcript(simulation: &Simulation, output: &OutputConfig) -> anyhow::Result<()> {
    let Some(path) = &output.transcript_path else {
        return Ok(());
    };
    let transcript = simulation.transcript(output.transcript_order, chrono::Utc::now());
    write_file(path, &transcript)?;
    info!(path = %path, actions = simulation.actions().len(), "transcript written");
    Ok(())
}

fn write_file(path: &str, contents: &str) -> anyhow::Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, contents).with_context(|| format!("failed to write {path}"))
}

fn ensure_parent(path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
