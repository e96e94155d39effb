//! Configuration loading and typed config structures for a Concord run.
//!
//! The canonical configuration lives in `concord-config.yaml` at the project
//! root. Every field has a default, so an empty file describes a valid
//! two-nation climate run. Backend credentials are deliberately absent: they
//! come from the environment (see `concord_runner::RunnerConfig`).

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use concord_agents::available_countries;
use concord_runner::SamplingParams;
use concord_types::{NegotiationStyle, ScenarioId};

/// Smallest roster that can negotiate.
pub const MIN_ROSTER: usize = 2;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes a run that cannot start.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level run configuration.
///
/// Mirrors the structure of `concord-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// What to simulate.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Sampling parameters and deadline for every generation call.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where run artifacts are written.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    ///
    /// The result is parsed but not validated; call
    /// [`SimulationSettings::validate`] before starting a run.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Scenario, roster and world parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSettings {
    /// Active crisis scenario.
    #[serde(default = "default_scenario")]
    pub scenario: ScenarioId,

    /// Participating nations, by catalog name.
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,

    /// Number of turns, 3 to 30.
    #[serde(default = "default_turns")]
    pub turns: u32,

    /// Crisis severity, 1 to 10.
    #[serde(default = "default_severity")]
    pub severity: u8,

    /// Starting peace index, 0.1 to 0.9.
    #[serde(default = "default_initial_peace")]
    pub initial_peace: f64,

    /// Pause between agent actions in milliseconds. Advisory pacing only.
    #[serde(default = "default_action_delay_ms")]
    pub action_delay_ms: u64,

    /// RNG seed. Absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Behavioural hint rendered into every prompt.
    #[serde(default)]
    pub style: NegotiationStyle,

    /// Treat an unrecognized intent as a parse error.
    #[serde(default = "default_strict_intents")]
    pub strict_intents: bool,
}

const fn default_scenario() -> ScenarioId {
    ScenarioId::ClimateCollapse
}

fn default_roster() -> Vec<String> {
    vec!["USA".to_owned(), "China".to_owned()]
}

const fn default_turns() -> u32 {
    10
}

const fn default_severity() -> u8 {
    5
}

const fn default_initial_peace() -> f64 {
    0.5
}

const fn default_action_delay_ms() -> u64 {
    500
}

const fn default_strict_intents() -> bool {
    true
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
            roster: default_roster(),
            turns: default_turns(),
            severity: default_severity(),
            initial_peace: default_initial_peace(),
            action_delay_ms: default_action_delay_ms(),
            seed: None,
            style: NegotiationStyle::default(),
            strict_intents: default_strict_intents(),
        }
    }
}

impl SimulationSettings {
    /// Reject settings that cannot start a run.
    ///
    /// The roster must hold at least two distinct catalog nations; turns,
    /// severity and initial peace must lie in their documented ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.len() < MIN_ROSTER {
            return Err(ConfigError::Invalid(format!(
                "roster needs at least {MIN_ROSTER} nations, got {}",
                self.roster.len()
            )));
        }

        let known = available_countries();
        let mut seen = BTreeSet::new();
        for name in &self.roster {
            if !known.contains(&name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "unknown nation {name}; expected one of {}",
                    known.join(", ")
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!("{name} appears twice in the roster")));
            }
        }

        if !(3..=30).contains(&self.turns) {
            return Err(ConfigError::Invalid(format!(
                "turns must be between 3 and 30, got {}",
                self.turns
            )));
        }
        if !(1..=10).contains(&self.severity) {
            return Err(ConfigError::Invalid(format!(
                "severity must be between 1 and 10, got {}",
                self.severity
            )));
        }
        if !(0.1..=0.9).contains(&self.initial_peace) {
            return Err(ConfigError::Invalid(format!(
                "initial_peace must be between 0.1 and 0.9, got {}",
                self.initial_peace
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Parameters shared by every generation call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Deadline for one generation, fallback backend included.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_temperature() -> f64 {
    0.75
}

const fn default_max_tokens() -> u32 {
    250
}

const fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl GenerationConfig {
    /// Sampling parameters for the backend.
    pub const fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Generation deadline.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Order of action blocks in the exported transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptOrder {
    /// Oldest action first.
    Chronological,
    /// Most recent action first.
    #[default]
    NewestFirst,
}

/// Artifact destinations. An absent path disables that artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Plain-text transcript of the action log.
    #[serde(default = "default_transcript_path")]
    pub transcript_path: Option<String>,

    /// Block order inside the transcript.
    #[serde(default)]
    pub transcript_order: TranscriptOrder,

    /// JSON run report.
    #[serde(default = "default_report_path")]
    pub report_path: Option<String>,

    /// JSON-lines feed with one object per committed action.
    #[serde(default)]
    pub action_feed_path: Option<String>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_transcript_path() -> Option<String> {
    Some("concord-transcript.txt".to_owned())
}

#[allow(clippy::unnecessary_wraps)]
fn default_report_path() -> Option<String> {
    Some("concord-report.json".to_owned())
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            transcript_path: default_transcript_path(),
            transcript_order: TranscriptOrder::default(),
            report_path: default_report_path(),
            action_feed_path: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.simulation.scenario, ScenarioId::ClimateCollapse);
        assert_eq!(config.simulation.turns, 10);
        assert_eq!(config.simulation.severity, 5);
        assert!(config.simulation.strict_intents);
        assert!(config.simulation.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
simulation:
  scenario: refugee-crisis
  roster: [EU, Germany, South Africa]
  turns: 12
  severity: 8
  initial_peace: 0.35
  action_delay_ms: 0
  seed: 1234
  style: competitive
  strict_intents: false
generation:
  temperature: 0.4
  max_tokens: 300
  timeout_ms: 5000
logging:
  level: debug
  format: json
output:
  transcript_path: out/transcript.txt
  transcript_order: chronological
  report_path: ~
  action_feed_path: out/feed.jsonl
";
        let config = SimulationConfig::parse(yaml).unwrap();
        let sim = &config.simulation;
        assert_eq!(sim.scenario, ScenarioId::RefugeeCrisis);
        assert_eq!(sim.roster, vec!["EU", "Germany", "South Africa"]);
        assert_eq!(sim.turns, 12);
        assert_eq!(sim.severity, 8);
        assert!((sim.initial_peace - 0.35).abs() < f64::EPSILON);
        assert_eq!(sim.action_delay_ms, 0);
        assert_eq!(sim.seed, Some(1234));
        assert_eq!(sim.style, NegotiationStyle::Competitive);
        assert!(!sim.strict_intents);
        assert!(sim.validate().is_ok());

        assert!((config.generation.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.generation.max_tokens, 300);
        assert_eq!(config.generation.timeout(), Duration::from_secs(5));
        assert_eq!(config.generation.sampling().max_tokens, 300);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output.transcript_order, TranscriptOrder::Chronological);
        assert!(config.output.report_path.is_none());
        assert_eq!(config.output.action_feed_path.as_deref(), Some("out/feed.jsonl"));
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "simulation:\n  turns: 4\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.simulation.turns, 4);
        assert_eq!(config.simulation.roster, default_roster());
        assert_eq!(config.generation, GenerationConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let yaml = "";
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
    }

    #[test]
    fn unknown_scenario_key_is_a_yaml_error() {
        let result = SimulationConfig::parse("simulation:\n  scenario: alien-invasion\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn short_roster_is_rejected() {
        let settings = SimulationSettings {
            roster: vec!["USA".to_owned()],
            ..SimulationSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn duplicate_roster_member_is_rejected() {
        let settings = SimulationSettings {
            roster: vec!["USA".to_owned(), "USA".to_owned()],
            ..SimulationSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_nation_is_rejected() {
        let settings = SimulationSettings {
            roster: vec!["USA".to_owned(), "Atlantis".to_owned()],
            ..SimulationSettings::default()
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("Atlantis"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = SimulationSettings::default();
        for settings in [
            SimulationSettings { turns: 2, ..base.clone() },
            SimulationSettings { turns: 31, ..base.clone() },
            SimulationSettings { severity: 0, ..base.clone() },
            SimulationSettings { severity: 11, ..base.clone() },
            SimulationSettings { initial_peace: 0.05, ..base.clone() },
            SimulationSettings { initial_peace: f64::NAN, ..base },
        ] {
            assert!(settings.validate().is_err(), "{settings:?} should be rejected");
        }
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("concord-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path).unwrap();
            assert!(config.simulation.validate().is_ok());
        }
    }
}
