//! Prompt template loading and rendering via `minijinja`.
//!
//! A built-in template set ships inside the crate. Operators can override it
//! by pointing `PROMPT_TEMPLATES_DIR` at a directory containing the same five
//! files: `system.j2`, `scenario.j2`, `profile.j2`, `memory.j2`,
//! `actions.j2`. The system template becomes the system message; the other
//! four are joined into the user message.

use minijinja::Environment;
use serde::Serialize;

use concord_agents::{CountryAgent, CountryProfile, PROMPT_WINDOW, Scenario};
use concord_types::{Intent, NegotiationStyle};

use crate::error::RunnerError;

/// Template names, in user-message order after `system`.
const TEMPLATE_NAMES: [&str; 5] = ["system", "scenario", "profile", "memory", "actions"];

/// Built-in template sources.
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    ("system", include_str!("../templates/system.j2")),
    ("scenario", include_str!("../templates/scenario.j2")),
    ("profile", include_str!("../templates/profile.j2")),
    ("memory", include_str!("../templates/memory.j2")),
    ("actions", include_str!("../templates/actions.j2")),
];

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to a backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the agent's role.
    pub system: String,
    /// User message with scenario, profile, memory and the response contract.
    pub user: String,
}

/// One entry in the intent menu.
#[derive(Debug, Clone, Serialize)]
pub struct IntentOption {
    /// Label the agent must echo back.
    pub label: &'static str,
    /// What the intent means.
    pub description: &'static str,
}

/// Everything a template may reference.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext<'a> {
    /// The acting nation.
    pub country: &'a str,
    /// Its profile.
    pub profile: &'a CountryProfile,
    /// The active crisis.
    pub scenario: &'a Scenario,
    /// 1-based turn number.
    pub turn: u32,
    /// The closed intent vocabulary.
    pub intents: Vec<IntentOption>,
    /// Valid specific targets: the roster without the actor.
    pub targets: Vec<&'a str>,
    /// A peer to use in the example output.
    pub example_target: &'a str,
    /// Recent memory entries, oldest first.
    pub memory: Vec<&'a str>,
    /// Maximum memory entries shown.
    pub memory_window: usize,
    /// Negotiation style sentence.
    pub style_hint: &'static str,
}

impl<'a> PromptContext<'a> {
    /// Assemble the context for one agent-turn.
    pub fn new(
        agent: &'a CountryAgent,
        scenario: &'a Scenario,
        turn: u32,
        roster: &'a [String],
        style: NegotiationStyle,
    ) -> Self {
        let targets: Vec<&str> = roster
            .iter()
            .map(String::as_str)
            .filter(|name| *name != agent.name())
            .collect();
        let example_target = targets.first().copied().unwrap_or("GLOBAL");
        Self {
            country: agent.name(),
            profile: agent.profile(),
            scenario,
            turn,
            intents: Intent::ALL
                .into_iter()
                .map(|i| IntentOption {
                    label: i.label(),
                    description: i.description(),
                })
                .collect(),
            targets,
            example_target,
            memory: agent.recent_memory(),
            memory_window: PROMPT_WINDOW,
            style_hint: style.prompt_hint(),
        }
    }
}

impl PromptEngine {
    /// Create an engine from the built-in templates.
    pub fn builtin() -> Result<Self, RunnerError> {
        Self::from_sources(
            BUILTIN_TEMPLATES
                .iter()
                .map(|(name, source)| ((*name).to_owned(), (*source).to_owned())),
        )
    }

    /// Create an engine loading every template from `templates_dir`.
    pub fn from_dir(templates_dir: &str) -> Result<Self, RunnerError> {
        let mut sources = Vec::with_capacity(TEMPLATE_NAMES.len());
        for name in TEMPLATE_NAMES {
            sources.push((name.to_owned(), load_template(templates_dir, name)?));
        }
        Self::from_sources(sources)
    }

    /// Use `templates_dir` when given, the built-in set otherwise.
    pub fn new(templates_dir: Option<&str>) -> Result<Self, RunnerError> {
        templates_dir.map_or_else(Self::builtin, Self::from_dir)
    }

    fn from_sources(
        sources: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, RunnerError> {
        let mut env = Environment::new();
        for (name, source) in sources {
            env.add_template_owned(name.clone(), source).map_err(|e| {
                RunnerError::Template(format!("failed to add {name} template: {e}"))
            })?;
        }
        Ok(Self { env })
    }

    /// Render the full prompt for one agent-turn.
    pub fn render(&self, context: &PromptContext<'_>) -> Result<RenderedPrompt, RunnerError> {
        let system = self.render_one("system", context)?;
        let scenario = self.render_one("scenario", context)?;
        let profile = self.render_one("profile", context)?;
        let memory = self.render_one("memory", context)?;
        let actions = self.render_one("actions", context)?;

        let user = format!("{scenario}\n\n---\n\n{profile}\n\n---\n\n{memory}\n\n---\n\n{actions}");

        Ok(RenderedPrompt { system, user })
    }

    fn render_one(&self, name: &str, context: &PromptContext<'_>) -> Result<String, RunnerError> {
        self.env
            .get_template(name)
            .map_err(|e| RunnerError::Template(format!("missing {name} template: {e}")))?
            .render(context)
            .map_err(|e| RunnerError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, name: &str) -> Result<String, RunnerError> {
    let path = format!("{dir}/{name}.j2");
    std::fs::read_to_string(&path)
        .map_err(|e| RunnerError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use concord_agents::scenario;
    use concord_types::ScenarioId;

    use super::*;

    fn roster() -> Vec<String> {
        vec!["USA".to_owned(), "China".to_owned(), "Brazil".to_owned()]
    }

    fn temp_dir(label: &str) -> std::path::PathBuf {
        let unique = format!(
            "concord_{label}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn builtin_prompt_contains_contract() {
        let engine = PromptEngine::builtin().unwrap();
        let mut agent = CountryAgent::new("China").unwrap();
        for i in 1..=7 {
            agent.remember(format!("Turn {i}: event {i}"));
        }
        let roster = roster();
        let scenario = scenario(ScenarioId::ClimateCollapse);
        let context = PromptContext::new(&agent, scenario, 3, &roster, NegotiationStyle::Mixed);
        let prompt = engine.render(&context).unwrap();

        assert!(prompt.system.contains("*China*"));
        assert!(prompt.user.contains("Climate Collapse"));
        assert!(prompt.user.contains("as of Turn 3"));
        assert!(prompt.user.contains("USA, Brazil, GLOBAL"));
        assert!(!prompt.user.contains("China, USA"));
        assert!(prompt.user.contains("7. Decline to act"));
        assert!(prompt.user.contains("[Message]:"));
        // Only the five most recent memories are shown.
        assert!(prompt.user.contains("Turn 3: event 3"));
        assert!(!prompt.user.contains("Turn 2: event 2"));
    }

    #[test]
    fn empty_memory_renders_placeholder() {
        let engine = PromptEngine::builtin().unwrap();
        let agent = CountryAgent::new("USA").unwrap();
        let roster = roster();
        let context = PromptContext::new(
            &agent,
            scenario(ScenarioId::AiColdWar),
            1,
            &roster,
            NegotiationStyle::Competitive,
        );
        let prompt = engine.render(&context).unwrap();
        assert!(prompt.user.contains("No recent memory."));
        assert!(prompt.system.contains(NegotiationStyle::Competitive.prompt_hint()));
    }

    #[test]
    fn directory_templates_override_builtin() {
        let dir = temp_dir("override_templates");
        for name in TEMPLATE_NAMES {
            std::fs::write(dir.join(format!("{name}.j2")), format!("{name}:{{{{ country }}}}")).ok();
        }
        let engine = PromptEngine::new(dir.to_str()).unwrap();
        let agent = CountryAgent::new("EU").unwrap();
        let roster = vec!["EU".to_owned(), "India".to_owned()];
        let context = PromptContext::new(
            &agent,
            scenario(ScenarioId::WaterWars),
            2,
            &roster,
            NegotiationStyle::Cooperative,
        );
        let prompt = engine.render(&context).unwrap();
        assert_eq!(prompt.system, "system:EU");
        assert!(prompt.user.starts_with("scenario:EU"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_returns_error() {
        let dir = temp_dir("missing_templates");
        std::fs::write(dir.join("system.j2"), "test").ok();
        let result = PromptEngine::from_dir(dir.to_str().unwrap_or(""));
        assert!(matches!(result, Err(RunnerError::Template(_))));
        std::fs::remove_dir_all(&dir).ok();
    }
}
