//! Prompt template loading and rendering via `minijinja`.
//!
//! Two templates make up an Act API request: `system.j2` frames who the
//! agent is and what it may do, `environment.j2` describes what it
//! perceives this tick. Both ship built into the binary; a templates
//! directory can override either one so operators can tune agent behavior
//! without recompiling.

use std::path::Path;

use hive_types::{AgentValues, Perception};
use minijinja::Environment;
use serde_json::json;
use tracing::debug;

use crate::error::ProviderError;

const DEFAULT_SYSTEM: &str = include_str!("../templates/system.j2");
const DEFAULT_ENVIRONMENT: &str = include_str!("../templates/environment.j2");

/// Template names and their built-in sources.
const TEMPLATES: [(&str, &str); 2] = [
    ("system.j2", DEFAULT_SYSTEM),
    ("environment.j2", DEFAULT_ENVIRONMENT),
];

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to the Act API.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System framing: identity, goals, personality, action list.
    pub system: String,
    /// The message: environment description and the call to act.
    pub message: String,
}

impl PromptEngine {
    /// Create a prompt engine with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Template`] if a template fails to compile.
    pub fn builtin() -> Result<Self, ProviderError> {
        Self::new(None)
    }

    /// Create a prompt engine, preferring templates found in `templates_dir`.
    ///
    /// Files missing from the directory fall back to the built-in version.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Template`] if an override exists but cannot
    /// be read, or a template fails to compile.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, ProviderError> {
        let mut env = Environment::new();
        for (name, builtin) in TEMPLATES {
            let source = match templates_dir.map(|dir| dir.join(name)) {
                Some(path) if path.is_file() => {
                    debug!(template = name, path = %path.display(), "loading template override");
                    std::fs::read_to_string(&path).map_err(|e| {
                        ProviderError::Template(format!("failed to read {}: {e}", path.display()))
                    })?
                }
                _ => builtin.to_owned(),
            };
            env.add_template_owned(name, source)
                .map_err(|e| ProviderError::Template(format!("failed to add {name}: {e}")))?;
        }
        Ok(Self { env })
    }

    /// Render the system framing and environment message for `perception`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Template`] if rendering fails, or
    /// [`ProviderError::Serde`] if the perception cannot be serialized.
    pub fn render(&self, perception: &Perception) -> Result<RenderedPrompt, ProviderError> {
        let mut context = serde_json::to_value(perception)?;
        if let Some(map) = context.as_object_mut() {
            map.insert(String::from("persona"), json!(describe_values(perception.values)));
        }

        let system = self.render_one("system.j2", &context)?;
        let message = self.render_one("environment.j2", &context)?;
        Ok(RenderedPrompt { system, message })
    }

    fn render_one(&self, name: &str, context: &serde_json::Value) -> Result<String, ProviderError> {
        self.env
            .get_template(name)
            .map_err(|e| ProviderError::Template(format!("missing {name}: {e}")))?
            .render(context)
            .map_err(|e| ProviderError::Template(format!("{name} render failed: {e}")))
    }
}

/// One phrase per trait; a value above 50 selects the first pole.
pub fn describe_values(values: AgentValues) -> String {
    let pole = |value: u8, high: &'static str, low: &'static str| if value > 50 { high } else { low };
    [
        pole(values.cooperation, "leans cooperative", "leans competitive"),
        pole(values.adventure, "loves adventure", "prefers caution"),
        pole(values.social, "loves company", "prefers independence"),
        pole(values.generosity, "generous", "thrifty"),
    ]
    .join(", ")
}

/// The structured-output contract sent as `action_control`.
pub fn action_control() -> serde_json::Value {
    json!({
        "type": "json",
        "schema": {
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["move", "gather", "trade", "chat", "ally", "vote"]
                },
                "target": {
                    "type": "string",
                    "description": "direction (0-5) or agent id"
                },
                "detail": {
                    "type": "string",
                    "description": "additional detail"
                }
            },
            "required": ["action"]
        }
    })
}
