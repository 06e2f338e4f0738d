use crate::core::demos;
use crate::core::runner::{Mutation, MutationAction, Selector};
use crate::utils::error::{Result, SandboxError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML scenario file: which demos to run and which document mutations to
/// apply afterwards.
///
/// ```toml
/// [scenario]
/// name = "tutorial"
/// demos = ["functions", "objects"]
///
/// [[mutation]]
/// select = "id"
/// target = "header-section-one"
/// action = "set-text"
/// value = "Hello World!"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioMeta,
    #[serde(default, rename = "mutation")]
    pub mutations: Vec<MutationSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub demos: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationSpec {
    /// "id", "class" or "tag".
    pub select: String,
    pub target: String,
    /// "set-text", "set-attribute" or "set-style".
    pub action: String,
    pub value: String,
    /// Attribute name or style property, depending on the action.
    pub key: Option<String>,
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_mutations(&self) -> Result<Vec<Mutation>> {
        self.mutations.iter().map(MutationSpec::to_mutation).collect()
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("scenario.name", &self.scenario.name)?;

        for name in &self.scenario.demos {
            if !demos::is_known_demo(name) {
                return Err(SandboxError::UnknownDemo { name: name.clone() });
            }
        }

        for spec in &self.mutations {
            spec.validate()?;
        }
        Ok(())
    }
}

impl MutationSpec {
    fn to_mutation(&self) -> Result<Mutation> {
        let selector = match self.select.as_str() {
            "id" => Selector::Id(self.target.clone()),
            "class" => Selector::Class(self.target.clone()),
            "tag" => Selector::Tag(self.target.clone()),
            other => {
                return Err(SandboxError::InvalidConfigValue {
                    field: "mutation.select".to_string(),
                    value: other.to_string(),
                    reason: "must be one of: id, class, tag".to_string(),
                })
            }
        };

        let action = match self.action.as_str() {
            "set-text" => MutationAction::SetText(self.value.clone()),
            "set-attribute" => {
                let key = validation::validate_required_field("mutation.key", &self.key)?;
                MutationAction::SetAttribute {
                    key: key.clone(),
                    value: self.value.clone(),
                }
            }
            "set-style" => {
                let key = validation::validate_required_field("mutation.key", &self.key)?;
                MutationAction::SetStyle {
                    property: key.clone(),
                    value: self.value.clone(),
                }
            }
            other => {
                return Err(SandboxError::InvalidConfigValue {
                    field: "mutation.action".to_string(),
                    value: other.to_string(),
                    reason: "must be one of: set-text, set-attribute, set-style".to_string(),
                })
            }
        };

        Ok(Mutation { selector, action })
    }
}

impl Validate for MutationSpec {
    fn validate(&self) -> Result<()> {
        validation::validate_identifier("mutation.target", &self.target)?;
        // Conversion performs the full action/selector checks.
        self.to_mutation().map(|_| ())
    }
}
