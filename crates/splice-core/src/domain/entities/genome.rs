use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::module::Module;

/// Project metadata carried by a genome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            framework: None,
            description: None,
        }
    }

    pub fn framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Values exposed to `{{project.<key>}}` when a module does not override them.
    pub fn as_defaults(&self) -> BTreeMap<String, String> {
        let mut defaults = BTreeMap::new();
        defaults.insert("name".to_owned(), self.name.clone());
        if let Some(framework) = &self.framework {
            defaults.insert("framework".to_owned(), framework.clone());
        }
        if let Some(description) = &self.description {
            defaults.insert("description".to_owned(), description.clone());
        }
        defaults
    }
}

/// The unit of validation: project metadata plus an ordered module list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub project: ProjectMetadata,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Genome {
    pub fn new(project: ProjectMetadata) -> Self {
        Self {
            project,
            modules: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}
