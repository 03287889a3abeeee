use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ModuleId, ModuleKind, ParameterValue};

/// Typed parameter bag for one module.
///
/// `features` feeds `{{integration.features.<key>}}`; `values` feeds
/// `{{project.<key>}}`. Every other top-level key of the serialized object
/// lands in `values`. Feature values are usually booleans but may hold any
/// parameter value; only a referenced feature has to be a scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleParameters {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, ParameterValue>,
    #[serde(flatten)]
    pub values: BTreeMap<String, ParameterValue>,
}

impl ModuleParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_feature(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(key.into(), ParameterValue::Bool(enabled));
        self
    }

    pub fn value(&self, key: &str) -> Option<&ParameterValue> {
        self.values.get(key)
    }

    pub fn feature(&self, key: &str) -> Option<&ParameterValue> {
        self.features.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.values.is_empty()
    }
}

/// One entry in a genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModuleRecord")]
pub struct Module {
    pub id: ModuleId,
    pub kind: ModuleKind,
    pub dependencies: BTreeSet<ModuleId>,
    #[serde(skip_serializing_if = "ModuleParameters::is_empty")]
    pub parameters: ModuleParameters,
}

impl Module {
    pub fn new(id: impl Into<ModuleId>, kind: ModuleKind) -> Self {
        Self {
            id: id.into(),
            kind,
            dependencies: BTreeSet::new(),
            parameters: ModuleParameters::default(),
        }
    }

    pub fn provider(id: impl Into<ModuleId>) -> Self {
        Self::new(id, ModuleKind::Provider)
    }

    pub fn integrator(id: impl Into<ModuleId>) -> Self {
        Self::new(id, ModuleKind::Integrator)
    }

    pub fn with_dependency(mut self, id: impl Into<ModuleId>) -> Self {
        self.dependencies.insert(id.into());
        self
    }

    pub fn with_parameters(mut self, parameters: ModuleParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn is_provider(&self) -> bool {
        self.kind.is_provider()
    }

    pub fn depends_on(&self, id: &ModuleId) -> bool {
        self.dependencies.contains(id)
    }
}

/// Wire shape of a module; `kind` may be omitted and is then inferred.
#[derive(Deserialize)]
struct ModuleRecord {
    id: ModuleId,
    #[serde(default, alias = "type")]
    kind: Option<ModuleKind>,
    #[serde(default)]
    dependencies: BTreeSet<ModuleId>,
    #[serde(default)]
    parameters: ModuleParameters,
}

impl From<ModuleRecord> for Module {
    fn from(record: ModuleRecord) -> Self {
        let kind = record.kind.unwrap_or_else(|| ModuleKind::infer(&record.id));
        Self {
            id: record.id,
            kind,
            dependencies: record.dependencies,
            parameters: record.parameters,
        }
    }
}
