//! Implementation of the `splice list` command.

use serde::Serialize;

use splice_adapters::open_registry;
use splice_core::{
    application::{ArtifactLoad, ArtifactLoader, LoadWarning},
    domain::ModuleId,
};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::registry_path,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One registry entry as shown by `splice list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntry {
    id: ModuleId,
    creates: usize,
    enhances: usize,
    installs: usize,
    env_vars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ListEntry {
    fn new(id: ModuleId, load: &ArtifactLoad) -> Self {
        match load {
            Ok(descriptor) => Self {
                id,
                creates: descriptor.creates.len(),
                enhances: descriptor.enhances.len(),
                installs: descriptor.installs.len(),
                env_vars: descriptor.env_vars.len(),
                error: None,
            },
            Err(warning) => Self {
                id,
                creates: 0,
                enhances: 0,
                installs: 0,
                env_vars: 0,
                error: Some(match warning {
                    LoadWarning::NotRegistered => "not registered".to_owned(),
                    LoadWarning::LoadFailed { reason } => reason.clone(),
                }),
            },
        }
    }
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = open_registry(&registry_path(args.registry.as_ref(), &config)?)?;
    let loader = ArtifactLoader::new(registry);

    let ids = loader.registered_ids()?;
    let loads = loader.load_artifacts(&ids)?;
    let entries: Vec<ListEntry> = loads
        .into_iter()
        .map(|(id, load)| ListEntry::new(id, &load))
        .collect();

    match args.format {
        ListFormat::Table if entries.is_empty() => {
            output.info("The registry has no modules")?;
        }
        ListFormat::Table => {
            output.header(&format!("Registered modules ({}):", entries.len()))?;
            for entry in &entries {
                match &entry.error {
                    None => output.print(&format!(
                        "  {:<40} creates {:>2}  enhances {:>2}  installs {:>2}",
                        entry.id.as_str(),
                        entry.creates,
                        entry.enhances,
                        entry.installs
                    ))?,
                    Some(reason) => output.warning(&format!(
                        "  {:<40} unreadable: {reason}",
                        entry.id.as_str()
                    ))?,
                }
            }
        }
        ListFormat::List => {
            for entry in &entries {
                output.data(entry.id.as_str())?;
            }
        }
        ListFormat::Json => {
            output.data(&serde_json::to_string_pretty(&entries)?)?;
        }
    }

    Ok(())
}
