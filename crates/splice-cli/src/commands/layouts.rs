//! Implementation of the `splice layouts` command.

use std::collections::BTreeMap;

use splice_adapters::{builtin_layout, builtin_names};
use splice_core::domain::PathLayout;

use crate::{
    cli::{LayoutsArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: LayoutsArgs, output: OutputManager) -> CliResult<()> {
    match args.name {
        Some(name) => show_layout(&builtin_layout(&name)?, args.format, &output),
        None => list_layouts(args.format, &output),
    }
}

fn list_layouts(format: ListFormat, output: &OutputManager) -> CliResult<()> {
    let names = builtin_names();
    match format {
        ListFormat::Table => {
            output.header("Built-in layouts:")?;
            for name in &names {
                let layout = builtin_layout(name)?;
                output.print(&format!("  {:<16} {} keys", name, layout.len()))?;
            }
        }
        ListFormat::List => {
            for name in &names {
                output.data(name)?;
            }
        }
        ListFormat::Json => {
            let layouts = names
                .iter()
                .map(|name| builtin_layout(name))
                .collect::<Result<Vec<_>, _>>()?;
            output.data(&serde_json::to_string_pretty(&layouts)?)?;
        }
    }
    Ok(())
}

fn show_layout(layout: &PathLayout, format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header(&format!("Layout '{}':", layout.framework))?;
            for (key, prefix) in &layout.paths {
                let shown = if prefix.is_empty() {
                    "(project root)"
                } else {
                    prefix.as_str()
                };
                output.print(&format!("  paths.{key:<16} {shown}"))?;
            }
        }
        ListFormat::List => {
            for key in layout.keys() {
                output.data(&format!("paths.{key}"))?;
            }
        }
        ListFormat::Json => {
            let paths: &BTreeMap<String, String> = &layout.paths;
            output.data(&serde_json::to_string_pretty(paths)?)?;
        }
    }
    Ok(())
}
