//! Implementation of the `splice resolve` command.

use tracing::debug;

use splice_core::{
    domain::{ModuleParameters, ParameterValue},
    error::SpliceError,
};

use crate::{
    cli::{OutputFormat, ResolveArgs},
    commands::{build_resolver, select_layout},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ResolveArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = select_layout(&args.layout, &config, None)?;
    let resolver = build_resolver(layout, &config);
    let parameters = parameters_from(&args);

    let path = resolver
        .resolve(&args.template, &parameters)
        .map_err(|e| CliError::Core(SpliceError::Domain(e.into())))?;
    debug!(template = %args.template, %path, "template resolved");

    if output.format() == OutputFormat::Json {
        let payload = serde_json::json!({ "template": args.template, "path": path });
        output.data(&serde_json::to_string_pretty(&payload)?)?;
    } else {
        output.data(&path)?;
    }
    Ok(())
}

fn parameters_from(args: &ResolveArgs) -> ModuleParameters {
    let with_values = args
        .params
        .iter()
        .fold(ModuleParameters::new(), |params, (key, raw)| {
            params.with_value(key.clone(), parse_value(raw))
        });
    args.features
        .iter()
        .fold(with_values, |params, (key, enabled)| {
            params.with_feature(key.clone(), *enabled)
        })
}

/// `true`/`false` become booleans, integers stay integers, anything else is text.
fn parse_value(raw: &str) -> ParameterValue {
    if let Ok(b) = raw.parse::<bool>() {
        return ParameterValue::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return ParameterValue::Integer(i);
    }
    ParameterValue::Text(raw.to_owned())
}
