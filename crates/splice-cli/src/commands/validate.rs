//! Implementation of the `splice validate` command.
//!
//! Loads the genome, opens the registry, runs the validation service and
//! renders the report. A report with errors is still printed in full; the
//! non-zero exit comes from the returned [`CliError::InvalidGenome`].

use tracing::instrument;

use splice_adapters::{load_genome, open_registry};
use splice_core::{
    application::ValidationService,
    domain::{ErrorType, FindingDetails, Genome, ValidationResult, WarningType},
};

use crate::{
    cli::{OutputFormat, ReportFormat, ValidateArgs, global::GlobalArgs},
    commands::{build_resolver, registry_path, select_layout},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const ERROR_ORDER: [ErrorType; 4] = [
    ErrorType::CreateConflict,
    ErrorType::FileOwnershipViolation,
    ErrorType::MissingDependency,
    ErrorType::UnresolvedPath,
];

const WARNING_ORDER: [WarningType; 4] = [
    WarningType::MissingArtifacts,
    WarningType::ArtifactLoadFailed,
    WarningType::DuplicateModule,
    WarningType::SelfDependency,
];

#[instrument(skip_all, fields(genome = %args.genome.display()))]
pub fn execute(
    args: ValidateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let genome = load_genome(&args.genome)?;
    let registry = open_registry(&registry_path(args.registry.as_ref(), &config)?)?;
    let layout = select_layout(&args.layout, &config, genome.project.framework.as_deref())?;
    let framework = layout.framework.clone();

    let service = ValidationService::new(registry, build_resolver(layout, &config));
    let result = service.validate_genome(&genome)?;

    match report_format(args.format, &global, &config) {
        ReportFormat::Json => output.data(&serde_json::to_string_pretty(&result)?)?,
        ReportFormat::Human if output.is_quiet() => {}
        ReportFormat::Human => render_report(&genome, &framework, &result, &output)?,
    }

    if !result.is_valid {
        return Err(CliError::InvalidGenome {
            errors: result.errors.len(),
            warnings: result.warnings.len(),
        });
    }
    if args.strict && result.has_warnings() {
        return Err(CliError::StrictWarnings {
            warnings: result.warnings.len(),
        });
    }
    Ok(())
}

/// `--format`, then `--output-format json`, then `output.format`.
fn report_format(
    flag: Option<ReportFormat>,
    global: &GlobalArgs,
    config: &AppConfig,
) -> ReportFormat {
    if let Some(format) = flag {
        return format;
    }
    if global.output_format == OutputFormat::Json {
        return ReportFormat::Json;
    }
    if config.output.format.eq_ignore_ascii_case("json") {
        ReportFormat::Json
    } else {
        ReportFormat::Human
    }
}

fn render_report(
    genome: &Genome,
    framework: &str,
    result: &ValidationResult,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!(
        "Validating '{}' ({} modules, layout {})",
        genome.project.name,
        genome.module_count(),
        framework
    ))?;

    for kind in ERROR_ORDER {
        let group: Vec<_> = result.errors_of(kind).collect();
        if group.is_empty() {
            continue;
        }
        output.print("")?;
        output.print(&format!("{kind} ({})", group.len()))?;
        for error in group {
            output.error(&format!("{}: {}", error.module_id, error.message))?;
            render_details(&error.details, output)?;
        }
    }

    for kind in WARNING_ORDER {
        let group: Vec<_> = result.warnings_of(kind).collect();
        if group.is_empty() {
            continue;
        }
        output.print("")?;
        output.print(&format!("{kind} ({})", group.len()))?;
        for warning in group {
            output.warning(&format!("{}: {}", warning.module_id, warning.message))?;
            render_details(&warning.details, output)?;
        }
    }

    output.print("")?;
    if result.is_valid {
        output.success(&format!(
            "Genome is valid ({} warning(s))",
            result.warnings.len()
        ))?;
    } else {
        output.error(&format!(
            "Genome is invalid: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        ))?;
    }
    Ok(())
}

fn render_details(details: &FindingDetails, output: &OutputManager) -> CliResult<()> {
    if let Some(path) = &details.path {
        output.detail(&format!("    path: {path}"))?;
    }
    if let Some(template) = &details.template {
        output.detail(&format!("    template: {template}"))?;
    }
    if let Some(owner) = &details.actual_owner {
        output.detail(&format!("    owner: {owner}"))?;
    }
    if let Some(expected) = &details.expected_owner {
        output.detail(&format!("    expected: {expected}"))?;
    }
    if let Some(reason) = &details.reason {
        output.detail(&format!("    reason: {reason}"))?;
    }
    Ok(())
}
