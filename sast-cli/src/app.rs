//! One `sast` invocation, from parsed arguments to written report.

use std::path::{Path, PathBuf};

use sast_core::{AnalysisId, Finding, FindingSummary, ParserKind, Severity, ToolConfig, ToolRun};
use sast_report::{parse_output, write_output, OutputFormat, Report};
use sast_runner::{
    load_config, Config, Defaults, ProcessBackend, ToolBackend, ToolInvocation, ToolOrchestrator,
};

use crate::{Cli, CliError};

const DEFAULT_TOOLS: [&str; 3] = ["cppcheck", "scan-build", "semgrep"];

/// Effective settings after merging CLI flags over config defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project: PathBuf,
    pub tools: Vec<String>,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Settings {
    /// Command-line values win over config defaults, which win over the
    /// built-in fallbacks.
    ///
    /// # Errors
    /// Returns [`CliError::Report`] if the chosen format is unknown.
    pub fn resolve(cli: Cli, defaults: &Defaults) -> Result<Self, CliError> {
        let tools = cli
            .tools
            .or_else(|| defaults.tools.clone())
            .unwrap_or_else(|| DEFAULT_TOOLS.iter().map(|&t| t.to_owned()).collect());

        let format = cli
            .format
            .as_deref()
            .or(defaults.format.as_deref())
            .unwrap_or("native")
            .parse::<OutputFormat>()?;

        let output_dir = cli
            .output
            .or_else(|| defaults.output.clone())
            .unwrap_or_else(|| cli.path.join("sast_report"));

        Ok(Self {
            project: cli.path,
            tools,
            format,
            output_dir,
        })
    }

    /// Name shown in reports: the project directory's final component.
    #[must_use]
    pub fn project_name(&self) -> String {
        self.project
            .file_name()
            .map_or_else(|| "project".to_owned(), |n| n.to_string_lossy().into_owned())
    }

    /// Look up the config of every requested tool.
    ///
    /// # Errors
    /// Returns [`CliError::UnknownTool`] for the first tool without a config.
    pub fn select_tools<'c>(&self, config: &'c Config) -> Result<Vec<(&str, &'c ToolConfig)>, CliError> {
        self.tools
            .iter()
            .map(|name| match config.tools.get(name) {
                Some(tool) => Ok((name.as_str(), tool)),
                None => Err(CliError::UnknownTool {
                    name: name.clone(),
                    available: config.tool_names().into_iter().map(str::to_owned).collect(),
                }),
            })
            .collect()
    }
}

/// What a completed invocation produced.
#[derive(Debug)]
#[non_exhaustive]
pub struct Outcome {
    pub analysis_id: AnalysisId,
    pub runs: Vec<ToolRun>,
    pub failures: usize,
    pub findings: Vec<Finding>,
    pub written: Vec<PathBuf>,
}

/// Run `sast` with real child processes.
///
/// # Errors
/// See [`CliError`]; per-tool failures are only fatal when every tool fails.
pub async fn run(cli: Cli) -> Result<Outcome, CliError> {
    if !cli.path.exists() {
        return Err(CliError::ProjectNotFound { path: cli.path });
    }

    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, &config.defaults)?;
    analyze(&settings, &config, ProcessBackend::new()).await
}

/// Run the configured tools through `backend` and write the report.
///
/// # Errors
/// Returns [`CliError::UnknownTool`] before anything runs, then
/// [`CliError::AllToolsFailed`] or a report error.
pub async fn analyze<B: ToolBackend + 'static>(
    settings: &Settings,
    config: &Config,
    backend: B,
) -> Result<Outcome, CliError> {
    let selected = settings.select_tools(config)?;

    tokio::fs::create_dir_all(&settings.output_dir)
        .await
        .map_err(|source| CliError::OutputDir {
            path: settings.output_dir.clone(),
            source,
        })?;

    print_banner(settings);

    let mut failures = 0;
    let mut invocations = Vec::with_capacity(selected.len());
    for (name, tool) in selected {
        match ToolInvocation::prepare(name, tool, &settings.project, &settings.output_dir) {
            Ok(invocation) => invocations.push(invocation),
            Err(e) => {
                report_failure(&e);
                failures += 1;
            }
        }
    }

    let orchestrator = ToolOrchestrator::new(backend);
    let mut runs = Vec::with_capacity(invocations.len());
    for result in orchestrator.run_all(invocations).await {
        match result {
            Ok(run) => runs.push(run),
            Err(e) => {
                report_failure(&e);
                failures += 1;
            }
        }
    }

    if runs.is_empty() {
        return Err(CliError::AllToolsFailed);
    }

    let findings = if settings.format.needs_findings() {
        collect_findings(&runs, config)
    } else {
        Vec::new()
    };

    let analysis_id = AnalysisId::new();
    let project_name = settings.project_name();
    let report = Report {
        analysis_id,
        project_name: &project_name,
        runs: &runs,
        findings: &findings,
        tool_configs: &config.tools,
    };
    let written = write_output(settings.format, &report, &settings.output_dir).await?;

    let outcome = Outcome {
        analysis_id,
        runs,
        failures,
        findings,
        written,
    };
    print_summary(settings, &outcome);
    Ok(outcome)
}

fn collect_findings(runs: &[ToolRun], config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    for run in runs {
        let parser = config.tools.get(&run.tool_name).map_or_else(
            || ParserKind::for_tool_name(&run.tool_name),
            |tool| tool.parser_for(&run.tool_name),
        );
        match parse_output(parser, run) {
            Ok(parsed) => findings.extend(parsed),
            Err(e) => tracing::warn!(tool = %run.tool_name, error = %e, "skipping unparsable output"),
        }
    }
    findings
}

fn report_failure(error: &dyn std::error::Error) {
    tracing::warn!(error = %error, "tool failed");
    eprintln!("[sast] tool failed: {error}");
}

fn print_banner(settings: &Settings) {
    eprintln!("===== SAST Analysis =====");
    eprintln!("Project:  {}", settings.project.display());
    eprintln!("Tools:    {}", settings.tools.join(", "));
    eprintln!("Format:   {}", settings.format);
    eprintln!("Output:   {}", settings.output_dir.display());
    eprintln!();
}

fn print_summary(settings: &Settings, outcome: &Outcome) {
    eprintln!();
    eprintln!("===== SAST Complete =====");
    eprintln!("Analysis: {}", outcome.analysis_id);
    eprintln!("Reports:  {}", display_dir(&settings.output_dir));
    if outcome.failures > 0 {
        eprintln!("Warning:  {} tool(s) failed", outcome.failures);
    }
    if settings.format.needs_findings() {
        let summary = FindingSummary::from_findings(&outcome.findings);
        eprintln!(
            "Findings: {} ({} errors, {} warnings)",
            summary.total,
            summary.count(Severity::Error),
            summary.count(Severity::Warning),
        );
        for (defect, count) in summary.defects() {
            eprintln!("  {defect} ({}): {count}", defect.cwe_tag());
        }
    }
}

fn display_dir(dir: &Path) -> String {
    dir.canonicalize()
        .unwrap_or_else(|_| dir.to_owned())
        .display()
        .to_string()
}
