use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How an analyzer should be launched and where its results end up.
///
/// Deserialized from the `tools:` section of a config layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ToolConfig {
    /// Executable name or path.
    pub command: String,
    /// Arguments; `{output_dir}` and `{project_path}` are interpolated.
    #[serde(default)]
    pub args: Vec<String>,
    /// Stream (or filesystem) carrying the tool's results.
    #[serde(default)]
    pub output_stream: OutputStream,
    /// File extension used when saving the native report.
    #[serde(default)]
    pub native_extension: Option<String>,
    /// Glob, relative to the project, whose matches are appended as arguments.
    #[serde(default)]
    pub append_sources: Option<String>,
    /// Output parser; inferred from the tool name when absent.
    #[serde(default)]
    pub parser: Option<ParserKind>,
    /// Per-run timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ToolConfig {
    /// Create a config that runs `command` with no arguments on stdout.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            output_stream: OutputStream::default(),
            native_extension: None,
            append_sources: None,
            parser: None,
            timeout_secs: None,
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_output_stream(mut self, stream: OutputStream) -> Self {
        self.output_stream = stream;
        self
    }

    #[must_use]
    pub fn with_native_extension(mut self, ext: impl Into<String>) -> Self {
        self.native_extension = Some(ext.into());
        self
    }

    #[must_use]
    pub fn with_append_sources(mut self, pattern: impl Into<String>) -> Self {
        self.append_sources = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: ParserKind) -> Self {
        self.parser = Some(parser);
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Parser to apply to this tool's output.
    ///
    /// An explicit `parser` wins; otherwise the tool name decides.
    #[must_use]
    pub fn parser_for(&self, tool_name: &str) -> ParserKind {
        self.parser.unwrap_or_else(|| ParserKind::for_tool_name(tool_name))
    }

    /// Extension for the native report file, `txt` when unset.
    #[must_use]
    pub fn native_extension_or_default(&self) -> &str {
        self.native_extension.as_deref().unwrap_or("txt")
    }
}

/// Where a tool writes the results worth keeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    #[default]
    Stdout,
    Stderr,
    /// The tool writes its own report files into the output directory.
    Filesystem,
}

/// Parser used to turn raw tool output into findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParserKind {
    Cppcheck,
    Semgrep,
    ScanBuild,
    /// Whole output as a single informational finding.
    Generic,
}

impl ParserKind {
    /// Infer the parser from a tool name; unknown tools get [`ParserKind::Generic`].
    #[must_use]
    pub fn for_tool_name(name: &str) -> Self {
        name.parse().unwrap_or(ParserKind::Generic)
    }
}

impl FromStr for ParserKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cppcheck" => Ok(ParserKind::Cppcheck),
            "semgrep" => Ok(ParserKind::Semgrep),
            "scan-build" => Ok(ParserKind::ScanBuild),
            "generic" => Ok(ParserKind::Generic),
            _ => Err(CoreError::UnknownParser { value: s.to_owned() }),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParserKind::Cppcheck => "cppcheck",
            ParserKind::Semgrep => "semgrep",
            ParserKind::ScanBuild => "scan-build",
            ParserKind::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// Raw record of one analyzer execution.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ToolRun {
    /// Configured tool name (the key in the `tools:` map).
    pub tool_name: String,
    /// Process exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
    /// When the process was spawned.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl ToolRun {
    /// Create a run record.
    pub fn new(
        tool_name: impl Into<String>,
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            exit_code,
            stdout,
            stderr,
            started_at,
            duration,
        }
    }

    /// When the process finished.
    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.started_at
            + chrono::Duration::from_std(self.duration).unwrap_or_else(|_| chrono::Duration::zero())
    }

    /// Whether the process exited with status 0.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}
