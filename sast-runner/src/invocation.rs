//! Turns a [`ToolConfig`] into a concrete command line for one project.

use std::path::Path;
use std::time::Duration;

use sast_core::{OutputStream, ToolConfig};

use crate::RunnerError;

/// Timeout applied when a tool config does not set `timeout_secs`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// A fully resolved tool command, ready to hand to a [`crate::ToolBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ToolInvocation {
    /// Configured tool name.
    pub tool_name: String,
    /// Executable to launch.
    pub program: String,
    /// Final argument list.
    pub args: Vec<String>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

impl ToolInvocation {
    /// Create an invocation directly.
    pub fn new(
        tool_name: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Resolve `config` against a project and output directory.
    ///
    /// - placeholders in the arguments are interpolated
    /// - stream tools get the project path as a trailing positional argument
    /// - files matching `append_sources` are appended
    ///
    /// # Errors
    /// Returns [`RunnerError::InvalidPattern`] if `append_sources` is not a valid glob.
    pub fn prepare(
        name: &str,
        config: &ToolConfig,
        project_path: &Path,
        output_dir: &Path,
    ) -> Result<Self, RunnerError> {
        let mut args = interpolate_args(&config.args, project_path, output_dir);

        match config.output_stream {
            OutputStream::Stdout | OutputStream::Stderr => {
                args.push(project_path.to_string_lossy().into_owned());
            }
            OutputStream::Filesystem => {}
        }

        if let Some(pattern) = &config.append_sources {
            args.extend(expand_sources(name, pattern, project_path)?);
        }

        let timeout = config.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self {
            tool_name: name.to_owned(),
            program: program_name(&config.command),
            args,
            timeout,
        })
    }

    /// The command line as a single string, for logging.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Replace `{output_dir}` and `{project_path}` in each argument.
#[must_use]
pub fn interpolate_args(args: &[String], project_path: &Path, output_dir: &Path) -> Vec<String> {
    let output_dir = output_dir.to_string_lossy();
    let project_path = project_path.to_string_lossy();
    args.iter()
        .map(|arg| {
            arg.replace("{output_dir}", &output_dir)
                .replace("{project_path}", &project_path)
        })
        .collect()
}

fn expand_sources(
    tool: &str,
    pattern: &str,
    project_path: &Path,
) -> Result<Vec<String>, RunnerError> {
    let full_pattern = project_path.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    let paths = glob::glob(&full_pattern).map_err(|source| RunnerError::InvalidPattern {
        tool: tool.to_owned(),
        pattern: pattern.to_owned(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => sources.push(path.to_string_lossy().into_owned()),
            Err(e) => tracing::warn!(tool, error = %e, "skipping unreadable source path"),
        }
    }
    if sources.is_empty() {
        tracing::warn!(tool, pattern, "no sources matched");
    }
    Ok(sources)
}

/// `scan-build` ships as a batch script on Windows.
fn program_name(command: &str) -> String {
    if cfg!(windows) && command == "scan-build" {
        "scan-build.bat".to_owned()
    } else {
        command.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn fixture_project() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sast_invocation_{}", std::process::id()));
        if let Err(e) = std::fs::create_dir_all(&dir) {
            panic!("failed to create {}: {e}", dir.display());
        }
        for name in ["b.cpp", "a.cpp", "notes.txt"] {
            if let Err(e) = std::fs::write(dir.join(name), "") {
                panic!("failed to write fixture: {e}");
            }
        }
        dir
    }

    #[test]
    fn interpolates_both_placeholders() {
        let args = vec!["-o".to_owned(), "{output_dir}/sb".to_owned(), "{project_path}".to_owned()];
        let out = interpolate_args(&args, Path::new("/src"), Path::new("/out"));
        assert_eq!(out, vec!["-o", "/out/sb", "/src"]);
    }

    #[test]
    fn stream_tools_get_project_path_appended() {
        let config = ToolConfig::new("cppcheck")
            .with_args(["--enable=all"])
            .with_output_stream(OutputStream::Stderr);
        let inv = match ToolInvocation::prepare("cppcheck", &config, Path::new("/src"), Path::new("/out")) {
            Ok(i) => i,
            Err(e) => panic!("prepare failed: {e}"),
        };
        assert_eq!(inv.args, vec!["--enable=all", "/src"]);
        assert_eq!(inv.timeout, DEFAULT_TIMEOUT);
        assert_eq!(inv.command_line(), "cppcheck --enable=all /src");
    }

    #[test]
    fn filesystem_tools_get_matching_sources_instead() {
        let project = fixture_project();
        let config = ToolConfig::new("scan-build")
            .with_args(["-o", "{output_dir}/scan_build", "clang++", "-c"])
            .with_output_stream(OutputStream::Filesystem)
            .with_append_sources("*.cpp")
            .with_timeout_secs(5);
        let inv = match ToolInvocation::prepare("scan-build", &config, &project, Path::new("/out")) {
            Ok(i) => i,
            Err(e) => panic!("prepare failed: {e}"),
        };

        let sources: Vec<&String> = inv.args.iter().skip(4).collect();
        assert_eq!(sources.len(), 2, "only .cpp files are appended: {:?}", inv.args);
        assert!(sources[0].ends_with("a.cpp"), "glob order is alphabetical");
        assert!(sources[1].ends_with("b.cpp"));
        assert_eq!(inv.args[1], "/out/scan_build");
        assert!(!inv.args.contains(&project.to_string_lossy().into_owned()));
        assert_eq!(inv.timeout, Duration::from_secs(5));

        std::fs::remove_dir_all(&project).ok();
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let config = ToolConfig::new("x")
            .with_output_stream(OutputStream::Filesystem)
            .with_append_sources("[*.cpp");
        let result = ToolInvocation::prepare("x", &config, Path::new("/src"), Path::new("/out"));
        assert!(matches!(result, Err(RunnerError::InvalidPattern { .. })));
    }

    proptest::proptest! {
        #[test]
        fn proptest_interpolation_leaves_no_placeholders(
            prefix in "[a-z=/-]{0,12}",
            suffix in "[a-z=/-]{0,12}",
        ) {
            let args = vec![
                format!("{prefix}{{output_dir}}{suffix}"),
                format!("{prefix}{{project_path}}{suffix}"),
            ];
            let out = interpolate_args(&args, Path::new("/p"), Path::new("/o"));
            let output_dir_placeholder = "{output_dir}";
            let project_path_placeholder = "{project_path}";
            for arg in &out {
                proptest::prop_assert!(!arg.contains(output_dir_placeholder));
                proptest::prop_assert!(!arg.contains(project_path_placeholder));
            }
            proptest::prop_assert_eq!(&out[0], &format!("{prefix}/o{suffix}"));
        }
    }
}
