//! Layered YAML configuration.
//!
//! Built-in defaults are overlaid, in order, by the user config
//! (`<config dir>/sast/config.yaml`), `./sast.yaml` in the working
//! directory, and a file passed with `--config`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use sast_core::{OutputStream, ToolConfig};

use crate::ConfigError;

/// Full configuration: run defaults plus the tool table.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub tools: HashMap<String, ToolConfig>,
}

/// Default run settings, each overridable from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct Defaults {
    pub tools: Option<Vec<String>>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Configuration used before any file layer is applied.
    #[must_use]
    pub fn builtin_defaults() -> Self {
        let mut tools = HashMap::new();

        tools.insert(
            "cppcheck".to_owned(),
            ToolConfig::new("cppcheck")
                .with_args(["--enable=all", "--inconclusive", "--std=c++17", "--force"])
                .with_output_stream(OutputStream::Stderr)
                .with_native_extension("txt"),
        );

        tools.insert(
            "scan-build".to_owned(),
            ToolConfig::new("scan-build")
                .with_args([
                    "-o",
                    "{output_dir}/scan_build",
                    "clang++",
                    "-std=c++17",
                    "-Wall",
                    "-Wextra",
                    "-c",
                ])
                .with_output_stream(OutputStream::Filesystem)
                .with_native_extension("html")
                .with_append_sources("*.cpp"),
        );

        tools.insert(
            "semgrep".to_owned(),
            ToolConfig::new("semgrep")
                .with_args(["--config=auto", "--json"])
                .with_output_stream(OutputStream::Stdout)
                .with_native_extension("json"),
        );

        Self {
            defaults: Defaults {
                tools: Some(vec!["cppcheck".into(), "scan-build".into(), "semgrep".into()]),
                format: Some("native".into()),
                output: None,
            },
            tools,
        }
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Defaults set in `other` replace ours; tool entries replace ours wholesale.
    pub fn merge(&mut self, other: Config) {
        if other.defaults.tools.is_some() {
            self.defaults.tools = other.defaults.tools;
        }
        if other.defaults.format.is_some() {
            self.defaults.format = other.defaults.format;
        }
        if other.defaults.output.is_some() {
            self.defaults.output = other.defaults.output;
        }
        self.tools.extend(other.tools);
    }

    /// Configured tool names, sorted.
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse a config layer from YAML text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the text does not match the schema.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_owned(),
            source,
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }
}

/// Path of the per-user config layer, if the platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sast").join("config.yaml"))
}

/// Load built-in defaults and apply every config layer that exists.
///
/// # Errors
/// Returns [`ConfigError::NotFound`] if `explicit` is given but missing, and
/// [`ConfigError::Read`] / [`ConfigError::Parse`] for unreadable layers.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    load_layers(user_config_path(), Path::new("sast.yaml"), explicit)
}

fn load_layers(
    user: Option<PathBuf>,
    cwd: &Path,
    explicit: Option<&Path>,
) -> Result<Config, ConfigError> {
    let mut config = Config::builtin_defaults();

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.to_owned() });
        }
    }

    let layers = [user, Some(cwd.to_owned()), explicit.map(Path::to_owned)];
    for path in layers.into_iter().flatten() {
        if !path.exists() {
            continue;
        }
        let layer = Config::from_file(&path)?;
        tracing::info!(path = %path.display(), "loaded config layer");
        config.merge(layer);
    }

    Ok(config)
}
