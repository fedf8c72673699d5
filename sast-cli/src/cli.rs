//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "sast", version, about = "Run SAST tools and aggregate results")]
pub struct Cli {
    /// Path to the project to analyze
    pub path: PathBuf,

    /// Output format: native, sarif, html, json [default: native]
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output folder [default: <PATH>/sast_report]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated list of tools to run (overrides config)
    #[arg(short, long, value_delimiter = ',')]
    pub tools: Option<Vec<String>>,

    /// Path to an extra config file, applied last
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_split_on_commas() {
        let cli = match Cli::try_parse_from(["sast", "proj", "-t", "cppcheck,semgrep"]) {
            Ok(c) => c,
            Err(e) => panic!("parse failed: {e}"),
        };
        assert_eq!(cli.path, PathBuf::from("proj"));
        assert_eq!(
            cli.tools,
            Some(vec!["cppcheck".to_owned(), "semgrep".to_owned()])
        );
        assert!(cli.format.is_none());
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["sast"]).is_err());
    }

    #[test]
    fn long_flags_are_accepted() {
        let cli = match Cli::try_parse_from([
            "sast", "proj", "--format", "html", "--output", "out", "--config", "c.yaml",
        ]) {
            Ok(c) => c,
            Err(e) => panic!("parse failed: {e}"),
        };
        assert_eq!(cli.format.as_deref(), Some("html"));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
    }
}
