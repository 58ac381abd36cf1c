//! Command-line interface for configfile.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use serde::Serialize;

use crate::configuration::{ConfigurationBuilder, ConfigurationProvider};
use crate::error::{ConfigFileError, Result};
use crate::extensions::ConfigurationExt;
use crate::parsers::{create_default_chain, ConfigData, Diagnostic, DiagnosticLevel};
use crate::path::combine;
use crate::provider::ConfigFileProvider;
use crate::source::ConfigFileConfigurationExt;

/// Flatten legacy .config XML documents into colon-delimited keys.
#[derive(Parser)]
#[command(name = "configfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a document and print every entry.
    Flatten {
        /// Path to the .config file
        file: PathBuf,

        /// Treat a missing file as empty instead of failing
        #[arg(long)]
        optional: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also print diagnostics collected while parsing
        #[arg(short, long)]
        diagnostics: bool,
    },

    /// Print the value at a key. Several segments are joined with ':'.
    Get {
        /// Path to the .config file
        file: PathBuf,

        /// Key segments (e.g. appSettings ClientValidationEnabled)
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

/// Output format for `flatten`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Serialized form of a flattened document.
#[derive(Debug, Serialize)]
struct Report<'a> {
    entries: &'a ConfigData,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a [Diagnostic]>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

/// Run an already parsed command line.
pub fn run_with(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Flatten {
            file,
            optional,
            format,
            diagnostics,
        } => flatten_command(&file, optional, format, diagnostics),
        Commands::Get { file, keys } => get_command(&file, &keys),
    }
}

/// Execute the flatten command.
fn flatten_command(
    file: &Path,
    optional: bool,
    format: OutputFormat,
    show_diagnostics: bool,
) -> Result<()> {
    let mut provider = ConfigFileProvider::from_file(file, optional, create_default_chain());
    provider.load()?;

    let report = Report {
        entries: provider.data(),
        diagnostics: show_diagnostics.then(|| provider.diagnostics()),
    };

    print!("{}", render(&report, format)?);
    Ok(())
}

/// Render a report in the requested format.
fn render(report: &Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(report)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for (key, value) in report.entries {
                match value {
                    Some(value) => out.push_str(&format!("{} = {}\n", style(key).cyan(), value)),
                    None => out.push_str(&format!("{} {}\n", style(key).cyan(), style("(null)").dim())),
                }
            }

            if let Some(diagnostics) = report.diagnostics {
                if !diagnostics.is_empty() {
                    out.push('\n');
                    out.push_str(&format!("{}\n", style("Diagnostics:").bold()));
                }
                for diagnostic in diagnostics {
                    let level = match diagnostic.level {
                        DiagnosticLevel::Info => style("info").blue(),
                        DiagnosticLevel::Warning => style("warning").yellow().bold(),
                    };
                    out.push_str(&format!("  {level}: {}\n", diagnostic.message));
                }
            }
            Ok(out)
        }
    }
}

/// Execute the get command.
fn get_command(file: &Path, keys: &[String]) -> Result<()> {
    let configuration = ConfigurationBuilder::new().add_config_file(file).build()?;
    let segments: Vec<&str> = keys.iter().map(String::as_str).collect();

    match configuration.get_value(&segments)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(ConfigFileError::MissingValue(combine(&segments))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_flatten() {
        let cli = Cli::parse_from(["configfile", "flatten", "Web.config"]);

        let Commands::Flatten {
            file,
            optional,
            format,
            diagnostics,
        } = cli.command
        else {
            unreachable!("expected flatten");
        };
        assert_eq!(file, PathBuf::from("Web.config"));
        assert!(!optional);
        assert_eq!(format, OutputFormat::Text);
        assert!(!diagnostics);
    }

    #[test]
    fn test_cli_parse_flatten_with_options() {
        let cli = Cli::parse_from([
            "configfile",
            "flatten",
            "Web.config",
            "--optional",
            "--format",
            "yaml",
            "--diagnostics",
        ]);

        let Commands::Flatten {
            optional,
            format,
            diagnostics,
            ..
        } = cli.command
        else {
            unreachable!("expected flatten");
        };
        assert!(optional);
        assert_eq!(format, OutputFormat::Yaml);
        assert!(diagnostics);
    }

    #[test]
    fn test_cli_parse_get() {
        let cli = Cli::parse_from(["configfile", "get", "Web.config", "appSettings", "Mode"]);

        let Commands::Get { file, keys } = cli.command else {
            unreachable!("expected get");
        };
        assert_eq!(file, PathBuf::from("Web.config"));
        assert_eq!(keys, vec!["appSettings", "Mode"]);
    }

    #[test]
    fn test_cli_get_requires_key() {
        assert!(Cli::try_parse_from(["configfile", "get", "Web.config"]).is_err());
    }

    #[test]
    fn test_render_json() {
        let mut entries = ConfigData::new();
        entries.insert("appSettings:Mode".to_string(), Some("fast".to_string()));
        entries.insert("appSettings:Empty".to_string(), None);
        let report = Report {
            entries: &entries,
            diagnostics: None,
        };

        let value: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value["entries"]["appSettings:Mode"], "fast");
        assert!(value["entries"]["appSettings:Empty"].is_null());
        assert!(value.get("diagnostics").is_none());
    }

    #[test]
    fn test_render_yaml_with_diagnostics() {
        let entries = ConfigData::new();
        let diagnostics = vec![Diagnostic {
            level: DiagnosticLevel::Warning,
            message: "skipped".to_string(),
        }];
        let report = Report {
            entries: &entries,
            diagnostics: Some(&diagnostics),
        };

        let yaml = render(&report, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("level: warning"));
        assert!(yaml.contains("message: skipped"));
    }
}
