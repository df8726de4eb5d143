// bucketlens CLI - compare and analyze versioned bucket listings

mod analyze;
mod compare;
mod exit_codes;
mod source;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use bucketlens_config::Settings;
use exit_codes::{config_exit_code, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "bucketlens")]
#[command(about = "Compare and analyze versioned object-storage listings")]
#[command(version)]
struct Cli {
    /// Settings file (default: ~/.config/bucketlens/settings.toml)
    #[arg(long, global = true, env = "BUCKETLENS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare objects between two namespaces (exit 0 = identical, exit 1 = differences)
    #[command(after_help = "\
A namespace is a listing export (.jsonl, .ndjson, .json, .csv) or
alias/bucket[/prefix] resolved through the settings file.

Examples:
  bucketlens compare prod/assets dr/assets
  bucketlens compare prod/assets/images dr/assets/images
  bucketlens compare --versions prod/assets dr/assets
  bucketlens compare source.jsonl target.jsonl --json
  mc ls --recursive --versions --json prod/assets > prod.jsonl")]
    Compare {
        /// Source namespace
        source: String,

        /// Target namespace
        target: String,

        /// Compare all object versions (default: current versions only)
        #[arg(long)]
        versions: bool,

        /// Only compare keys under this prefix (overrides the namespace prefix)
        #[arg(long)]
        prefix: Option<String>,

        /// Output JSON to stdout instead of the text report
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Write JSON output to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Analyze object distribution and detect hidden objects
    #[command(after_help = "\
Reports current versions, old versions and delete markers, which helps
explain differences between bucket metrics and visible objects.

Examples:
  bucketlens analyze prod/assets
  bucketlens analyze --verbose prod/assets/images
  bucketlens analyze prod.jsonl --json")]
    Analyze {
        /// Namespace to analyze
        namespace: String,

        /// Only analyze keys under this prefix (overrides the namespace prefix)
        #[arg(long)]
        prefix: Option<String>,

        /// Output JSON to stdout instead of the text report
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Write JSON output to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Compare { verbose, .. } | Commands::Analyze { verbose, .. } => *verbose,
        }
    }
}

/// Logs go to stderr; stdout carries reports only.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());

    let result = load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::Compare {
            source,
            target,
            versions,
            prefix,
            json,
            verbose,
            output,
        } => compare::cmd_compare(
            compare::CompareArgs {
                source,
                target,
                versions,
                prefix,
                json,
                verbose,
                output,
            },
            &settings,
        ),
        Commands::Analyze {
            namespace,
            prefix,
            json,
            verbose,
            output,
        } => analyze::cmd_analyze(
            analyze::AnalyzeArgs {
                namespace,
                prefix,
                json,
                verbose,
                output,
            },
            &settings,
        ),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Settings::config_path);
    Settings::load_from(&path).map_err(|e| {
        CliError::new(config_exit_code(&e), e.to_string())
            .with_hint(format!("settings file: {}", path.display()))
    })
}

/// Serialize `value`; print it when `to_stdout`, write it when `file` is set.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    to_stdout: bool,
    file: Option<&Path>,
) -> Result<(), CliError> {
    if !to_stdout && file.is_none() {
        return Ok(());
    }

    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(EXIT_OUTPUT, format!("JSON serialization error: {e}")))?;

    if let Some(path) = file {
        std::fs::write(path, &json_str).map_err(|e| {
            CliError::new(EXIT_OUTPUT, format!("cannot write {}: {e}", path.display()))
        })?;
        eprintln!("wrote {}", path.display());
    }

    if to_stdout {
        println!("{json_str}");
    }
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
