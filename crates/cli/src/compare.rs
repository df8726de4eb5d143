//! `bucketlens compare`: reconcile two namespaces.

use std::path::PathBuf;

use bucketlens_cli::render::compare_text;
use bucketlens_cli::report::CompareOutput;
use bucketlens_config::Settings;
use bucketlens_recon::CompareMode;

use crate::exit_codes::EXIT_DIFFS;
use crate::source::resolve;
use crate::{write_json, CliError};

pub struct CompareArgs {
    pub source: String,
    pub target: String,
    pub versions: bool,
    pub prefix: Option<String>,
    pub json: bool,
    pub verbose: bool,
    pub output: Option<PathBuf>,
}

pub fn cmd_compare(args: CompareArgs, settings: &Settings) -> Result<(), CliError> {
    let mode = if args.versions || settings.compare.versions {
        CompareMode::AllVersions
    } else {
        CompareMode::CurrentOnly
    };
    let json = args.json || settings.output.json;
    let verbose = args.verbose || settings.output.verbose;

    let source = resolve(&args.source, args.prefix.as_deref(), settings)?;
    let target = resolve(&args.target, args.prefix.as_deref(), settings)?;

    // Source fully enumerated before target.
    let source_records = source.load()?;
    let target_records = target.load()?;

    tracing::info!(
        source = %source.label,
        target = %target.label,
        source_records = source_records.len(),
        target_records = target_records.len(),
        mode = %mode,
        "comparing"
    );

    let report = bucketlens_recon::run(&source_records, &target_records, mode);
    let summary = report.summary.clone();

    let output = CompareOutput {
        source: source.label.clone(),
        target: target.label.clone(),
        report,
    };

    write_json(&output, json, args.output.as_deref())?;
    if !json {
        print!("{}", compare_text(&output.report, verbose));
    }

    if summary.is_clean() {
        Ok(())
    } else {
        Err(CliError::new(
            EXIT_DIFFS,
            format!(
                "{} of {} compared entries differ",
                summary.total - summary.identical,
                summary.total
            ),
        ))
    }
}
