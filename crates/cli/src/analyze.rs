//! `bucketlens analyze`: distribution statistics for one namespace.

use std::path::PathBuf;

use bucketlens_cli::render::analyze_text;
use bucketlens_cli::report::AnalyzeOutput;
use bucketlens_config::Settings;

use crate::source::resolve;
use crate::{write_json, CliError};

pub struct AnalyzeArgs {
    pub namespace: String,
    pub prefix: Option<String>,
    pub json: bool,
    pub verbose: bool,
    pub output: Option<PathBuf>,
}

pub fn cmd_analyze(args: AnalyzeArgs, settings: &Settings) -> Result<(), CliError> {
    let json = args.json || settings.output.json;
    let verbose = args.verbose || settings.output.verbose;

    let namespace = resolve(&args.namespace, args.prefix.as_deref(), settings)?;
    let records = namespace.load()?;
    tracing::info!(namespace = %namespace.label, records = records.len(), "analyzing");

    let summary = bucketlens_recon::analyze(&records);
    let output = AnalyzeOutput::new(namespace.label.clone(), summary);

    write_json(&output, json, args.output.as_deref())?;
    if !json {
        print!(
            "{}",
            analyze_text(&output.summary, &output.findings, &records, verbose)
        );
    }

    Ok(())
}
