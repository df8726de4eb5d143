//! JSON document shapes for `--json` and `--output`.

use serde::Serialize;

use bucketlens_recon::{CompareReport, DistributionSummary, Finding};

/// `bucketlens compare` output: engine report plus the namespaces compared.
#[derive(Debug, Serialize)]
pub struct CompareOutput<'a> {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub report: CompareReport<'a>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeMeta {
    pub namespace: String,
    pub engine_version: String,
    pub run_at: String,
}

/// `bucketlens analyze` output.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub meta: AnalyzeMeta,
    pub summary: DistributionSummary,
    pub findings: Vec<Finding>,
}

impl AnalyzeOutput {
    pub fn new(namespace: impl Into<String>, summary: DistributionSummary) -> Self {
        let findings = bucketlens_recon::findings(&summary);
        Self {
            meta: AnalyzeMeta {
                namespace: namespace.into(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            summary,
            findings,
        }
    }
}
