//! Human-readable reports.

use std::fmt::Write;

use bucketlens_recon::group::group_by_key;
use bucketlens_recon::{
    CompareReport, DistributionSummary, Finding, OutcomeStatus, VersionedRecord,
};

fn modified(record: &VersionedRecord) -> String {
    record
        .modified_at
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| "unknown".to_string())
}

fn record_line(label: &str, record: &VersionedRecord) -> String {
    format!(
        "  {label}: Fingerprint={}, Size={}, Modified={}",
        record.fingerprint,
        record.size_bytes,
        modified(record)
    )
}

/// Render a comparison report. Identical entries and record details are
/// only listed in verbose mode.
pub fn compare_text(report: &CompareReport<'_>, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Comparison Results:");
    let _ = writeln!(out, "===================");
    let _ = writeln!(out, "Mode: {}", report.meta.mode);

    for outcome in &report.outcomes {
        match outcome.status {
            OutcomeStatus::Identical => {
                if verbose {
                    let _ = writeln!(out, "✓ {} - Identical", outcome.identifier);
                }
            }
            OutcomeStatus::Different => {
                let reasons: Vec<String> = outcome.reasons.iter().map(|r| r.to_string()).collect();
                let _ = writeln!(
                    out,
                    "⚠ {} - Different ({})",
                    outcome.identifier,
                    reasons.join(", ")
                );
                if verbose {
                    if let Some(s) = outcome.source {
                        let _ = writeln!(out, "{}", record_line("Source", s));
                    }
                    if let Some(t) = outcome.target {
                        let _ = writeln!(out, "{}", record_line("Target", t));
                    }
                }
            }
            OutcomeStatus::MissingInSource => {
                let _ = writeln!(out, "- {} - Missing in source", outcome.identifier);
            }
            OutcomeStatus::MissingInTarget => {
                let _ = writeln!(out, "+ {} - Missing in target", outcome.identifier);
            }
        }
    }

    let s = &report.summary;
    let _ = writeln!(out, "\nSummary:");
    let _ = writeln!(out, "  Identical: {}", s.identical);
    let _ = writeln!(out, "  Different: {}", s.different);
    let _ = writeln!(out, "  Missing in source: {}", s.missing_in_source);
    let _ = writeln!(out, "  Missing in target: {}", s.missing_in_target);
    let _ = writeln!(out, "  Total compared: {}", s.total);
    out
}

/// Status label for one version in the detailed listing.
fn version_label(record: &VersionedRecord) -> String {
    let mut label = String::new();
    if record.is_current {
        label.push_str("[CURRENT]");
    }
    if record.is_tombstone {
        label.push_str("[DELETE_MARKER]");
    }
    if label.is_empty() {
        label.push_str("[OLD_VERSION]");
    }
    label
}

/// Render distribution statistics, the optional per-key detail and the
/// discrepancy hints.
pub fn analyze_text(
    summary: &DistributionSummary,
    findings: &[Finding],
    records: &[VersionedRecord],
    verbose: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Object Distribution Analysis:");
    let _ = writeln!(out, "============================");
    let _ = writeln!(out, "Total Records (all versions): {}", summary.total_records);
    let _ = writeln!(out, "Current Versions: {}", summary.current_records);
    let _ = writeln!(out, "Superseded Versions: {}", summary.superseded_records);
    let _ = writeln!(out, "Delete Markers: {}", summary.tombstones);
    let _ = writeln!(out, "Unique Object Keys: {}", summary.unique_keys);
    let _ = writeln!(out, "Total Size (all versions): {} bytes", summary.total_bytes);
    let _ = writeln!(out, "Current Version Size: {} bytes", summary.current_bytes);

    if verbose && !records.is_empty() {
        let _ = writeln!(out, "\nDetailed Object Analysis:");
        let _ = writeln!(out, "========================");
        for (key, versions) in group_by_key(records) {
            let _ = writeln!(out, "\nObject: {key}");
            let _ = writeln!(out, "  Total versions: {}", versions.len());
            for (i, v) in versions.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} Size: {}, Fingerprint: {}, VersionID: {}, Modified: {}",
                    i + 1,
                    version_label(v),
                    v.size_bytes,
                    v.fingerprint,
                    v.version_id,
                    modified(v)
                );
            }
        }
    }

    let _ = writeln!(out, "\nPotential Discrepancy Sources:");
    let _ = writeln!(out, "==============================");
    for finding in findings {
        match finding {
            Finding::TombstonesPresent { count } => {
                let _ = writeln!(
                    out,
                    "⚠ Found {count} delete markers that might not be counted in some metrics"
                );
            }
            Finding::SupersededVersionsPresent { count } => {
                let _ = writeln!(
                    out,
                    "ℹ Found {count} old versions (these should not affect current object counts)"
                );
            }
            Finding::NoHiddenObjects => {}
        }
    }

    let _ = writeln!(out, "\nMetrics Comparison:");
    let _ = writeln!(
        out,
        "- Current objects (should match bucket metrics): {}",
        summary.current_records
    );
    let _ = writeln!(
        out,
        "- Total storage entries (all versions): {}",
        summary.total_records
    );
    let _ = writeln!(out, "- Delete markers: {}", summary.tombstones);

    if findings.contains(&Finding::NoHiddenObjects) {
        let _ = writeln!(
            out,
            "\n✅ No hidden objects detected - metric discrepancy might be due to other factors"
        );
    } else {
        let _ = writeln!(
            out,
            "\n🔍 Recommendation: These hidden objects might explain metric discrepancies"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketlens_recon::{analyze, findings, run, CompareMode};

    fn rec(key: &str, version_id: &str, fingerprint: &str, size: i64, current: bool) -> VersionedRecord {
        VersionedRecord {
            key: key.into(),
            fingerprint: fingerprint.into(),
            size_bytes: size,
            modified_at: None,
            version_id: version_id.into(),
            is_current: current,
            is_tombstone: false,
            storage_class: "STANDARD".into(),
        }
    }

    #[test]
    fn compare_text_hides_identical_unless_verbose() {
        let source = vec![rec("a", "v1", "x", 1, true), rec("b", "v1", "x", 1, true)];
        let target = vec![rec("a", "v1", "x", 1, true), rec("c", "v1", "x", 1, true)];
        let report = run(&source, &target, CompareMode::CurrentOnly);

        let text = compare_text(&report, false);
        assert!(text.starts_with("Comparison Results:\n===================\nMode: current_only\n"));
        assert!(!text.contains("✓ a - Identical"));
        assert!(text.contains("+ b - Missing in target"));
        assert!(text.contains("- c - Missing in source"));
        assert!(text.contains("  Total compared: 3"));

        let text = compare_text(&report, true);
        assert!(text.contains("✓ a - Identical"));
    }

    #[test]
    fn compare_text_lists_reasons_and_details() {
        let source = vec![rec("a", "v1", "x", 1, true)];
        let target = vec![rec("a", "v1", "y", 2, true)];
        let report = run(&source, &target, CompareMode::CurrentOnly);

        let text = compare_text(&report, true);
        assert!(text.contains("⚠ a - Different (Fingerprint differs, Size differs)"));
        assert!(text.contains("  Source: Fingerprint=x, Size=1, Modified=unknown"));
        assert!(text.contains("  Target: Fingerprint=y, Size=2, Modified=unknown"));
    }

    #[test]
    fn analyze_text_detail_and_findings() {
        let mut deleted = rec("b", "v9", "", 0, true);
        deleted.is_tombstone = true;
        let records = vec![rec("a", "v2", "x", 5, true), rec("a", "v1", "w", 3, false), deleted];
        let summary = analyze(&records);
        let f = findings(&summary);

        let text = analyze_text(&summary, &f, &records, true);
        assert!(text.contains("Total Records (all versions): 3"));
        assert!(text.contains("Current Version Size: 5 bytes"));
        assert!(text.contains("Object: a"));
        assert!(text.contains("  1. [CURRENT] Size: 5"));
        assert!(text.contains("  2. [OLD_VERSION] Size: 3"));
        assert!(text.contains("[CURRENT][DELETE_MARKER]"));
        assert!(text.contains("⚠ Found 1 delete markers"));
        assert!(text.contains("🔍 Recommendation"));

        let quiet = analyze_text(&summary, &f, &records, false);
        assert!(!quiet.contains("Detailed Object Analysis"));
    }

    #[test]
    fn analyze_text_clean_listing() {
        let records = vec![rec("a", "v1", "x", 5, true)];
        let summary = analyze(&records);
        let text = analyze_text(&summary, &findings(&summary), &records, false);
        assert!(text.contains("✅ No hidden objects detected"));
    }
}
