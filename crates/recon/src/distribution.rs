use crate::model::{DistributionSummary, Finding, VersionState, VersionedRecord};

/// Single pass over one listing: partition records by state and accumulate sizes.
///
/// Byte totals saturate at `i64::MAX`. A negative size counts as zero.
pub fn analyze(records: &[VersionedRecord]) -> DistributionSummary {
    let mut summary = DistributionSummary::default();

    for record in records {
        let size = record.size_bytes.max(0);
        summary.total_records += 1;
        summary.total_bytes = summary.total_bytes.saturating_add(size);
        *summary
            .per_key_version_counts
            .entry(record.key.clone())
            .or_insert(0) += 1;

        match record.state() {
            VersionState::Tombstone => summary.tombstones += 1,
            VersionState::Current => {
                summary.current_records += 1;
                summary.current_bytes = summary.current_bytes.saturating_add(size);
            }
            VersionState::Superseded => summary.superseded_records += 1,
        }
    }

    summary.unique_keys = summary.per_key_version_counts.len();

    tracing::debug!(
        records = summary.total_records,
        unique_keys = summary.unique_keys,
        tombstones = summary.tombstones,
        "analyzed listing"
    );

    summary
}

/// Explain why visible object counts may disagree with bucket metrics.
pub fn findings(summary: &DistributionSummary) -> Vec<Finding> {
    let mut out = Vec::new();
    if summary.tombstones > 0 {
        out.push(Finding::TombstonesPresent {
            count: summary.tombstones,
        });
    }
    if summary.superseded_records > 0 {
        out.push(Finding::SupersededVersionsPresent {
            count: summary.superseded_records,
        });
    }
    if summary.tombstones == 0 {
        out.push(Finding::NoHiddenObjects);
    }
    out
}
