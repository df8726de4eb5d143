use crate::classify::{classify_pair, version_identifier};
use crate::evidence::compute_summary;
use crate::group::{group_by_key, index_versions, key_union};
use crate::model::{CompareMeta, CompareMode, CompareReport, ComparisonOutcome, VersionedRecord};

/// Reconcile two namespace listings. Returns one outcome per key
/// (`CurrentOnly`) or per (key, version id) pair (`AllVersions`),
/// ordered by key and then version id.
pub fn reconcile<'a>(
    source: &'a [VersionedRecord],
    target: &'a [VersionedRecord],
    mode: CompareMode,
) -> Vec<ComparisonOutcome<'a>> {
    let source_groups = group_by_key(source);
    let target_groups = group_by_key(target);
    let keys = key_union(&source_groups, &target_groups);

    let mut outcomes = Vec::with_capacity(keys.len());

    for key in keys {
        let source_versions = source_groups.get(key).map(Vec::as_slice).unwrap_or(&[]);
        let target_versions = target_groups.get(key).map(Vec::as_slice).unwrap_or(&[]);

        match mode {
            CompareMode::CurrentOnly => {
                let s = current_representative(source_versions);
                let t = current_representative(target_versions);
                outcomes.push(classify_pair(key.to_string(), s, t));
            }
            CompareMode::AllVersions => {
                outcomes.extend(compare_versions(key, source_versions, target_versions));
            }
        }
    }

    tracing::debug!(
        mode = %mode,
        source_records = source.len(),
        target_records = target.len(),
        outcomes = outcomes.len(),
        "reconciled listings"
    );

    outcomes
}

/// Reconcile and wrap the outcomes with a summary and run metadata.
pub fn run<'a>(
    source: &'a [VersionedRecord],
    target: &'a [VersionedRecord],
    mode: CompareMode,
) -> CompareReport<'a> {
    let outcomes = reconcile(source, target, mode);
    let summary = compute_summary(&outcomes);

    CompareReport {
        meta: CompareMeta {
            mode,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        outcomes,
    }
}

/// First live current record in listing order.
///
/// A listing with several current records for one key (stale snapshot,
/// inconsistent backend) resolves to the earliest one listed.
fn current_representative<'a>(versions: &[&'a VersionedRecord]) -> Option<&'a VersionedRecord> {
    versions.iter().copied().find(|r| r.is_live_current())
}

fn compare_versions<'a>(
    key: &str,
    source_versions: &[&'a VersionedRecord],
    target_versions: &[&'a VersionedRecord],
) -> Vec<ComparisonOutcome<'a>> {
    let source_index = index_versions(source_versions);
    let target_index = index_versions(target_versions);

    key_union(&source_index, &target_index)
        .into_iter()
        .map(|version_id| {
            classify_pair(
                version_identifier(key, version_id),
                source_index.get(version_id).copied(),
                target_index.get(version_id).copied(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DifferenceReason, OutcomeStatus};

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

    fn tombstone(key: &str, version_id: &str, current: bool) -> VersionedRecord {
        VersionedRecord {
            is_tombstone: true,
            ..rec(key, version_id, "", 0, current)
        }
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        assert!(reconcile(&[], &[], CompareMode::CurrentOnly).is_empty());
        assert!(reconcile(&[], &[], CompareMode::AllVersions).is_empty());
    }

    #[test]
    fn identical_current_versions() {
        let source = vec![rec("a", "v1", "x", 10, true)];
        let target = vec![rec("a", "v9", "x", 10, true)];
        let out = reconcile(&source, &target, CompareMode::CurrentOnly);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].identifier, "a");
        assert_eq!(out[0].status, OutcomeStatus::Identical);
    }

    #[test]
    fn different_content_reports_both_reasons() {
        let source = vec![rec("a", "v1", "x", 10, true)];
        let target = vec![rec("a", "v1", "y", 20, true)];
        let out = reconcile(&source, &target, CompareMode::CurrentOnly);
        assert_eq!(out[0].status, OutcomeStatus::Different);
        assert_eq!(
            out[0].reasons,
            vec![DifferenceReason::FingerprintDiffers, DifferenceReason::SizeDiffers]
        );
    }

    #[test]
    fn source_only_key_is_missing_in_target() {
        let source = vec![rec("b", "v1", "x", 1, true)];
        let out = reconcile(&source, &[], CompareMode::CurrentOnly);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, OutcomeStatus::MissingInTarget);
        assert!(out[0].target.is_none());
    }

    #[test]
    fn current_only_ignores_superseded_and_tombstones() {
        // Source key "a" is deleted (current tombstone) with an older live version.
        let source = vec![tombstone("a", "v2", true), rec("a", "v1", "x", 10, false)];
        let target = vec![rec("a", "v1", "x", 10, true)];
        let out = reconcile(&source, &target, CompareMode::CurrentOnly);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, OutcomeStatus::MissingInSource);
        assert_eq!(out[0].target.map(|r| r.version_id.as_str()), Some("v1"));
    }

    #[test]
    fn key_with_no_current_version_on_either_side_is_missing_in_source() {
        let source = vec![rec("a", "v1", "x", 10, false)];
        let target = vec![rec("a", "v1", "x", 10, false)];
        let out = reconcile(&source, &target, CompareMode::CurrentOnly);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, OutcomeStatus::MissingInSource);
    }

    #[test]
    fn multiple_current_records_pick_first_listed() {
        let source = vec![
            rec("a", "v1", "first", 10, false),
            rec("a", "v2", "second", 10, true),
            rec("a", "v3", "third", 10, true),
        ];
        let target = vec![rec("a", "v7", "second", 10, true)];
        let out = reconcile(&source, &target, CompareMode::CurrentOnly);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source.map(|r| r.version_id.as_str()), Some("v2"));
        assert_eq!(out[0].status, OutcomeStatus::Identical);

        // Reordering the listing changes the representative.
        let reordered = vec![source[2].clone(), source[1].clone()];
        let out = reconcile(&reordered, &target, CompareMode::CurrentOnly);
        assert_eq!(out[0].source.map(|r| r.version_id.as_str()), Some("v3"));
        assert_eq!(out[0].status, OutcomeStatus::Different);
    }

    #[test]
    fn all_versions_pairs_by_version_id() {
        let source = vec![rec("c", "v1", "x", 5, false), rec("c", "v2", "y", 6, true)];
        let target = vec![rec("c", "v1", "x", 5, false), rec("c", "v3", "z", 7, true)];
        let out = reconcile(&source, &target, CompareMode::AllVersions);
        assert_eq!(out.len(), 3);

        assert_eq!(out[0].identifier, "c (version: v1)");
        assert_eq!(out[0].status, OutcomeStatus::Identical);
        assert_eq!(out[1].identifier, "c (version: v2)");
        assert_eq!(out[1].status, OutcomeStatus::MissingInTarget);
        assert_eq!(out[2].identifier, "c (version: v3)");
        assert_eq!(out[2].status, OutcomeStatus::MissingInSource);
    }

    #[test]
    fn all_versions_includes_tombstones() {
        let source = vec![tombstone("d", "v2", true), rec("d", "v1", "x", 5, false)];
        let target = vec![rec("d", "v1", "x", 5, true)];
        let out = reconcile(&source, &target, CompareMode::AllVersions);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].identifier, "d (version: v2)");
        assert_eq!(out[1].status, OutcomeStatus::MissingInTarget);
        assert!(out[1].source.map(|r| r.is_tombstone).unwrap_or(false));
    }

    #[test]
    fn outcomes_are_key_sorted() {
        let source = vec![rec("z", "v1", "x", 1, true), rec("m", "v1", "x", 1, true)];
        let target = vec![rec("a", "v1", "x", 1, true)];
        let out = reconcile(&source, &target, CompareMode::CurrentOnly);
        let ids: Vec<&str> = out.iter().map(|o| o.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }

    #[test]
    fn run_attaches_summary_and_meta() {
        let source = vec![rec("a", "v1", "x", 1, true), rec("b", "v1", "x", 1, true)];
        let target = vec![rec("a", "v1", "x", 1, true)];
        let report = run(&source, &target, CompareMode::CurrentOnly);
        assert_eq!(report.meta.mode, CompareMode::CurrentOnly);
        assert_eq!(report.meta.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.identical, 1);
        assert_eq!(report.summary.missing_in_target, 1);
        assert!(!report.summary.is_clean());
    }
}
