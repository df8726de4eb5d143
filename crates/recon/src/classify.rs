use crate::model::{ComparisonOutcome, DifferenceReason, OutcomeStatus, VersionedRecord};

/// Classify one source/target pairing.
///
/// A missing source is reported before a missing target. Two present records
/// are identical when fingerprint and size both match; otherwise each
/// differing attribute contributes a reason, fingerprint first.
pub fn classify_pair<'a>(
    identifier: String,
    source: Option<&'a VersionedRecord>,
    target: Option<&'a VersionedRecord>,
) -> ComparisonOutcome<'a> {
    let mut reasons = Vec::new();

    let status = match (source, target) {
        (None, _) => OutcomeStatus::MissingInSource,
        (Some(_), None) => OutcomeStatus::MissingInTarget,
        (Some(s), Some(t)) if s.fingerprint == t.fingerprint && s.size_bytes == t.size_bytes => {
            OutcomeStatus::Identical
        }
        (Some(s), Some(t)) => {
            if s.fingerprint != t.fingerprint {
                reasons.push(DifferenceReason::FingerprintDiffers);
            }
            if s.size_bytes != t.size_bytes {
                reasons.push(DifferenceReason::SizeDiffers);
            }
            OutcomeStatus::Different
        }
    };

    ComparisonOutcome {
        identifier,
        status,
        source,
        target,
        reasons,
    }
}

/// Identifier used for one version in all-versions mode.
pub fn version_identifier(key: &str, version_id: &str) -> String {
    format!("{key} (version: {version_id})")
}
