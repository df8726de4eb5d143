use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One version of one object in a namespace enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedRecord {
    pub key: String,
    /// Content fingerprint (entity tag). Opaque; compared for equality only.
    pub fingerprint: String,
    pub size_bytes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version_id: String,
    pub is_current: bool,
    pub is_tombstone: bool,
    #[serde(default)]
    pub storage_class: String,
}

impl VersionedRecord {
    /// Tombstone wins over current/superseded.
    pub fn state(&self) -> VersionState {
        if self.is_tombstone {
            VersionState::Tombstone
        } else if self.is_current {
            VersionState::Current
        } else {
            VersionState::Superseded
        }
    }

    /// A current version carrying live data.
    pub fn is_live_current(&self) -> bool {
        self.is_current && !self.is_tombstone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionState {
    Current,
    Superseded,
    Tombstone,
}

/// Which versions take part in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Only the live current version of each key.
    #[default]
    CurrentOnly,
    /// Every version, tombstones included, paired by version id.
    AllVersions,
}

impl std::fmt::Display for CompareMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentOnly => write!(f, "current_only"),
            Self::AllVersions => write!(f, "all_versions"),
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Identical,
    Different,
    MissingInSource,
    MissingInTarget,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::Different => "different",
            Self::MissingInSource => "missing_in_source",
            Self::MissingInTarget => "missing_in_target",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifferenceReason {
    #[serde(rename = "Fingerprint differs")]
    FingerprintDiffers,
    #[serde(rename = "Size differs")]
    SizeDiffers,
}

impl std::fmt::Display for DifferenceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FingerprintDiffers => write!(f, "Fingerprint differs"),
            Self::SizeDiffers => write!(f, "Size differs"),
        }
    }
}

/// One classified diff entry. Records are borrowed from the compared listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonOutcome<'a> {
    pub identifier: String,
    pub status: OutcomeStatus,
    pub source: Option<&'a VersionedRecord>,
    pub target: Option<&'a VersionedRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<DifferenceReason>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub total: usize,
    pub identical: usize,
    pub different: usize,
    pub missing_in_source: usize,
    pub missing_in_target: usize,
}

impl ComparisonSummary {
    /// Everything compared was identical (an empty comparison is clean).
    pub fn is_clean(&self) -> bool {
        self.different == 0 && self.missing_in_source == 0 && self.missing_in_target == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareMeta {
    pub mode: CompareMode,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareReport<'a> {
    pub meta: CompareMeta,
    pub summary: ComparisonSummary,
    pub outcomes: Vec<ComparisonOutcome<'a>>,
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Aggregate statistics over one namespace enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionSummary {
    pub total_records: usize,
    pub current_records: usize,
    pub superseded_records: usize,
    pub tombstones: usize,
    pub total_bytes: i64,
    pub current_bytes: i64,
    pub unique_keys: usize,
    pub per_key_version_counts: BTreeMap<String, usize>,
}

/// Hints about why visible object counts may disagree with backend metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    TombstonesPresent { count: usize },
    SupersededVersionsPresent { count: usize },
    NoHiddenObjects,
}
