use std::collections::{BTreeMap, BTreeSet};

use crate::model::VersionedRecord;

/// Group records by key. Records sharing a key keep their listing order.
pub fn group_by_key(records: &[VersionedRecord]) -> BTreeMap<&str, Vec<&VersionedRecord>> {
    let mut groups: BTreeMap<&str, Vec<&VersionedRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.key.as_str()).or_default().push(record);
    }
    groups
}

/// Index one key's versions by version id. A duplicated id keeps the last record seen.
pub fn index_versions<'a>(records: &[&'a VersionedRecord]) -> BTreeMap<&'a str, &'a VersionedRecord> {
    records
        .iter()
        .map(|&record| (record.version_id.as_str(), record))
        .collect()
}

/// Sorted union of the keys of two maps.
pub fn key_union<'k, A, B>(left: &BTreeMap<&'k str, A>, right: &BTreeMap<&'k str, B>) -> BTreeSet<&'k str> {
    left.keys().chain(right.keys()).copied().collect()
}
