//! Reduction of VEP output to one representative record per `Location`.
//!
//! Within a location, the first record without a `DISTANCE` entry wins: those
//! are the consequences that overlap a feature. When every record carries a
//! distance the last record of the group is kept. Distances are never
//! compared; the values are only tested for presence.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::vep::VepRecord;

/// Indices (into `records`) of the rows to keep, ascending.
pub fn select_indices(records: &[VepRecord]) -> Vec<usize> {
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (i, r) in records.iter().enumerate() {
        groups.entry(r.location.as_str()).or_default().push(i);
    }

    let mut fallback = 0usize;
    let mut chosen = groups
        .values()
        .filter_map(|idxs| match idxs.as_slice() {
            [only] => Some(*only),
            _ => idxs
                .iter()
                .copied()
                .find(|&i| records[i].distance().is_none())
                .or_else(|| {
                    fallback += 1;
                    idxs.last().copied()
                }),
        })
        .collect::<Vec<_>>();
    chosen.sort_unstable();
    debug!(
        groups = groups.len(),
        all_with_distance = fallback,
        "Selected one record per location"
    );

    let before = chosen.len();
    let mut seen = HashSet::new();
    chosen.retain(|&i| seen.insert(records[i].uploaded_variation.as_str()));
    debug!(
        dropped = before - chosen.len(),
        "Dropped repeated Uploaded_variation"
    );
    chosen
}

/// Keep one record per location, in input order, with unique
/// `Uploaded_variation`.
#[tracing::instrument(skip(records), fields(len = records.len()))]
pub fn select_highest_impact(records: Vec<VepRecord>) -> Vec<VepRecord> {
    let mut keep = vec![false; records.len()];
    for i in select_indices(&records) {
        keep[i] = true;
    }
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect()
}
