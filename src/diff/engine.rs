//! Core diff engine implementation.
//! Compares two result bundles with plain set and multiset arithmetic.

use super::schema::RegressionReport;
use crate::model::ResultBundle;

/// Compare a feature bundle against the master baseline
///
/// Pure and deterministic: the only ordering applied is the lexicographic
/// order of the underlying sets and maps.
///
/// # Example
/// ```ignore
/// use trapdoor::diff::compare_results;
///
/// let feature = store.load(&tool, BranchLabel::Feature)?;
/// let master = store.load(&tool, BranchLabel::Master)?;
/// let report = compare_results(&feature, &master);
/// ```
pub fn compare_results(feature: &ResultBundle, master: &ResultBundle) -> RegressionReport {
    let feature_messages = feature.messages();
    let master_messages = master.messages();

    let resolved_counter_deltas = master
        .counter()
        .subtract(feature.counter())
        .iter()
        .map(|(key, &n)| (key.clone(), n))
        .collect();

    let new_counter_deltas = feature
        .counter()
        .subtract(master.counter())
        .iter()
        .map(|(key, &n)| (key.clone(), n))
        .collect();

    RegressionReport {
        resolved: master_messages.difference(feature_messages),
        unchanged: master_messages.intersection(feature_messages),
        new: feature_messages.difference(master_messages),
        resolved_counter_deltas,
        new_counter_deltas,
    }
}
