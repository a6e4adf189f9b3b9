use serde::Serialize;

use crate::error::Result;
use crate::ind_set::IndSet;
use crate::model::{Ind, IndKind};

/// Counters reported by [`split_maximal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitStats {
    /// Maximal multi-attribute dependencies that were expanded.
    pub expanded: usize,
    /// Atomic dependencies added to the set.
    pub inserted: usize,
    /// Atomic dependencies whose id was already present.
    pub skipped_existing: usize,
}

/// Expand every maximal dependency with more than one attribute into one
/// atomic dependency per position.
///
/// Existing entries win: an atomic id already in the set keeps its original
/// provenance. The maximal entries themselves stay in the set.
pub fn split_maximal(set: &mut IndSet) -> Result<SplitStats> {
    let maximal: Vec<Ind> = set
        .iter()
        .filter(|ind| ind.kind() == IndKind::Maximal && ind.left().attributes().len() > 1)
        .cloned()
        .collect();

    let mut stats = SplitStats::default();
    for ind in &maximal {
        stats.expanded += 1;
        for index in 0..ind.arity() {
            let atomic = ind.atomic_at(index, IndKind::SplitFromMaximal)?;
            let id = atomic.id().to_string();
            if set.insert_if_absent(atomic) {
                stats.inserted += 1;
                tracing::debug!(event = "atomic_ind_inserted", id = %id, source = %ind.id());
            } else {
                stats.skipped_existing += 1;
                tracing::debug!(event = "atomic_ind_exists", id = %id, source = %ind.id());
            }
        }
    }

    tracing::info!(
        event = "maximal_split_finished",
        expanded = stats.expanded,
        inserted = stats.inserted,
        skipped_existing = stats.skipped_existing
    );

    Ok(stats)
}
