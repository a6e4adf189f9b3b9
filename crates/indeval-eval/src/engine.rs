use indeval_core::IndSet;

use crate::metrics::{Counts, Metrics};
use crate::reference::ReferenceSet;

/// Outcome of comparing discovered ids with the reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Reference ids that were discovered, in reference order.
    pub true_positives: Vec<String>,
    /// Reference ids that were not discovered, in reference order.
    pub false_negatives: Vec<String>,
    /// Discovered ids missing from the reference list, in id order.
    pub false_positives: Vec<String>,
    pub metrics: Metrics,
}

impl Evaluation {
    pub fn counts(&self) -> Counts {
        Counts {
            true_positives: self.true_positives.len(),
            false_positives: self.false_positives.len(),
            false_negatives: self.false_negatives.len(),
        }
    }
}

/// Classify `discovered` against `reference` and compute the scores.
pub fn evaluate(discovered: &IndSet, reference: &ReferenceSet) -> Evaluation {
    let (true_positives, false_negatives): (Vec<String>, Vec<String>) = reference
        .iter()
        .map(str::to_string)
        .partition(|id| discovered.contains(id));

    let false_positives: Vec<String> = discovered
        .ids()
        .filter(|id| !reference.contains(id))
        .map(str::to_string)
        .collect();

    let metrics = Metrics::from_counts(
        true_positives.len(),
        false_positives.len(),
        false_negatives.len(),
    );

    if discovered.is_empty() {
        tracing::warn!(event = "no_discovered_inds");
    }
    if reference.is_empty() {
        tracing::warn!(event = "empty_reference");
    }
    tracing::info!(
        event = "evaluation_finished",
        true_positives = true_positives.len(),
        false_positives = false_positives.len(),
        false_negatives = false_negatives.len()
    );

    Evaluation {
        true_positives,
        false_negatives,
        false_positives,
        metrics,
    }
}
