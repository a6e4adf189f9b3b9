use indeval_core::SplitStats;
use indeval_schema::SchemaSummary;
use serde::Serialize;

use crate::engine::Evaluation;
use crate::errors::EvalError;

/// Metrics contract version for `--metrics-out` documents.
pub const METRICS_VERSION: &str = "0.1";

/// Precision, recall and F1. `None` marks a zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
}

impl Metrics {
    pub fn from_counts(
        true_positives: usize,
        false_positives: usize,
        false_negatives: usize,
    ) -> Self {
        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);
        let f1 = match (precision, recall) {
            (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        };
        Self {
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Classification counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

/// Machine-readable evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsDocument {
    pub metrics_version: String,
    pub counts: Counts,
    pub metrics: Metrics,
    pub true_positives: Vec<String>,
    pub false_negatives: Vec<String>,
    pub false_positives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitStats>,
}

impl MetricsDocument {
    pub fn new(
        evaluation: &Evaluation,
        schema: Option<SchemaSummary>,
        split: Option<SplitStats>,
    ) -> Self {
        Self {
            metrics_version: METRICS_VERSION.to_string(),
            counts: evaluation.counts(),
            metrics: evaluation.metrics,
            true_positives: evaluation.true_positives.clone(),
            false_negatives: evaluation.false_negatives.clone(),
            false_positives: evaluation.false_positives.clone(),
            schema,
            split,
        }
    }

    /// Pretty JSON encoding of the document.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, EvalError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.is_some_and(|value| (value - expected).abs() < 1e-9)
    }

    #[test]
    fn computes_standard_scores() {
        let metrics = Metrics::from_counts(2, 1, 1);
        assert!(approx(metrics.precision, 2.0 / 3.0));
        assert!(approx(metrics.recall, 2.0 / 3.0));
        assert!(approx(metrics.f1, 2.0 / 3.0));

        let metrics = Metrics::from_counts(3, 1, 0);
        assert!(approx(metrics.precision, 0.75));
        assert!(approx(metrics.recall, 1.0));
        assert!(approx(metrics.f1, 6.0 / 7.0));
    }

    #[test]
    fn zero_denominators_are_undefined() {
        let metrics = Metrics::from_counts(0, 0, 3);
        assert_eq!(metrics.precision, None);
        assert!(approx(metrics.recall, 0.0));
        assert_eq!(metrics.f1, None);

        let metrics = Metrics::from_counts(0, 2, 0);
        assert!(approx(metrics.precision, 0.0));
        assert_eq!(metrics.recall, None);
        assert_eq!(metrics.f1, None);

        let metrics = Metrics::from_counts(0, 0, 0);
        assert_eq!(metrics, Metrics { precision: None, recall: None, f1: None });
    }

    #[test]
    fn no_true_positives_gives_zero_f1() {
        let metrics = Metrics::from_counts(0, 2, 3);
        assert!(approx(metrics.precision, 0.0));
        assert!(approx(metrics.recall, 0.0));
        assert!(approx(metrics.f1, 0.0));
    }

    #[test]
    fn undefined_metrics_serialize_as_null() {
        let json = serde_json::to_value(Metrics::from_counts(0, 0, 1)).unwrap();
        assert!(json["precision"].is_null());
        assert_eq!(json["recall"], serde_json::json!(0.0));
    }
}
