use indeval_core::IndSet;

use crate::engine::Evaluation;

/// Render the textual statistics report.
pub fn render_report(evaluation: &Evaluation) -> String {
    let mut lines = Vec::new();

    lines.push("## Found INDs Statistics ##".to_string());
    for id in &evaluation.false_negatives {
        lines.push(format!("False negative (IND not found): {id}"));
    }
    for id in &evaluation.false_positives {
        lines.push(format!("False positive (IND does not exist): {id}"));
    }
    lines.push(String::new());

    let counts = evaluation.counts();
    lines.push(format!("False negatives: {}", counts.false_negatives));
    lines.push(format!("False positives: {}", counts.false_positives));
    lines.push(format!("True positives: {}", counts.true_positives));
    lines.push(String::new());

    let metrics = &evaluation.metrics;
    lines.push(format!(
        "Precision: {}",
        format_score(metrics.precision, "no discovered INDs")
    ));
    lines.push(format!(
        "Recall: {}",
        format_score(metrics.recall, "reference list is empty")
    ));
    lines.push(format!(
        "F1 score: {}",
        format_score(metrics.f1, "precision or recall undefined")
    ));

    lines.join("\n")
}

/// Render the list of discovered ids, one per line.
pub fn render_found(found: &IndSet) -> String {
    let mut lines = vec!["## Found INDs ##".to_string()];
    lines.extend(found.ids().map(str::to_string));
    lines.join("\n")
}

fn format_score(score: Option<f64>, reason: &str) -> String {
    match score {
        Some(value) => format!("{value:.2}"),
        None => format!("undefined ({reason})"),
    }
}
