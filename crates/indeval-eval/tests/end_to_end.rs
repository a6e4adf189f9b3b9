use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use indeval_core::{IndSet, split_maximal};
use indeval_eval::{MetricsDocument, ReferenceSet, evaluate, filter_scorable, render_report};
use indeval_schema::parse_schema_document;

fn manifest_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn scored_set(schema: &[u8]) -> Result<IndSet> {
    let mut set = IndSet::new();
    parse_schema_document(schema, &mut set)?;
    split_maximal(&mut set)?;
    Ok(filter_scorable(&set))
}

#[test]
fn single_explicit_reference_scores_perfectly() -> Result<()> {
    let schema = br#"{
        "json_schema": [{
            "explicite_refences": [{
                "foreignkey_database_type": "Postgres",
                "foreignkey_datastorage": "customers",
                "foreignkey_attributes": "id",
                "primarykey_database_type": "Postgres",
                "primarykey_datastorage": "orders",
                "primarykey_attributes": "customer_id"
            }]
        }]
    }"#;

    let mut reference_file = tempfile::NamedTempFile::new()?;
    writeln!(reference_file, "Postgres.customers.[id]->Postgres.orders.[customer_id]")?;

    let discovered = scored_set(schema)?;
    let reference = ReferenceSet::load(reference_file.path())?;
    let evaluation = evaluate(&discovered, &reference);

    let counts = evaluation.counts();
    assert_eq!(counts.true_positives, 1);
    assert_eq!(counts.false_negatives, 0);
    assert_eq!(counts.false_positives, 0);

    let report = render_report(&evaluation);
    assert!(report.contains("Precision: 1.00"));
    assert!(report.contains("Recall: 1.00"));
    assert!(report.contains("F1 score: 1.00"));
    Ok(())
}

#[test]
fn mixed_fixture_end_to_end() -> Result<()> {
    let schema = fs::read(manifest_path("../indeval-schema/tests/fixtures/mixed_schema.json"))?;
    let discovered = scored_set(&schema)?;

    // Surrogate-key and composite entries are not scored.
    assert!(!discovered.ids().any(|id| id.contains("elementID")));
    assert!(!discovered.ids().any(|id| id.contains(',')));
    assert_eq!(discovered.len(), 5);

    let reference = ReferenceSet::load(&manifest_path("tests/fixtures/mixed_reference.txt"))?;
    assert_eq!(reference.len(), 4);

    let evaluation = evaluate(&discovered, &reference);
    assert_eq!(
        evaluation.true_positives,
        vec![
            "Postgres.orders.[customer_id]->Postgres.customers.[id]",
            "Neo4j.Customer.[customer_id]->Postgres.customers.[id]",
            "Postgres.order_lines.[product_sku]->Postgres.products.[sku]",
        ]
    );
    assert_eq!(
        evaluation.false_negatives,
        vec!["Postgres.order_lines.[order_id]->Postgres.orders.[id]"]
    );
    assert_eq!(
        evaluation.false_positives,
        vec![
            "Postgres.order_lines.[order_id]->Postgres.products.[id]",
            "Postgres.orders.[note]->Postgres.products.[description]",
        ]
    );

    let report = render_report(&evaluation);
    assert!(report.contains("Precision: 0.60"));
    assert!(report.contains("Recall: 0.75"));
    assert!(report.contains("F1 score: 0.67"));

    let document = MetricsDocument::new(&evaluation, None, None);
    let json = serde_json::to_value(&document)?;
    assert_eq!(json["counts"]["true_positives"], 3);
    assert!(json.get("schema").is_none());
    Ok(())
}
