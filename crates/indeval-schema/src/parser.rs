use std::io::Read;

use indeval_core::{EntityRef, Ind, IndSet, split_attributes};
use serde_json::{Map, Value};

use crate::errors::ShapeError;
use crate::model::{Category, IGNORED_KEYS, SchemaSummary};
use crate::shape::FieldNames;

const SCHEMA_ARRAY_KEY: &str = "json_schema";

/// Parse a schema document and insert every dependency into `set`.
pub fn parse_schema_document(
    bytes: &[u8],
    set: &mut IndSet,
) -> Result<SchemaSummary, ShapeError> {
    let document: Value = serde_json::from_slice(bytes)?;
    parse_schema_value(&document, set)
}

/// Same as [`parse_schema_document`], reading the document from `reader`.
pub fn parse_schema_reader<R: Read>(
    reader: R,
    set: &mut IndSet,
) -> Result<SchemaSummary, ShapeError> {
    let document: Value = serde_json::from_reader(reader)?;
    parse_schema_value(&document, set)
}

fn parse_schema_value(document: &Value, set: &mut IndSet) -> Result<SchemaSummary, ShapeError> {
    let schema = schema_object(document)?;
    let mut summary = SchemaSummary::default();

    for key in schema.keys() {
        let known = Category::ALL.iter().any(|category| category.key() == key)
            || IGNORED_KEYS.contains(&key.as_str());
        if !known {
            tracing::debug!(event = "schema_key_ignored", key = %key);
        }
    }

    summary.primary_keys = schema.get("primary_keys").and_then(array_len);
    summary.databases = schema.get("databases").and_then(array_len);

    // Records land in `parsed` first so a failing record leaves `set` untouched.
    let mut parsed = IndSet::new();

    for category in Category::ALL {
        let Some(value) = schema.get(category.key()) else {
            continue;
        };
        let records = value.as_array().ok_or(ShapeError::CategoryNotArray {
            category: category.key(),
        })?;

        for (index, record) in records.iter().enumerate() {
            let ind = parse_record(category, index, record)?;
            tracing::debug!(event = "ind_parsed", id = %ind.id(), kind = %ind.kind());
            parsed.insert(ind);
        }
        summary
            .records
            .insert(category.key().to_string(), records.len());
    }

    set.extend(parsed);
    summary.inds = set.len();
    tracing::info!(
        event = "schema_parsed",
        inds = summary.inds,
        implicit = summary.record_count(Category::ImplicitReferences),
        explicit = summary.record_count(Category::ExplicitReferences),
        maximal = summary.record_count(Category::MaximalInclusionDependencies)
    );

    Ok(summary)
}

fn schema_object(document: &Value) -> Result<&Map<String, Value>, ShapeError> {
    let root = document.as_object().ok_or(ShapeError::DocumentNotObject)?;
    let objects = root
        .get(SCHEMA_ARRAY_KEY)
        .and_then(Value::as_array)
        .ok_or(ShapeError::MissingSchemaArray)?;

    let schema = match objects.as_slice() {
        [] => return Err(ShapeError::MissingSchemaObject),
        [only] => only,
        many => return Err(ShapeError::UnexpectedSchemaObjects(many.len())),
    };

    let schema = schema
        .as_object()
        .ok_or(ShapeError::SchemaObjectNotObject)?;
    if schema.is_empty() {
        return Err(ShapeError::EmptySchemaObject);
    }
    Ok(schema)
}

fn array_len(value: &Value) -> Option<usize> {
    value.as_array().map(Vec::len)
}

fn parse_record(category: Category, index: usize, record: &Value) -> Result<Ind, ShapeError> {
    let record = record.as_object().ok_or(ShapeError::RecordNotObject {
        category: category.key(),
        index,
    })?;
    let fields: &FieldNames = category.shape().fields();
    let reader = RecordReader {
        category,
        index,
        record,
    };

    let left = reader.entity(
        fields.left_database,
        fields.left_entity_type,
        fields.left_attributes,
    )?;
    let right = reader.entity(
        fields.right_database,
        fields.right_entity_type,
        fields.right_attributes,
    )?;

    Ind::new(left, right, category.kind()).map_err(|source| reader.invalid(source))
}

struct RecordReader<'a> {
    category: Category,
    index: usize,
    record: &'a Map<String, Value>,
}

impl RecordReader<'_> {
    fn string(&self, field: &'static str) -> Result<&str, ShapeError> {
        let value = self.record.get(field).ok_or(ShapeError::MissingField {
            category: self.category.key(),
            index: self.index,
            field,
        })?;
        value.as_str().ok_or(ShapeError::FieldNotString {
            category: self.category.key(),
            index: self.index,
            field,
        })
    }

    fn entity(
        &self,
        database: &'static str,
        entity_type: &'static str,
        attributes: &'static str,
    ) -> Result<EntityRef, ShapeError> {
        let database = self.string(database)?;
        let entity_type = self.string(entity_type)?;
        let attributes =
            split_attributes(self.string(attributes)?).map_err(|source| self.invalid(source))?;
        EntityRef::new(database, entity_type, attributes).map_err(|source| self.invalid(source))
    }

    fn invalid(&self, source: indeval_core::Error) -> ShapeError {
        ShapeError::InvalidRecord {
            category: self.category.key(),
            index: self.index,
            source,
        }
    }
}
