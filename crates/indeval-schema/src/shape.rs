/// JSON field names for each role of a dependency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub left_database: &'static str,
    pub left_entity_type: &'static str,
    pub left_attributes: &'static str,
    pub right_database: &'static str,
    pub right_entity_type: &'static str,
    pub right_attributes: &'static str,
}

/// Field names used by implicit and explicit reference records.
pub const REFERENCE_FIELDS: FieldNames = FieldNames {
    left_database: "foreignkey_database_type",
    left_entity_type: "foreignkey_datastorage",
    left_attributes: "foreignkey_attributes",
    right_database: "primarykey_database_type",
    right_entity_type: "primarykey_datastorage",
    right_attributes: "primarykey_attributes",
};

/// Field names used by maximal inclusion dependency records.
pub const MAXIMAL_FIELDS: FieldNames = FieldNames {
    left_database: "child_server_type",
    left_entity_type: "child_datastorage_name",
    left_attributes: "child_attribute_names",
    right_database: "parent_server_type",
    right_entity_type: "parent_datastorage_name",
    right_attributes: "parent_attribute_names",
};

/// Record layout of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Foreign-key / primary-key naming.
    Reference,
    /// Child / parent naming.
    Maximal,
}

impl RecordShape {
    pub fn fields(self) -> &'static FieldNames {
        match self {
            Self::Reference => &REFERENCE_FIELDS,
            Self::Maximal => &MAXIMAL_FIELDS,
        }
    }
}
