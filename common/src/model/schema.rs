use serde::{Deserialize, Serialize};

/// One column of a table as reported by the backend.
///
/// `data_type` and `nullable` are passed through opaquely; the wizard never
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl ColumnDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            nullable: None,
        }
    }

    pub fn typed(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type.into()),
            nullable: None,
        }
    }
}

/// Columns of a single table, in the order the backend listed them.
pub type TableSchema = Vec<ColumnDescriptor>;
