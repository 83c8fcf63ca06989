//! In-memory document model for a relational catalog.
//!
//! A strict tree built once per run by the catalog reader and then only
//! read by the renderer: Database → Schemas → Tables → Columns. Absent
//! catalog metadata (comments, defaults, lengths) is stored as an empty
//! string, never as a null marker, so the renderer needs no null handling.

use serde::{Deserialize, Serialize};

/// Marker substituted for newline characters in descriptions so multi-line
/// catalog comments stay on one logical table row when rendered.
pub const LINE_BREAK: &str = "<br>";

/// Replaces every newline in `text` with [`LINE_BREAK`].
///
/// Idempotent: re-normalizing already-normalized text changes nothing.
pub fn normalize_description(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}

/// Root of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Display name of the documented database.
    pub name: String,
    /// Schemas in ascending name order, as the catalog query returns them.
    pub schemas: Vec<Schema>,
}

/// A namespace within the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name, unique within the database.
    pub name: String,
    /// Tables in catalog return order.
    pub tables: Vec<Table>,
}

/// A table with its object-level comment and columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, unique within its schema.
    pub name: String,
    /// Object-level comment, normalized; empty when the catalog has none.
    pub description: String,
    /// Columns in ascending ordinal position.
    pub columns: Vec<Column>,
}

/// Column metadata as the catalog reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Catalog data type name, e.g. `character varying`.
    pub data_type: String,
    /// Character maximum length; empty for non-character types.
    pub character_max_length: String,
    /// Default expression; empty when none.
    pub column_default: String,
    /// The catalog's literal nullability flag, `YES` or `NO`, verbatim.
    pub is_nullable: String,
    /// Column-level comment, normalized; empty when the catalog has none.
    pub description: String,
}

impl Database {
    /// Total number of tables across all schemas.
    pub fn table_count(&self) -> usize {
        self.schemas.iter().map(|schema| schema.tables.len()).sum()
    }

    /// Total number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.schemas
            .iter()
            .flat_map(|schema| &schema.tables)
            .map(|table| table.columns.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_every_newline() {
        assert_eq!(
            normalize_description("stores users\nand their groups\n"),
            "stores users<br>and their groups<br>"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_description("a\nb");
        let twice = normalize_description(&once);
        assert_eq!(once, "a<br>b");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_leaves_plain_text_unchanged() {
        assert_eq!(normalize_description(""), "");
        assert_eq!(normalize_description("single line"), "single line");
    }

    #[test]
    fn test_counts_walk_the_whole_tree() {
        let database = Database {
            name: "app".to_string(),
            schemas: vec![
                Schema {
                    name: "public".to_string(),
                    tables: vec![Table {
                        name: "users".to_string(),
                        description: String::new(),
                        columns: vec![
                            Column {
                                name: "id".to_string(),
                                data_type: "integer".to_string(),
                                character_max_length: String::new(),
                                column_default: String::new(),
                                is_nullable: "NO".to_string(),
                                description: String::new(),
                            },
                            Column {
                                name: "email".to_string(),
                                data_type: "text".to_string(),
                                character_max_length: String::new(),
                                column_default: String::new(),
                                is_nullable: "YES".to_string(),
                                description: String::new(),
                            },
                        ],
                    }],
                },
                Schema {
                    name: "archive".to_string(),
                    tables: Vec::new(),
                },
            ],
        };

        assert_eq!(database.table_count(), 1);
        assert_eq!(database.column_count(), 2);
    }
}
