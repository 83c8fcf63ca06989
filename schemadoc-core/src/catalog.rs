//! Catalog traversal: builds the document tree from three levels of
//! catalog queries.
//!
//! The reader issues one query per traversal level (schema list, table
//! list per schema, column list per table) through the [`CatalogQuery`]
//! collaborator and assembles the results into the [`Database`] tree.
//! Exclusion filters are part of the queries themselves, so filtered
//! names never enter the tree.

use async_trait::async_trait;

use crate::Result;
use crate::config::FilterConfig;
use crate::error::{CatalogStage, SchemaDocError};
use crate::models::{Column, Database, Schema, Table, normalize_description};

/// Boxed error type returned by catalog sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A source of catalog rows.
///
/// Implementations execute `sql` with the given positional parameters and
/// return every result row as a fixed-arity sequence of strings, fully
/// consumed before returning. The reader issues exactly three query shapes
/// through this trait: [`SCHEMA_QUERY`], [`TABLE_QUERY`], and
/// [`COLUMN_QUERY`].
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Runs one catalog query to completion and returns all rows.
    async fn query(
        &self,
        sql: &str,
        params: &[&str],
    ) -> std::result::Result<Vec<Vec<String>>, BoxError>;
}

/// Distinct schema names, ascending. Parameters: table exclusion pattern,
/// schema exclusion pattern. A schema whose tables are all excluded does
/// not appear.
pub const SCHEMA_QUERY: &str = r"
    SELECT DISTINCT isc.table_schema
    FROM information_schema.columns isc
    WHERE isc.table_name !~* $1
      AND isc.table_schema !~* $2
    ORDER BY isc.table_schema
";

/// Distinct table names with their object-level comment, empty when the
/// catalog has none. Parameters: table exclusion pattern, schema name.
pub const TABLE_QUERY: &str = r"
    SELECT DISTINCT
        isc.table_name,
        COALESCE(obj_description(format('%s.%s', isc.table_schema, isc.table_name)::regclass::oid, 'pg_class'), '') AS table_description
    FROM information_schema.columns isc
    WHERE isc.table_name !~* $1
      AND isc.table_schema = $2
";

/// Column metadata in ordinal order. Absent lengths, defaults, and
/// comments collapse to empty strings so every selected value is text.
/// Parameters: schema name, table name.
pub const COLUMN_QUERY: &str = r"
    SELECT
        c.column_name,
        c.data_type,
        COALESCE(c.character_maximum_length::text, ''),
        COALESCE(c.column_default, ''),
        c.is_nullable,
        COALESCE(pg_catalog.col_description(format('%s.%s', c.table_schema, c.table_name)::regclass::oid, c.ordinal_position), '') AS column_description,
        c.ordinal_position::text
    FROM information_schema.columns c
    WHERE c.table_schema = $1
      AND c.table_name = $2
    ORDER BY c.ordinal_position
";

/// Builds the full document tree for `database_name`.
///
/// Traversal is level by level: all schema names first, then every table
/// of each schema, then every column of each table. Each query blocks
/// until its rows are consumed before the next one is issued. Table and
/// column descriptions are normalized before they are stored, so the
/// finished tree contains no raw newlines.
///
/// # Errors
///
/// Any query failure or malformed row aborts the whole build with a
/// [`SchemaDocError::CatalogRead`] tagged with the failing stage; a
/// partial tree is never returned.
pub async fn build_document(
    catalog: &dyn CatalogQuery,
    filters: &FilterConfig,
    database_name: &str,
) -> Result<Database> {
    tracing::debug!("enumerating schemas for database '{database_name}'");
    let schema_rows = catalog
        .query(SCHEMA_QUERY, &[&filters.skip_tables, &filters.skip_schema])
        .await
        .map_err(|e| {
            SchemaDocError::catalog_read(CatalogStage::Schemas, "cannot get schema list", e)
        })?;

    let mut schema_names = Vec::with_capacity(schema_rows.len());
    for row in schema_rows {
        let [name]: [String; 1] = take_fields(row, CatalogStage::Schemas)?;
        schema_names.push(name);
    }
    tracing::info!("found {} schemas", schema_names.len());

    let mut schemas = Vec::with_capacity(schema_names.len());
    for schema_name in schema_names {
        let table_rows = catalog
            .query(TABLE_QUERY, &[&filters.skip_tables, &schema_name])
            .await
            .map_err(|e| {
                SchemaDocError::catalog_read(
                    CatalogStage::Tables,
                    format!("cannot get tables list for schema '{schema_name}'"),
                    e,
                )
            })?;

        let mut headers = Vec::with_capacity(table_rows.len());
        for row in table_rows {
            let [table_name, table_description]: [String; 2] =
                take_fields(row, CatalogStage::Tables)?;
            headers.push((table_name, table_description));
        }

        let mut tables = Vec::with_capacity(headers.len());
        for (table_name, table_description) in headers {
            let columns = collect_columns(catalog, &schema_name, &table_name).await?;
            tracing::debug!(
                "collected table '{schema_name}.{table_name}' with {} columns",
                columns.len()
            );
            tables.push(Table {
                name: table_name,
                description: normalize_description(&table_description),
                columns,
            });
        }

        schemas.push(Schema {
            name: schema_name,
            tables,
        });
    }

    Ok(Database {
        name: database_name.to_string(),
        schemas,
    })
}

async fn collect_columns(
    catalog: &dyn CatalogQuery,
    schema_name: &str,
    table_name: &str,
) -> Result<Vec<Column>> {
    let column_rows = catalog
        .query(COLUMN_QUERY, &[schema_name, table_name])
        .await
        .map_err(|e| {
            SchemaDocError::catalog_read(
                CatalogStage::Columns,
                format!("cannot get columns list for table '{schema_name}.{table_name}'"),
                e,
            )
        })?;

    let mut columns = Vec::with_capacity(column_rows.len());
    for row in column_rows {
        let [name, data_type, character_max_length, column_default, is_nullable, description, ordinal]: [String; 7] =
            take_fields(row, CatalogStage::Columns)?;
        let ordinal: u32 = ordinal.parse().map_err(|_| {
            SchemaDocError::catalog_row(
                CatalogStage::Columns,
                format!("invalid ordinal position '{ordinal}' for column '{name}'"),
            )
        })?;
        columns.push((
            ordinal,
            Column {
                name,
                data_type,
                character_max_length,
                column_default,
                is_nullable,
                description: normalize_description(&description),
            },
        ));
    }

    // The query already orders by ordinal position; sorting again keeps the
    // invariant independent of the catalog's return order.
    columns.sort_by_key(|(ordinal, _)| *ordinal);
    Ok(columns.into_iter().map(|(_, column)| column).collect())
}

fn take_fields<const N: usize>(row: Vec<String>, stage: CatalogStage) -> Result<[String; N]> {
    let arity = row.len();
    <[String; N]>::try_from(row).map_err(|_| {
        SchemaDocError::catalog_row(stage, format!("expected {N} fields per row, got {arity}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_fields_checks_arity() {
        let row = vec!["users".to_string(), "accounts".to_string()];
        let [name, description]: [String; 2] = take_fields(row, CatalogStage::Tables).unwrap();
        assert_eq!(name, "users");
        assert_eq!(description, "accounts");

        let short = vec!["users".to_string()];
        let result: Result<[String; 2]> = take_fields(short, CatalogStage::Tables);
        let error = result.unwrap_err();
        assert!(error.to_string().contains("expected 2 fields per row, got 1"));
    }
}
