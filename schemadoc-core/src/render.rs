//! Deterministic markdown rendering of the document tree.
//!
//! One heading level per tree level: the database name as a level-1
//! heading followed by a horizontal rule, a level-2 heading per schema,
//! and a level-3 heading per table with its description and a fixed
//! six-column table listing the columns. Cell contents are written
//! verbatim, including the line-break markers inserted during
//! normalization, so the renderer never re-wraps text. Given the same
//! tree the output bytes are identical on every run.

use std::io::{self, Write};

use crate::Result;
use crate::error::SchemaDocError;
use crate::models::Database;

/// Header row of the per-table column listing.
pub const TABLE_HEADER: &str =
    "| Name | Data type | Character max length | Default value | Nullable | Description |";

/// Delimiter row matching [`TABLE_HEADER`], fixed so output stays
/// byte-identical across runs.
pub const TABLE_DELIMITER: &str =
    "|------|-----------|----------------------|----------------|----------|--------------|";

/// Serializes `database` into `sink` as structured markdown.
///
/// # Errors
///
/// A write failure against the sink aborts rendering with a
/// [`SchemaDocError::Render`]; output already written to the sink is the
/// caller's responsibility to clean up.
pub fn render<W: Write>(database: &Database, sink: &mut W) -> Result<()> {
    write_document(database, sink).map_err(|e| {
        SchemaDocError::render_failed(
            format!("cannot write document for database '{}'", database.name),
            e,
        )
    })
}

fn write_document<W: Write>(database: &Database, out: &mut W) -> io::Result<()> {
    writeln!(out, "# {}", database.name)?;
    writeln!(out, "---")?;

    for schema in &database.schemas {
        writeln!(out)?;
        writeln!(out, "## {}", schema.name)?;

        for table in &schema.tables {
            writeln!(out)?;
            writeln!(out, "### {}", table.name)?;
            writeln!(out, "{}", table.description)?;
            writeln!(out)?;
            writeln!(out, "{TABLE_HEADER}")?;
            writeln!(out, "{TABLE_DELIMITER}")?;
            for column in &table.columns {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    column.name,
                    column.data_type,
                    column.character_max_length,
                    column.column_default,
                    column.is_nullable,
                    column.description,
                )?;
            }
        }
    }

    Ok(())
}
