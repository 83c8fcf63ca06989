//! Markdown documentation generator for a PostgreSQL database catalog.
//!
//! This binary connects to the configured database, walks the
//! schema → table → column catalog hierarchy, and writes a hierarchical
//! markdown document describing it. One shot: connect, enumerate,
//! render, exit.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use schemadoc_core::postgres::{ConnectionConfig, PgCatalog, connect};
use schemadoc_core::{Result, SchemaDocError, build_document, init_logging, load_config, render};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "schemadoc")]
#[command(about = "Generates markdown documentation from a PostgreSQL catalog")]
#[command(version)]
pub struct Cli {
    /// Database host
    #[arg(long)]
    pub host: String,

    /// Database port
    #[arg(long)]
    pub port: u16,

    /// Database name
    #[arg(long)]
    pub database: String,

    /// Database user
    #[arg(long)]
    pub user: String,

    /// Database password
    #[arg(long)]
    pub password: String,

    /// File to output markdown
    #[arg(long, default_value = "out.md")]
    pub out_file: PathBuf,

    /// Filter configuration file with skip_tables/skip_schema patterns
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Invoked bare: show usage and exit cleanly.
    if std::env::args().len() <= 1 {
        Cli::command()
            .print_help()
            .map_err(|e| SchemaDocError::io_failed("cannot print usage", e))?;
        return Ok(());
    }

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let filters = load_config(&cli.config).map_err(|e| {
        error!("cannot load filter config: {e}");
        e
    })?;

    // Created up front; a failed run may leave it empty or partial.
    let out = File::create(&cli.out_file).map_err(|e| {
        error!("cannot create output file {}: {e}", cli.out_file.display());
        SchemaDocError::io_failed(format!("cannot create {}", cli.out_file.display()), e)
    })?;

    let config = ConnectionConfig {
        host: cli.host,
        port: cli.port,
        database: cli.database,
        username: cli.user,
    };

    let pool = connect(&config, &cli.password).await.map_err(|e| {
        error!("cannot connect to the database: {e}");
        e
    })?;
    info!("connected to {config}");

    let catalog = PgCatalog::new(pool);
    let database = build_document(&catalog, &filters, &config.database)
        .await
        .map_err(|e| {
            error!("cannot build schema document: {e}");
            e
        })?;
    info!(
        "collected {} schemas, {} tables, {} columns",
        database.schemas.len(),
        database.table_count(),
        database.column_count()
    );

    let mut writer = BufWriter::new(out);
    render(&database, &mut writer).map_err(|e| {
        error!("cannot render markdown: {e}");
        e
    })?;
    writer.flush().map_err(|e| {
        error!("cannot flush output file: {e}");
        SchemaDocError::render_failed(format!("cannot flush {}", cli.out_file.display()), e)
    })?;

    info!("wrote {}", cli.out_file.display());
    Ok(())
}
