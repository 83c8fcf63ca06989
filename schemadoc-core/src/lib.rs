//! Core building blocks for schemadoc.
//!
//! This crate provides the pieces the schemadoc binary wires together:
//! the catalog reader that walks a relational catalog level by level
//! (schemas, then tables, then columns), the in-memory document tree it
//! builds, and the deterministic markdown renderer that serializes the
//! tree.
//!
//! # Architecture
//! - The catalog is accessed through the [`catalog::CatalogQuery`] trait,
//!   so the reader is independent of any particular driver.
//! - The document tree is pure data, built once and then only read.
//! - Rendering writes to any [`std::io::Write`] sink and produces
//!   identical bytes for identical trees.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
#[cfg(feature = "postgresql")]
pub mod postgres;
pub mod render;

// Re-export commonly used types
pub use catalog::{CatalogQuery, build_document};
pub use config::{FilterConfig, load_config};
pub use error::{CatalogStage, Result, SchemaDocError};
pub use logging::init_logging;
pub use models::{Column, Database, Schema, Table};
pub use render::render;
