//! Error types for catalog reading and document rendering.
//!
//! Every error is terminal for a run: there is no retry and no partial
//! success path. Catalog failures carry the traversal stage at which the
//! read failed so log lines identify the failing level.

use thiserror::Error;

/// The catalog traversal level at which a read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStage {
    /// Enumerating distinct schema names.
    Schemas,
    /// Enumerating table names and comments within a schema.
    Tables,
    /// Enumerating column metadata within a table.
    Columns,
}

impl std::fmt::Display for CatalogStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogStage::Schemas => write!(f, "schema"),
            CatalogStage::Tables => write!(f, "table"),
            CatalogStage::Columns => write!(f, "column"),
        }
    }
}

/// Main error type for schemadoc operations.
#[derive(Debug, Error)]
pub enum SchemaDocError {
    /// Missing or unparseable configuration
    #[error("configuration error: {message}")]
    Configuration {
        /// What was wrong with the configuration.
        message: String,
    },

    /// Connection pool setup failed (credentials never included)
    #[error("database connection failed: {context}")]
    Connection {
        /// Sanitized description of the connection target.
        context: String,
        /// Underlying driver error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// One of the three catalog query stages failed
    #[error("catalog read failed at the {stage} stage: {context}")]
    CatalogRead {
        /// Traversal level that failed.
        stage: CatalogStage,
        /// Description of the failing operation.
        context: String,
        /// Underlying query error, absent for malformed rows.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Write failure during document serialization
    #[error("render failed: {context}")]
    Render {
        /// Description of the failing write.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O operation outside of rendering failed
    #[error("I/O operation failed: {context}")]
    Io {
        /// Description of the failing operation.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with SchemaDocError
pub type Result<T> = std::result::Result<T, SchemaDocError>;

impl SchemaDocError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a connection error with sanitized context
    pub fn connection_failed(
        context: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Connection {
            context: context.into(),
            source: error.into(),
        }
    }

    /// Creates a catalog read error tagged with the failing stage
    pub fn catalog_read(
        stage: CatalogStage,
        context: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::CatalogRead {
            stage,
            context: context.into(),
            source: Some(error.into()),
        }
    }

    /// Creates a catalog read error for a row the reader could not interpret
    pub fn catalog_row(stage: CatalogStage, context: impl Into<String>) -> Self {
        Self::CatalogRead {
            stage,
            context: context.into(),
            source: None,
        }
    }

    /// Creates a render error with context
    pub fn render_failed(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Render {
            context: context.into(),
            source,
        }
    }

    /// Creates an I/O error with context
    pub fn io_failed(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
