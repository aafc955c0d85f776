//! mvcgen-schema - schema model and code generation primitives for mvcgen
//!
//! This crate holds everything the generator needs that is neither database
//! nor filesystem access: the in-memory schema model (Database, Table,
//! Column), derivation of target-language identifiers from raw database
//! names, the native-type to Java-type mapping, and the handlebars-backed
//! template renderer.
//!
//! # Example
//!
//! ```rust
//! use mvcgen_schema::{RawColumn, RawTable, Table};
//!
//! let raw = RawTable {
//!     name: "i_user".to_string(),
//!     columns: vec![RawColumn {
//!         name: "created_at".to_string(),
//!         native_type: "datetime".to_string(),
//!         nullable: true,
//!         primary_key: false,
//!         comment: None,
//!     }],
//! };
//!
//! let table = Table::from_raw(&raw, "i_", true, "com.example.app").unwrap();
//! assert_eq!(table.class_name, "User");
//! assert_eq!(table.columns[0].field_name, "createdAt");
//! assert_eq!(table.columns[0].java_type, "LocalDateTime");
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod naming;
pub mod render;
pub mod typemap;
pub mod types;

pub use render::TemplateRenderer;
pub use types::*;

/// Generator errors
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("invalid identifier derived from '{raw}': {reason}")]
    InvalidIdentifier { raw: String, reason: String },

    #[error("unsupported column type '{native_type}' on {table}.{column}")]
    UnsupportedColumnType {
        table: String,
        column: String,
        native_type: String,
    },

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template syntax error: {0}")]
    TemplateSyntax(#[from] handlebars::TemplateError),

    // Strict mode turns a placeholder missing from the context into a
    // render error, so missing-placeholder failures surface here.
    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy static asset {path}: {source}")]
    AssetCopy {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
