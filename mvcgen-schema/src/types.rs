//! In-memory schema model and generation inputs.
//!
//! Everything here is constructed once and treated as immutable value data
//! for the rest of the run. `RawTable`/`RawColumn` hold what introspection
//! reads from the database; `Table::from_raw` annotates them with derived
//! identifiers and mapped types, and is the unit that fails when a table
//! cannot be generated.

use serde::Serialize;
use std::path::PathBuf;

use crate::{naming, typemap, Result, ScaffoldError};

/// Project-level generation settings, created once from user input.
#[derive(Debug, Clone)]
pub struct ProjectMeta {
    pub output_root: PathBuf,
    pub project_name: String,
    pub package_name: String,
    /// Convert snake_case database names to camel-cased identifiers.
    pub hump_case: bool,
}

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    MySql,
    Postgres,
}

impl Driver {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Some(Driver::MySql),
            "postgres" | "postgresql" => Some(Driver::Postgres),
            _ => None,
        }
    }

    /// Detect the driver from a connection URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("mysql://") {
            Some(Driver::MySql)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Driver::Postgres)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::MySql => "mysql",
            Driver::Postgres => "postgres",
        }
    }

    /// JDBC driver class written into the generated configuration.
    pub fn jdbc_class(&self) -> &'static str {
        match self {
            Driver::MySql => "com.mysql.cj.jdbc.Driver",
            Driver::Postgres => "org.postgresql.Driver",
        }
    }
}

/// Table selection: `%` keeps every table, anything else is an exact match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFilter {
    All,
    Exact(String),
}

impl TableFilter {
    pub fn parse(s: &str) -> Self {
        if s == "%" {
            TableFilter::All
        } else {
            TableFilter::Exact(s.to_string())
        }
    }

    pub fn matches(&self, table_name: &str) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Exact(name) => name == table_name,
        }
    }
}

/// Connection parameters, owned by the pipeline and passed into the
/// introspector by value.
#[derive(Debug, Clone)]
pub struct ConnectionSpec {
    pub driver: Driver,
    pub url: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub table_filter: TableFilter,
    /// Table name prefix to strip, e.g. `i_` turns `i_user` into `user`.
    /// Empty means no stripping.
    pub strip_prefix: String,
}

/// A table as reported by the database, before annotation.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub columns: Vec<RawColumn>,
}

/// A column as reported by the database, in ordinal order.
#[derive(Debug, Clone)]
pub struct RawColumn {
    pub name: String,
    pub native_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
}

/// The introspected database handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Database {
    pub name: String,
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub table_name: String,
    pub class_name: String,
    pub package_name: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub column_name: String,
    pub field_name: String,
    pub native_type: String,
    pub java_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
}

impl Table {
    /// Annotate a raw table with derived identifiers and mapped types.
    ///
    /// Column order is preserved exactly as reported by the database; it is
    /// rendering-significant. Any identifier or type-mapping failure fails
    /// the whole table so the pipeline can skip it and continue.
    pub fn from_raw(
        raw: &RawTable,
        strip_prefix: &str,
        hump_case: bool,
        package_name: &str,
    ) -> Result<Table> {
        let class_name = naming::class_name(&raw.name, strip_prefix, hump_case)?;
        let columns = raw
            .columns
            .iter()
            .map(|c| Column::from_raw(&raw.name, c, hump_case))
            .collect::<Result<Vec<_>>>()?;
        Ok(Table {
            table_name: raw.name.clone(),
            class_name,
            package_name: package_name.to_string(),
            columns,
        })
    }
}

impl Column {
    fn from_raw(table_name: &str, raw: &RawColumn, hump_case: bool) -> Result<Column> {
        // The strip prefix is a table-name rule; column names keep theirs.
        let field_name = naming::field_name(&raw.name, "", hump_case)?;
        let java_type = typemap::java_type(&raw.native_type, raw.nullable).ok_or_else(|| {
            ScaffoldError::UnsupportedColumnType {
                table: table_name.to_string(),
                column: raw.name.clone(),
                native_type: raw.native_type.clone(),
            }
        })?;
        Ok(Column {
            column_name: raw.name.clone(),
            field_name,
            native_type: raw.native_type.clone(),
            java_type: java_type.to_string(),
            nullable: raw.nullable,
            primary_key: raw.primary_key,
            comment: raw.comment.clone(),
        })
    }
}
