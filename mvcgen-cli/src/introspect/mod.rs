//! Database schema introspection.
//!
//! One introspector per backend, selected by driver; both read only
//! `information_schema` metadata with columns in ordinal order. The shared
//! driver logic applies the table filter and annotates each kept table;
//! a table whose identifiers or types cannot be mapped is skipped with a
//! warning instead of failing the run.

mod mysql;
mod postgres;

use async_trait::async_trait;

use mvcgen_schema::{
    ConnectionSpec, Database, Driver, ProjectMeta, RawColumn, RawTable, Result, ScaffoldError,
    Table,
};

/// Backend-specific metadata access.
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// All base tables in the target database, in name order.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Columns of one table, in ordinal order.
    async fn table_columns(&self, table_name: &str) -> Result<Vec<RawColumn>>;

    /// Release the connection. Called on both success and failure paths.
    async fn close(&self);
}

/// A table excluded from generation by a per-table mapping failure.
#[derive(Debug)]
pub struct SkippedTable {
    pub table: String,
    pub reason: String,
}

/// Introspection output: the annotated database plus the skip list.
#[derive(Debug)]
pub struct Introspection {
    pub database: Database,
    pub skipped: Vec<SkippedTable>,
}

async fn connect(spec: &ConnectionSpec) -> Result<Box<dyn SchemaIntrospector>> {
    match spec.driver {
        Driver::MySql => Ok(Box::new(mysql::MySqlIntrospector::connect(spec).await?)),
        Driver::Postgres => Ok(Box::new(
            postgres::PostgresIntrospector::connect(spec).await?,
        )),
    }
}

/// Connect, read the schema and annotate it. The connection is closed
/// before returning, whatever the outcome.
pub async fn introspect(spec: &ConnectionSpec, meta: &ProjectMeta) -> Result<Introspection> {
    let introspector = connect(spec).await?;
    let result = run(introspector.as_ref(), spec, meta).await;
    introspector.close().await;
    result
}

async fn run(
    introspector: &dyn SchemaIntrospector,
    spec: &ConnectionSpec,
    meta: &ProjectMeta,
) -> Result<Introspection> {
    let mut tables = Vec::new();
    let mut skipped = Vec::new();

    for name in introspector.list_tables().await? {
        if !spec.table_filter.matches(&name) {
            continue;
        }
        let columns = introspector.table_columns(&name).await?;
        let raw = RawTable {
            name: name.clone(),
            columns,
        };
        match Table::from_raw(&raw, &spec.strip_prefix, meta.hump_case, &meta.package_name) {
            Ok(table) => tables.push(table),
            Err(err) => {
                log::warn!("skipping table {}: {}", name, err);
                skipped.push(SkippedTable {
                    table: name,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(Introspection {
        database: Database {
            name: spec.database.clone(),
            tables,
        },
        skipped,
    })
}

/// Map a sqlx failure into the generator's error taxonomy.
pub(crate) fn db_err(err: sqlx::Error) -> ScaffoldError {
    ScaffoldError::Connection(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvcgen_schema::TableFilter;
    use std::path::PathBuf;

    struct FakeIntrospector {
        tables: Vec<RawTable>,
    }

    #[async_trait]
    impl SchemaIntrospector for FakeIntrospector {
        async fn list_tables(&self) -> Result<Vec<String>> {
            Ok(self.tables.iter().map(|t| t.name.clone()).collect())
        }

        async fn table_columns(&self, table_name: &str) -> Result<Vec<RawColumn>> {
            Ok(self
                .tables
                .iter()
                .find(|t| t.name == table_name)
                .map(|t| t.columns.clone())
                .unwrap_or_default())
        }

        async fn close(&self) {}
    }

    fn raw_column(name: &str, native: &str) -> RawColumn {
        RawColumn {
            name: name.to_string(),
            native_type: native.to_string(),
            nullable: false,
            primary_key: false,
            comment: None,
        }
    }

    fn spec(filter: &str) -> ConnectionSpec {
        ConnectionSpec {
            driver: Driver::MySql,
            url: "mysql://localhost:3306".to_string(),
            username: "root".to_string(),
            password: "root".to_string(),
            database: "shop".to_string(),
            table_filter: TableFilter::parse(filter),
            strip_prefix: "i_".to_string(),
        }
    }

    fn meta() -> ProjectMeta {
        ProjectMeta {
            output_root: PathBuf::from("/tmp"),
            project_name: "shop".to_string(),
            package_name: "com.example.shop".to_string(),
            hump_case: true,
        }
    }

    fn fake() -> FakeIntrospector {
        FakeIntrospector {
            tables: vec![
                RawTable {
                    name: "i_user".to_string(),
                    columns: vec![raw_column("id", "int"), raw_column("name", "varchar")],
                },
                RawTable {
                    name: "i_order".to_string(),
                    columns: vec![raw_column("id", "int"), raw_column("user_id", "int")],
                },
                RawTable {
                    name: "i_geo".to_string(),
                    columns: vec![raw_column("id", "int"), raw_column("area", "geometry")],
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_wildcard_keeps_all_mappable_tables() {
        let introspection = run(&fake(), &spec("%"), &meta()).await.unwrap();
        let names: Vec<&str> = introspection
            .database
            .tables
            .iter()
            .map(|t| t.class_name.as_str())
            .collect();
        assert_eq!(names, vec!["User", "Order"]);
        assert_eq!(introspection.skipped.len(), 1);
        assert_eq!(introspection.skipped[0].table, "i_geo");
        assert!(introspection.skipped[0].reason.contains("geometry"));
    }

    #[tokio::test]
    async fn test_exact_filter_selects_one_table() {
        let introspection = run(&fake(), &spec("i_user"), &meta()).await.unwrap();
        assert_eq!(introspection.database.tables.len(), 1);
        assert_eq!(introspection.database.tables[0].table_name, "i_user");
        assert!(introspection.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_filter_with_no_match_selects_nothing() {
        let introspection = run(&fake(), &spec("missing"), &meta()).await.unwrap();
        assert!(introspection.database.tables.is_empty());
    }

    struct FailingIntrospector;

    #[async_trait]
    impl SchemaIntrospector for FailingIntrospector {
        async fn list_tables(&self) -> Result<Vec<String>> {
            Err(ScaffoldError::Connection("connection reset".to_string()))
        }

        async fn table_columns(&self, _table_name: &str) -> Result<Vec<RawColumn>> {
            unreachable!()
        }

        async fn close(&self) {}
    }

    #[tokio::test]
    async fn test_connection_failure_aborts_introspection() {
        let err = run(&FailingIntrospector, &spec("%"), &meta())
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Connection(_)));
    }
}
