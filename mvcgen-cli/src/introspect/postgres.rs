//! PostgreSQL schema introspection over information_schema.
//!
//! Primary-key membership is not exposed on information_schema.columns, so
//! it is resolved from table_constraints in a second query per table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres, Row};

use super::{db_err, SchemaIntrospector};
use mvcgen_schema::{ConnectionSpec, RawColumn, Result, ScaffoldError};

pub struct PostgresIntrospector {
    pool: Pool<Postgres>,
}

impl PostgresIntrospector {
    pub async fn connect(spec: &ConnectionSpec) -> Result<Self> {
        let options = spec
            .url
            .parse::<PgConnectOptions>()
            .map_err(|e| ScaffoldError::Connection(e.to_string()))?
            .username(&spec.username)
            .password(&spec.password)
            .database(&spec.database);
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(db_err)?;
        Ok(Self { pool })
    }

    async fn primary_key_columns(&self, table_name: &str) -> Result<HashSet<String>> {
        let rows = sqlx::query(
            r#"
            SELECT kcu.column_name
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
                ON tc.constraint_name = kcu.constraint_name
                AND tc.table_schema = kcu.table_schema
            WHERE tc.table_name = $1
                AND tc.table_schema = 'public'
                AND tc.constraint_type = 'PRIMARY KEY'
            "#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut keys = HashSet::new();
        for row in rows {
            keys.insert(row.try_get::<String, _>("column_name").map_err(db_err)?);
        }
        Ok(keys)
    }
}

#[async_trait]
impl SchemaIntrospector for PostgresIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT table_name
            FROM information_schema.tables
            WHERE table_schema = 'public' AND table_type = 'BASE TABLE'
            ORDER BY table_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("table_name").map_err(db_err))
            .collect()
    }

    async fn table_columns(&self, table_name: &str) -> Result<Vec<RawColumn>> {
        let primary_keys = self.primary_key_columns(table_name).await?;

        let rows = sqlx::query(
            r#"
            SELECT
                c.column_name,
                c.data_type,
                c.is_nullable,
                col_description(pgc.oid, c.ordinal_position) AS column_comment
            FROM information_schema.columns c
            LEFT JOIN pg_class pgc ON pgc.relname = c.table_name
            WHERE c.table_name = $1 AND c.table_schema = 'public'
            ORDER BY c.ordinal_position
            "#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("column_name").map_err(db_err)?;
            let is_nullable: String = row.try_get("is_nullable").map_err(db_err)?;
            let comment: Option<String> = row.try_get("column_comment").ok().flatten();
            columns.push(RawColumn {
                primary_key: primary_keys.contains(&name),
                name,
                native_type: row.try_get("data_type").map_err(db_err)?,
                nullable: is_nullable == "YES",
                comment: comment.filter(|c| !c.is_empty()),
            });
        }
        Ok(columns)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
