//! MySQL schema introspection over information_schema.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{MySql, Pool, Row};

use super::{db_err, SchemaIntrospector};
use mvcgen_schema::{ConnectionSpec, RawColumn, Result, ScaffoldError};

pub struct MySqlIntrospector {
    pool: Pool<MySql>,
    database: String,
}

impl MySqlIntrospector {
    pub async fn connect(spec: &ConnectionSpec) -> Result<Self> {
        let options = spec
            .url
            .parse::<MySqlConnectOptions>()
            .map_err(|e| ScaffoldError::Connection(e.to_string()))?
            .username(&spec.username)
            .password(&spec.password)
            .database(&spec.database);
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(db_err)?;
        Ok(Self {
            pool,
            database: spec.database.clone(),
        })
    }
}

#[async_trait]
impl SchemaIntrospector for MySqlIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT TABLE_NAME AS table_name
            FROM information_schema.tables
            WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
            "#,
        )
        .bind(&self.database)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("table_name").map_err(db_err))
            .collect()
    }

    async fn table_columns(&self, table_name: &str) -> Result<Vec<RawColumn>> {
        let rows = sqlx::query(
            r#"
            SELECT
                COLUMN_NAME AS column_name,
                CAST(DATA_TYPE AS CHAR) AS data_type,
                IS_NULLABLE AS is_nullable,
                CAST(COLUMN_KEY AS CHAR) AS column_key,
                CAST(COLUMN_COMMENT AS CHAR) AS column_comment
            FROM information_schema.columns
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
            "#,
        )
        .bind(&self.database)
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let is_nullable: String = row.try_get("is_nullable").map_err(db_err)?;
            let column_key: String = row.try_get("column_key").unwrap_or_default();
            let comment: Option<String> = row.try_get("column_comment").ok();
            columns.push(RawColumn {
                name: row.try_get("column_name").map_err(db_err)?,
                native_type: row.try_get("data_type").map_err(db_err)?,
                nullable: is_nullable == "YES",
                primary_key: column_key == "PRI",
                comment: comment.filter(|c| !c.is_empty()),
            });
        }
        Ok(columns)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
