//! PostgreSQL backend. Ids come from `gen_random_uuid()` (PostgreSQL 13+).

use super::TutorialStore;
use crate::config::ServiceConfig;
use crate::error::StoreError;
use crate::model::{NewTutorial, TutorialDocument, TutorialFilter, TutorialPatch};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

const TABLE: &str = "tutorials";
const COLUMNS: &str = "id, title, description, published, created_at, updated_at, version";

#[derive(Clone)]
pub struct PgTutorialStore {
    pool: PgPool,
    table: String,
}

impl PgTutorialStore {
    /// Wraps an existing pool. The table must already exist (see [`ensure_tutorials_table`]).
    pub fn new(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            table: qualified_table(schema),
        }
    }

    /// Creates the database if missing, opens the pool and ensures the table exists.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, StoreError> {
        ensure_database_exists(&config.database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        ensure_tutorials_table(&pool, &config.schema).await?;
        Ok(Self::new(pool, &config.schema))
    }
}

#[async_trait]
impl TutorialStore for PgTutorialStore {
    async fn insert(&self, tutorial: NewTutorial) -> Result<TutorialDocument, StoreError> {
        let sql = format!(
            "INSERT INTO {} (title, description, published) VALUES ($1, $2, $3) RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let doc = sqlx::query_as::<_, TutorialDocument>(&sql)
            .bind(&tutorial.title)
            .bind(&tutorial.description)
            .bind(tutorial.published)
            .fetch_one(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn find(&self, filter: &TutorialFilter) -> Result<Vec<TutorialDocument>, StoreError> {
        // strpos keeps the title match literal; LIKE would treat % and _ as wildcards.
        let sql = format!(
            r#"
            SELECT {} FROM {}
            WHERE ($1::text IS NULL OR strpos(lower(title), lower($1::text)) > 0)
              AND ($2::boolean IS NULL OR published = $2::boolean)
            ORDER BY created_at, id
            "#,
            COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, filter = ?filter, "query");
        let docs = sqlx::query_as::<_, TutorialDocument>(&sql)
            .bind(&filter.title_contains)
            .bind(filter.published)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TutorialDocument>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, %id, "query");
        let doc = sqlx::query_as::<_, TutorialDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn update_by_id(&self, id: Uuid, patch: &TutorialPatch) -> Result<Option<TutorialDocument>, StoreError> {
        let sql = format!(
            r#"
            UPDATE {} SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                published = COALESCE($4, published),
                updated_at = NOW(),
                version = version + 1
            WHERE id = $1
            RETURNING {}
            "#,
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        let doc = sqlx::query_as::<_, TutorialDocument>(&sql)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(patch.published)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<TutorialDocument>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", self.table, COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let doc = sqlx::query_as::<_, TutorialDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {}", self.table);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Schema-qualified table name (e.g. "public.tutorials").
fn qualified_table(schema: &str) -> String {
    format!("{}.{}", quote_ident(schema), TABLE)
}

/// Create the schema and `tutorials` table if they do not exist.
pub async fn ensure_tutorials_table(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;

    let table = qualified_table(schema);
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            description TEXT,
            published BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            version BIGINT NOT NULL DEFAULT 0
        )
        "#,
        table
    );
    sqlx::query(&ddl).execute(pool).await?;
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS tutorials_published_idx ON {} (published)",
        table
    ))
    .execute(pool)
    .await?;
    tracing::debug!(table = %table, "tutorials table ready");
    Ok(())
}

/// Connects to the `postgres` maintenance database and creates the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let Some(db_name) = target_database(&opts) else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = opts.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Database named by the connection options, unless it is absent or the maintenance database.
fn target_database(opts: &PgConnectOptions) -> Option<String> {
    opts.get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_string)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str) -> Option<String> {
        target_database(&PgConnectOptions::from_str(url).unwrap())
    }

    #[test]
    fn target_database_comes_from_the_url_path() {
        assert_eq!(
            target("postgres://u:p@localhost:5432/tutorials?sslmode=disable").as_deref(),
            Some("tutorials")
        );
        assert_eq!(target("postgres://u:p@localhost:5432/postgres"), None);
    }

    #[test]
    fn url_without_database_has_no_target() {
        assert_eq!(target("postgres://u:p@db.internal:5432"), None);
        assert_eq!(target("postgres://u:p@db.internal:5432/"), None);
    }

    #[test]
    fn table_name_is_schema_qualified_and_quoted() {
        assert_eq!(qualified_table("public"), "\"public\".tutorials");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
