//! PostgreSQL-backed template store and its startup DDL.

use crate::error::StoreError;
use crate::model::{CreateTemplate, Template, TemplateChanges, TemplateQuery};
use crate::store::TemplateStore;
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub const TEMPLATE_TABLE: &str = "templates";

const COLUMNS: &str = "id, name, content, created_at, updated_at";

#[derive(Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SELECT for one page. Sort column and direction come from enums, never from user text.
/// Params: `$1` search (only when present), then limit, then offset.
fn select_page_sql(query: &TemplateQuery) -> String {
    let mut sql = format!("SELECT {} FROM {}", COLUMNS, TEMPLATE_TABLE);
    let mut n = 1;
    if query.search.is_some() {
        sql.push_str(" WHERE strpos(name, $1) > 0");
        n += 1;
    }
    sql.push_str(&format!(
        " ORDER BY {} {}, id ASC LIMIT ${} OFFSET ${}",
        query.sort.column(),
        query.order.as_sql(),
        n,
        n + 1
    ));
    sql
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn insert(&self, new: &CreateTemplate) -> Result<Template, StoreError> {
        let sql = format!(
            "INSERT INTO {} (name, content) VALUES ($1, $2) RETURNING {}",
            TEMPLATE_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Template>(&sql)
            .bind(&new.name)
            .bind(&new.content)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, TEMPLATE_TABLE);
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Template>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(&self, query: &TemplateQuery) -> Result<Vec<Template>, StoreError> {
        let sql = select_page_sql(query);
        tracing::debug!(sql = %sql, search = ?query.search, "query");
        let mut q = sqlx::query_as::<_, Template>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(search);
        }
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        let rows = q
            .bind(i64::from(query.limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: &str, changes: &TemplateChanges) -> Result<Option<Template>, StoreError> {
        let sql = format!(
            "UPDATE {} SET name = COALESCE($2, name), content = COALESCE($3, content), updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            TEMPLATE_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Template>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.content.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", TEMPLATE_TABLE, COLUMNS);
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Template>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the templates table and its sort index if they do not exist.
pub async fn ensure_template_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            name TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        TEMPLATE_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    let index = format!(
        "CREATE INDEX IF NOT EXISTS {0}_created_at_idx ON {0} (created_at)",
        TEMPLATE_TABLE
    );
    sqlx::query(&index).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = admin_options(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn: sqlx::PgConnection = admin.connect().await?;
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

/// Options for the maintenance database with host, credentials and TLS taken from `url`,
/// plus the database name `url` points at (empty when it names none).
fn admin_options(url: &str) -> Result<(PgConnectOptions, String), StoreError> {
    let target = PgConnectOptions::from_str(url)
        .map_err(|e| StoreError::Unavailable(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = target.get_database().unwrap_or("").trim().to_string();
    Ok((target.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SortField, SortOrder};

    fn query(search: Option<&str>, sort: SortField, order: SortOrder) -> TemplateQuery {
        TemplateQuery {
            offset: 5,
            limit: 5,
            search: search.map(String::from),
            sort,
            order,
        }
    }

    #[test]
    fn page_sql_without_search() {
        let sql = select_page_sql(&query(None, SortField::CreatedAt, SortOrder::Asc));
        assert_eq!(
            sql,
            "SELECT id, name, content, created_at, updated_at FROM templates \
             ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn page_sql_with_search_shifts_params() {
        let sql = select_page_sql(&query(Some("inv"), SortField::Name, SortOrder::Desc));
        assert!(sql.contains("WHERE strpos(name, $1) > 0"));
        assert!(sql.ends_with("ORDER BY name DESC, id ASC LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn admin_options_target_postgres_database() {
        let (admin, db) = admin_options("postgres://u:p@localhost:5432/templates?sslmode=disable").unwrap();
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
        assert_eq!(admin.get_username(), "u");
        assert_eq!(db, "templates");
    }

    #[test]
    fn slash_in_query_does_not_change_database_name() {
        let (admin, db) =
            admin_options("postgres://u:p@db.internal:5432/templates?sslrootcert=/etc/ssl/ca.pem").unwrap();
        assert_eq!(db, "templates");
        assert_eq!(admin.get_host(), "db.internal");
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn query_credentials_carry_over_to_admin_connection() {
        let (admin, db) = admin_options("postgres://localhost:5432/templates?user=app&password=pw").unwrap();
        assert_eq!(db, "templates");
        assert_eq!(admin.get_username(), "app");
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn malformed_url_is_reported() {
        assert!(matches!(admin_options("not a url"), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
