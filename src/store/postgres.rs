//! PostgreSQL stores. Tables live in a configurable schema (`REGISTRY_SCHEMA`, default `registry`).

use super::{CourseStore, EnrollmentStore};
use crate::error::{AppError, ConfigError, StorageError};
use crate::model::{Course, EnrollmentRecord, NewCourse, NewEnrollment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const COURSES_TABLE: &str = "courses";
const ENROLLMENTS_TABLE: &str = "enrollments";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified table name (e.g. `"registry"."enrollments"`).
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Create the schema and both tables if they do not exist. Safe to call on every startup.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), StorageError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let courses_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified_table(schema, COURSES_TABLE)
    );
    sqlx::query(&courses_ddl).execute(pool).await?;

    // No foreign key to courses and no uniqueness on (email_id, course_name).
    let enrollments_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email_id TEXT NOT NULL,
            course_name TEXT NOT NULL,
            enrolled_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified_table(schema, ENROLLMENTS_TABLE)
    );
    sqlx::query(&enrollments_ddl).execute(pool).await?;

    Ok(())
}

/// Insert catalog rows, skipping names already present. Returns the number of rows inserted.
pub async fn seed_courses(
    pool: &PgPool,
    schema: &str,
    courses: &[NewCourse],
) -> Result<u64, StorageError> {
    let sql = format!(
        "INSERT INTO {} (name, description) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
        qualified_table(schema, COURSES_TABLE)
    );
    let mut inserted = 0u64;
    let mut tx = pool.begin().await?;
    for c in courses {
        let res = sqlx::query(&sql)
            .bind(&c.name)
            .bind(c.description.as_deref())
            .execute(&mut *tx)
            .await?;
        inserted += res.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts =
        sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: e.to_string(),
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(StorageError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(StorageError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(StorageError::Db)?;
    }
    Ok(())
}

/// Split `DATABASE_URL` into an admin URL (same server, `postgres` database) and the target
/// database name. The name is empty when the URL has no path.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let authority_start = url.find("://").ok_or_else(|| ConfigError::Invalid {
        key: "DATABASE_URL",
        reason: "expected scheme://host[/database]".into(),
    })? + 3;
    let rest = url.get(authority_start..).unwrap_or("");
    let authority_len = rest.find(['/', '?']).unwrap_or(rest.len());
    let base = url.get(..authority_start + authority_len).unwrap_or(url);
    let tail = rest.get(authority_len..).unwrap_or("");
    let (path, query) = match tail.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (tail, None),
    };
    let db_name = path.trim_start_matches('/').trim();
    let admin_url = match query {
        Some(q) => format!("{}/postgres?{}", base, q),
        None => format!("{}/postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

async fn select_one(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}

/// Catalog backed by `<schema>.courses`.
#[derive(Clone)]
pub struct PgCourseStore {
    pool: PgPool,
    table: String,
}

impl PgCourseStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgCourseStore {
            pool,
            table: qualified_table(schema, COURSES_TABLE),
        }
    }
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn find_all(&self) -> Result<Vec<Course>, StorageError> {
        let sql = format!("SELECT id, name, description FROM {} ORDER BY id", self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, (i64, String, Option<String>)>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, description)| Course { id, name, description })
            .collect())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        select_one(&self.pool).await
    }
}

/// Enrollment log backed by `<schema>.enrollments`. Ids come from the BIGSERIAL sequence.
#[derive(Clone)]
pub struct PgEnrollmentStore {
    pool: PgPool,
    table: String,
}

impl PgEnrollmentStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgEnrollmentStore {
            pool,
            table: qualified_table(schema, ENROLLMENTS_TABLE),
        }
    }
}

#[async_trait]
impl EnrollmentStore for PgEnrollmentStore {
    async fn find_all(&self) -> Result<Vec<EnrollmentRecord>, StorageError> {
        let sql = format!(
            "SELECT id, name, email_id, course_name, enrolled_at FROM {} ORDER BY id",
            self.table
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, (i64, String, String, String, DateTime<Utc>)>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, email_id, course_name, enrolled_at)| EnrollmentRecord {
                id,
                name,
                email_id,
                course_name,
                enrolled_at,
            })
            .collect())
    }

    async fn save(&self, enrollment: NewEnrollment) -> Result<EnrollmentRecord, StorageError> {
        let sql = format!(
            "INSERT INTO {} (name, email_id, course_name) VALUES ($1, $2, $3) \
             RETURNING id, enrolled_at",
            self.table
        );
        tracing::debug!(sql = %sql, "query");
        let (id, enrolled_at): (i64, DateTime<Utc>) = sqlx::query_as(&sql)
            .bind(&enrollment.name)
            .bind(&enrollment.email_id)
            .bind(&enrollment.course_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(EnrollmentRecord::from_new(id, enrolled_at, enrollment))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        select_one(&self.pool).await
    }
}
