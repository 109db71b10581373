//! PostgreSQL record store. Each record is one row holding a JSONB document; the collection table
//! lives in the schema named by `FARMERS_SCHEMA` (default `public`).

use super::{parse_id, RecordStore};
use crate::error::StoreError;
use crate::record::{FarmerRecord, RecordFields, RecordPatch, FARMER_ROLE};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

/// Table holding the farmer documents.
pub const COLLECTION_TABLE: &str = "farmers";

type DocRow = (Uuid, Json<RecordFields>);

fn into_record((id, Json(fields)): DocRow) -> FarmerRecord {
    FarmerRecord { id, fields }
}

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgRecordStore {
            pool,
            schema: quote_ident(schema),
            table: format!("{}.{}", quote_ident(schema), quote_ident(COLLECTION_TABLE)),
        }
    }

    /// Build a pool that connects on first use. The pool is shared for the process lifetime;
    /// an unreachable server surfaces per request as a database error.
    pub fn connect_lazy(database_url: &str, schema: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool, schema))
    }

    /// Create the schema and collection table if missing.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, mut fields: RecordFields) -> Result<FarmerRecord, StoreError> {
        fields.role = FARMER_ROLE.to_string();
        let row: DocRow = sqlx::query_as(&format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING id, doc",
            self.table
        ))
        .bind(Uuid::new_v4())
        .bind(Json(&fields))
        .fetch_one(&self.pool)
        .await?;
        Ok(into_record(row))
    }

    async fn get_all(&self) -> Result<Vec<FarmerRecord>, StoreError> {
        let rows: Vec<DocRow> = sqlx::query_as(&format!(
            "SELECT id, doc FROM {} ORDER BY created_at, id",
            self.table
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<FarmerRecord, StoreError> {
        let id = parse_id(id)?;
        let row: Option<DocRow> = sqlx::query_as(&format!("SELECT id, doc FROM {} WHERE id = $1", self.table))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(into_record).ok_or(StoreError::NotFound)
    }

    async fn update_by_id(&self, id: &str, patch: &RecordPatch) -> Result<FarmerRecord, StoreError> {
        let id = parse_id(id)?;
        let (set, cleared) = patch.to_document_ops();
        // Merge then drop cleared keys in one statement; concurrent writers race, last one wins.
        let row: Option<DocRow> = sqlx::query_as(&format!(
            "UPDATE {} SET doc = (doc || $2) - $3::text[] WHERE id = $1 RETURNING id, doc",
            self.table
        ))
        .bind(id)
        .bind(Json(Value::Object(set)))
        .bind(cleared)
        .fetch_optional(&self.pool)
        .await?;
        row.map(into_record).ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table))
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
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

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::Unavailable(format!("DATABASE_URL has no database path: {}", url)))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
