use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::model::{generate_id, Document, Id};
use crate::store::traits::{DocumentStore, Store};

/// Documents share one JSONB table partitioned by collection name.
const CREATE_DOCUMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        seq BIGSERIAL NOT NULL,
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        body JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (collection, id)
    )
"#;

/// Tables created before `seq` existed get it added; existing rows are numbered in scan order.
const ADD_SEQUENCE_COLUMN: &str = "ALTER TABLE documents ADD COLUMN IF NOT EXISTS seq BIGSERIAL";

/// `seq` is assigned on first insert and untouched by upserts, so it keeps insertion order.
const SELECT_COLLECTION: &str = "SELECT body FROM documents WHERE collection = $1 ORDER BY seq";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the documents table if it is missing
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_DOCUMENTS_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create documents table")?;
        sqlx::query(ADD_SEQUENCE_COLUMN)
            .execute(&self.pool)
            .await
            .context("Failed to add documents sequence column")?;
        Ok(())
    }
}

fn decode<D: Document>(body: serde_json::Value) -> Result<D> {
    serde_json::from_value(body).with_context(|| format!("Failed to decode {}", D::ENTITY_NAME))
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    async fn save<D: Document>(&self, mut document: D) -> Result<D> {
        let id = match document.id() {
            Some(id) => id.clone(),
            None => {
                let id = generate_id();
                document.set_id(id.clone());
                id
            }
        };
        let body = serde_json::to_value(&document)
            .with_context(|| format!("Failed to serialize {} {}", D::ENTITY_NAME, id))?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(D::COLLECTION)
        .bind(&id)
        .bind(&body)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save {} {}", D::ENTITY_NAME, id))?;

        log::debug!("Saved {} {}", D::ENTITY_NAME, id);
        Ok(document)
    }

    async fn find_by_id<D: Document>(&self, id: &Id) -> Result<Option<D>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(D::COLLECTION)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch {} {}", D::ENTITY_NAME, id))?;

        let Some(row) = row else {
            return Ok(None);
        };

        decode(row.get("body")).map(Some)
    }

    async fn find_all<D: Document>(&self) -> Result<Vec<D>> {
        let rows = sqlx::query(SELECT_COLLECTION)
            .bind(D::COLLECTION)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list {}", D::ENTITY_NAME))?;

        rows.into_iter().map(|row| decode(row.get("body"))).collect()
    }

    async fn exists_by_id<D: Document>(&self, id: &Id) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE collection = $1 AND id = $2)",
        )
        .bind(D::COLLECTION)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to check {} {}", D::ENTITY_NAME, id))?;

        Ok(exists)
    }

    async fn delete_by_id<D: Document>(&self, id: &Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(D::COLLECTION)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete {} {}", D::ENTITY_NAME, id))?;

        if result.rows_affected() == 0 {
            log::debug!("Delete of missing {} {} ignored", D::ENTITY_NAME, id);
        }
        Ok(())
    }
}

impl Store for PostgresStore {}
