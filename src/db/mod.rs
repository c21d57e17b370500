use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::error::ApiError;

/// Handle to the document store. One row per document; the body is the
/// record's JSON dump and the id is generated by SQLite on insert.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    name: String,
}

impl Database {
    /// Connect and make sure the documents table exists.
    pub async fn connect(url: &str, name: impl Into<String>) -> Result<Self, sqlx::Error> {
        let pool = pool_options(url).connect(url).await?;
        let db = Self {
            pool,
            name: name.into(),
        };
        db.setup().await?;
        Ok(db)
    }

    /// Build the handle without opening a connection. Failures surface on
    /// first use.
    pub fn connect_lazy(url: &str, name: impl Into<String>) -> Result<Self, sqlx::Error> {
        let pool = pool_options(url)
            .acquire_timeout(Duration::from_secs(2))
            .connect_lazy(url)?;
        Ok(Self {
            pool,
            name: name.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn setup(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS documents (
                   id TEXT PRIMARY KEY NOT NULL DEFAULT (lower(hex(randomblob(12)))),
                   collection TEXT NOT NULL,
                   body TEXT NOT NULL
               )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents (collection)"#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert one record into `kind`, stamping creation time. Returns the new id.
    pub async fn create_document<T: Serialize>(
        &self,
        kind: &str,
        record: &T,
    ) -> Result<String, ApiError> {
        let mut body = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        body.insert("created_at".to_string(), Value::from(now.clone()));
        body.insert("updated_at".to_string(), Value::from(now));

        let id = sqlx::query_scalar::<_, String>(
            r#"INSERT INTO documents (collection, body) VALUES (?, ?) RETURNING id"#,
        )
        .bind(kind)
        .bind(Value::Object(body).to_string())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(collection = kind, id = %id, "document created");
        Ok(id)
    }

    /// Up to `limit` documents of `kind` in insertion order, `limit = 0`
    /// meaning all of them. `filter` matches top-level fields by equality.
    pub async fn get_documents(
        &self,
        kind: &str,
        filter: &Map<String, Value>,
        limit: u32,
    ) -> Result<Vec<Value>, ApiError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
        query.push_bind(kind);

        for (field, value) in filter {
            query
                .push(" AND json_extract(body, ")
                .push_bind(format!("$.\"{field}\""))
                .push(") IS json_extract(")
                .push_bind(value.to_string())
                .push(", '$')");
        }

        query.push(" ORDER BY rowid LIMIT ");
        query.push_bind(if limit == 0 { -1 } else { i64::from(limit) });

        let rows = query.build().fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> Result<Value, ApiError> {
                let id: String = row.try_get("id")?;
                let body: String = row.try_get("body")?;
                let fields: Map<String, Value> = serde_json::from_str(&body)?;

                let mut document = Map::with_capacity(fields.len() + 1);
                document.insert("_id".to_string(), Value::from(id));
                document.extend(fields);
                Ok(Value::Object(document))
            })
            .collect()
    }

    /// Names of collections holding at least one document, sorted.
    pub async fn list_collection_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT collection FROM documents ORDER BY collection"#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

fn pool_options(url: &str) -> SqlitePoolOptions {
    // Every connection to an in-memory database is its own database.
    if url.contains(":memory:") || url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}
