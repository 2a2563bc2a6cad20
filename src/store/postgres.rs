use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use tracing::debug;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, Stored};

/// Documents live in a single JSONB table partitioned by `collection`.
/// Field filters become a containment test (`body @> filter`).
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

// $1 collection, $2 optional id, $3 containment filter
const FIRST_MATCH: &str = r#"
    SELECT id
      FROM documents
     WHERE collection = $1
       AND ($2::uuid IS NULL OR id = $2)
       AND body @> $3
     ORDER BY seq ASC
     LIMIT 1
"#;

impl PgDocumentStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: Collection, body: Document) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(Json(&body))
        .execute(&self.pool)
        .await
        .with_context(|| format!("insert into {}", collection.as_str()))?;
        debug!(collection = collection.as_str(), %id, "document inserted");
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> anyhow::Result<Option<Stored>> {
        let row = sqlx::query_as::<_, (Uuid, Json<Document>)>(
            r#"
            SELECT id, body
              FROM documents
             WHERE collection = $1
               AND ($2::uuid IS NULL OR id = $2)
               AND body @> $3
             ORDER BY seq ASC
             LIMIT 1
            "#,
        )
        .bind(collection.as_str())
        .bind(filter.id())
        .bind(Json(filter.fields()))
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("find_one in {}", collection.as_str()))?;

        Ok(row.map(|(id, Json(body))| Stored { id, body }))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> anyhow::Result<Vec<Stored>> {
        let rows = sqlx::query_as::<_, (Uuid, Json<Document>)>(
            r#"
            SELECT id, body
              FROM documents
             WHERE collection = $1
               AND ($2::uuid IS NULL OR id = $2)
               AND body @> $3
             ORDER BY seq ASC
            "#,
        )
        .bind(collection.as_str())
        .bind(filter.id())
        .bind(Json(filter.fields()))
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("find in {}", collection.as_str()))?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(body))| Stored { id, body })
            .collect())
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        body: Document,
    ) -> anyhow::Result<bool> {
        let sql = format!(
            "UPDATE documents SET body = $4, updated_at = now() WHERE id = ({FIRST_MATCH})"
        );
        let res = sqlx::query(&sql)
            .bind(collection.as_str())
            .bind(filter.id())
            .bind(Json(filter.fields()))
            .bind(Json(&body))
            .execute(&self.pool)
            .await
            .with_context(|| format!("replace_one in {}", collection.as_str()))?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> anyhow::Result<bool> {
        let sql = format!("DELETE FROM documents WHERE id = ({FIRST_MATCH})");
        let res = sqlx::query(&sql)
            .bind(collection.as_str())
            .bind(filter.id())
            .bind(Json(filter.fields()))
            .execute(&self.pool)
            .await
            .with_context(|| format!("delete_one in {}", collection.as_str()))?;
        Ok(res.rows_affected() > 0)
    }

    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        delta: i64,
    ) -> anyhow::Result<Option<i64>> {
        let sql = format!(
            r#"
            UPDATE documents
               SET body = jsonb_set(
                       body,
                       ARRAY[$4::text],
                       to_jsonb(COALESCE((body ->> $4::text)::bigint, 0) + $5)
                   ),
                   updated_at = now()
             WHERE id = ({FIRST_MATCH})
            RETURNING (body ->> $4::text)::bigint
            "#
        );
        let value = sqlx::query_scalar::<_, Option<i64>>(&sql)
            .bind(collection.as_str())
            .bind(filter.id())
            .bind(Json(filter.fields()))
            .bind(field)
            .bind(delta)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("increment {} in {}", field, collection.as_str()))?;
        Ok(value.flatten())
    }
}
