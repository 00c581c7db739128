use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::ChirpId;
use crate::chirp::models::SortOrder;
use crate::chirp::ports::ChirpRepository;
use crate::user::models::UserId;

const LIST_ASC: &str = r#"
    SELECT id, body, user_id, created_at, updated_at
    FROM chirps
    WHERE ($1::uuid IS NULL OR user_id = $1)
    ORDER BY created_at ASC
"#;

const LIST_DESC: &str = r#"
    SELECT id, body, user_id, created_at, updated_at
    FROM chirps
    WHERE ($1::uuid IS NULL OR user_id = $1)
    ORDER BY created_at DESC
"#;

pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ChirpRow {
    id: Uuid,
    body: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChirpRow> for Chirp {
    fn from(r: ChirpRow) -> Self {
        Chirp {
            id: ChirpId(r.id),
            body: ChirpBody::from_stored(r.body),
            user_id: UserId(r.user_id),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    async fn create(&self, author: &UserId, body: &ChirpBody) -> Result<Chirp, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            INSERT INTO chirps (body, user_id)
            VALUES ($1, $2)
            RETURNING id, body, user_id, created_at, updated_at
            "#,
        )
        .bind(body.as_str())
        .bind(author.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ChirpError::AuthorNotFound(author.to_string());
                }
            }
            ChirpError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(row.map(Chirp::from))
    }

    async fn list(
        &self,
        author: Option<UserId>,
        order: SortOrder,
    ) -> Result<Vec<Chirp>, ChirpError> {
        let sql = match order {
            SortOrder::Asc => LIST_ASC,
            SortOrder::Desc => LIST_DESC,
        };

        let rows = sqlx::query_as::<_, ChirpRow>(sql)
            .bind(author.map(|id| id.0))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Chirp::from).collect())
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let result = sqlx::query(
            r#"
            DELETE FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ChirpError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, ChirpError> {
        let result = sqlx::query("DELETE FROM chirps")
            .execute(&self.pool)
            .await
            .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
