//! User status repository for database operations.

use domain::models::status::StatusMode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{StatusModeDb, UserStatusEntity};
use crate::metrics::QueryTimer;

/// Repository for the per-user summary status record.
#[derive(Clone)]
pub struct UserStatusRepository {
    pool: PgPool,
}

impl UserStatusRepository {
    /// Creates a new UserStatusRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserStatusEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_status");
        let result = sqlx::query_as::<_, UserStatusEntity>(
            r#"
            SELECT user_id, mode, text, revision, updated_at
            FROM user_statuses
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_user_ids(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<UserStatusEntity>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_user_statuses");
        let result = sqlx::query_as::<_, UserStatusEntity>(
            r#"
            SELECT user_id, mode, text, revision, updated_at
            FROM user_statuses
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the whole status record.
    ///
    /// Without `expected_revision` this is last-write-wins. With it, the write
    /// only happens when the stored revision matches (0 meaning "no row yet");
    /// `None` is returned when it does not.
    pub async fn replace(
        &self,
        user_id: Uuid,
        mode: StatusMode,
        text: Option<&str>,
        expected_revision: Option<i64>,
    ) -> Result<Option<UserStatusEntity>, sqlx::Error> {
        let timer = QueryTimer::new("replace_user_status");
        let mode = StatusModeDb::from(mode);

        let result = match expected_revision {
            None => {
                sqlx::query_as::<_, UserStatusEntity>(
                    r#"
                    INSERT INTO user_statuses (user_id, mode, text, revision, updated_at)
                    VALUES ($1, $2, $3, 1, NOW())
                    ON CONFLICT (user_id) DO UPDATE
                    SET mode = EXCLUDED.mode,
                        text = EXCLUDED.text,
                        revision = user_statuses.revision + 1,
                        updated_at = NOW()
                    RETURNING user_id, mode, text, revision, updated_at
                    "#,
                )
                .bind(user_id)
                .bind(mode)
                .bind(text)
                .fetch_optional(&self.pool)
                .await
            }
            Some(0) => {
                sqlx::query_as::<_, UserStatusEntity>(
                    r#"
                    INSERT INTO user_statuses (user_id, mode, text, revision, updated_at)
                    VALUES ($1, $2, $3, 1, NOW())
                    ON CONFLICT (user_id) DO NOTHING
                    RETURNING user_id, mode, text, revision, updated_at
                    "#,
                )
                .bind(user_id)
                .bind(mode)
                .bind(text)
                .fetch_optional(&self.pool)
                .await
            }
            Some(expected) => {
                sqlx::query_as::<_, UserStatusEntity>(
                    r#"
                    UPDATE user_statuses
                    SET mode = $2,
                        text = $3,
                        revision = revision + 1,
                        updated_at = NOW()
                    WHERE user_id = $1 AND revision = $4
                    RETURNING user_id, mode, text, revision, updated_at
                    "#,
                )
                .bind(user_id)
                .bind(mode)
                .bind(text)
                .bind(expected)
                .fetch_optional(&self.pool)
                .await
            }
        };
        timer.record();
        result
    }
}
