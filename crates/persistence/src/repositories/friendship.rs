//! Friendship repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{FriendshipEntity, ReceivedRequestEntity, UserEntity};
use crate::metrics::QueryTimer;

/// Repository for the friendship graph.
#[derive(Clone)]
pub struct FriendshipRepository {
    pool: PgPool,
}

impl FriendshipRepository {
    /// Creates a new FriendshipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FriendshipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_friendship_by_id");
        let result = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT id, user_a_id, user_b_id, status, created_at, updated_at
            FROM friendships
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The row for an unordered pair, whichever side requested it.
    pub async fn find_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> Result<Option<FriendshipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_friendship_between");
        let result = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT id, user_a_id, user_b_id, status, created_at, updated_at
            FROM friendships
            WHERE (user_a_id = $1 AND user_b_id = $2)
               OR (user_a_id = $2 AND user_b_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a pending request from `requester` to `addressee`.
    pub async fn create_request(
        &self,
        requester: Uuid,
        addressee: Uuid,
    ) -> Result<FriendshipEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_friend_request");
        let result = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            INSERT INTO friendships (user_a_id, user_b_id, status)
            VALUES ($1, $2, 'PENDING')
            RETURNING id, user_a_id, user_b_id, status, created_at, updated_at
            "#,
        )
        .bind(requester)
        .bind(addressee)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark a pending request accepted. Returns `None` if it was not pending.
    pub async fn accept(&self, id: Uuid) -> Result<Option<FriendshipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("accept_friend_request");
        let result = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            UPDATE friendships
            SET status = 'ACCEPTED', updated_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            RETURNING id, user_a_id, user_b_id, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a pending request. Returns true if a row was removed.
    pub async fn delete_pending(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_friend_request");
        let result = sqlx::query("DELETE FROM friendships WHERE id = $1 AND status = 'PENDING'")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Ids of everyone with an accepted friendship with `user_id`.
    pub async fn accepted_friend_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("accepted_friend_ids");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT CASE WHEN user_a_id = $1 THEN user_b_id ELSE user_a_id END
            FROM friendships
            WHERE status = 'ACCEPTED' AND (user_a_id = $1 OR user_b_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Accepted friends of `user_id`, ordered by name.
    pub async fn list_friends(&self, user_id: Uuid) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_friends");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.id, u.name, u.email, u.password_hash, u.bio, u.avatar_url,
                   u.home_location, u.custom_location, u.use_custom_location,
                   u.created_at, u.updated_at
            FROM friendships f
            JOIN users u
              ON u.id = CASE WHEN f.user_a_id = $1 THEN f.user_b_id ELSE f.user_a_id END
            WHERE f.status = 'ACCEPTED' AND (f.user_a_id = $1 OR f.user_b_id = $1)
            ORDER BY u.name ASC, u.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Pending requests addressed to `user_id`, newest first.
    pub async fn received_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReceivedRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("received_friend_requests");
        let result = sqlx::query_as::<_, ReceivedRequestEntity>(
            r#"
            SELECT f.id,
                   u.id AS from_id,
                   u.name AS from_name,
                   u.email AS from_email,
                   u.avatar_url AS from_avatar_url
            FROM friendships f
            JOIN users u ON u.id = f.user_a_id
            WHERE f.user_b_id = $1 AND f.status = 'PENDING'
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
