//! User repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UserEntity, UserPublicEntity, UserSummaryEntity};
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str = "id, name, email, password_hash, bio, avatar_url, home_location, \
                            custom_location, use_custom_location, created_at, updated_at";

/// Profile fields to change. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate<'a> {
    pub bio: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub home_location: Option<&'a str>,
    pub custom_location: Option<&'a str>,
    pub use_custom_location: Option<bool>,
}

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by email address (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a user together with their initial OFF status.
    ///
    /// A duplicate email surfaces as a unique violation (23505).
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserEntity>(&format!(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO user_statuses (user_id, mode, text, revision)
            VALUES ($1, 'OFF', NULL, 1)
            "#,
        )
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(user)
    }

    /// Partially update a user's profile.
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate<'_>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_profile");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET bio = COALESCE($2, bio),
                avatar_url = COALESCE($3, avatar_url),
                home_location = COALESCE($4, home_location),
                custom_location = COALESCE($5, custom_location),
                use_custom_location = COALESCE($6, use_custom_location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(update.bio)
        .bind(update.avatar_url)
        .bind(update.home_location)
        .bind(update.custom_location)
        .bind(update.use_custom_location)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Case-insensitive substring search on name or email, excluding `exclude`.
    pub async fn search(
        &self,
        query: &str,
        exclude: Uuid,
        limit: i64,
    ) -> Result<Vec<UserSummaryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_users");
        let pattern = format!("%{}%", escape_like(query));
        let result = sqlx::query_as::<_, UserSummaryEntity>(
            r#"
            SELECT id, name, email, avatar_url
            FROM users
            WHERE id <> $1
              AND (name ILIKE $2 ESCAPE '\' OR email ILIKE $2 ESCAPE '\')
            ORDER BY name ASC
            LIMIT $3
            "#,
        )
        .bind(exclude)
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Public details for a set of users, ordered by name.
    pub async fn find_public_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<UserPublicEntity>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_public_users_by_ids");
        let result = sqlx::query_as::<_, UserPublicEntity>(
            r#"
            SELECT id, name, avatar_url
            FROM users
            WHERE id = ANY($1)
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ali"), "ali");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
