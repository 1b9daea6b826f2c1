//! Event repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::event::{NewEvent, ParticipantStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    CohostWithUserEntity, EventEntity, EventParticipantEntity, ParticipantRoleDb,
    ParticipantStatusDb, ParticipantWithUserEntity, ShoutWithUserEntity,
};
use crate::metrics::QueryTimer;

const EVENT_COLUMNS: &str = "e.id, e.host_id, e.activity, e.start_time, e.location, e.notes, \
                             e.image_url, e.is_instant, e.is_potential, e.created_at, e.updated_at";

/// Candidate filter mirroring the event visibility rule, used to keep reads
/// narrow. Callers still check each loaded event.
const VISIBLE_TO_CALLER: &str = r#"
    (e.host_id = $1
     OR EXISTS (SELECT 1 FROM event_cohosts c WHERE c.event_id = e.id AND c.user_id = $1)
     OR EXISTS (SELECT 1 FROM event_participants p WHERE p.event_id = e.id AND p.user_id = $1))
"#;

/// Repository for events, participants, co-hosts and shouts.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an event with its co-hosts and participants in one transaction.
    pub async fn create(&self, event: &NewEvent) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (host_id, activity, start_time, location, notes, image_url,
                                is_instant, is_potential)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, host_id, activity, start_time, location, notes, image_url,
                      is_instant, is_potential, created_at, updated_at
            "#,
        )
        .bind(event.host_id)
        .bind(&event.activity)
        .bind(event.start_time)
        .bind(event.location.as_deref())
        .bind(event.notes.as_deref())
        .bind(event.image_url.as_deref())
        .bind(event.is_instant)
        .bind(event.is_potential)
        .fetch_one(&mut *tx)
        .await?;

        for cohost_id in &event.cohost_ids {
            sqlx::query("INSERT INTO event_cohosts (event_id, user_id) VALUES ($1, $2)")
                .bind(created.id)
                .bind(cohost_id)
                .execute(&mut *tx)
                .await?;
        }

        // clock_timestamp() keeps created_at in insertion order within the transaction.
        for participant in &event.participants {
            sqlx::query(
                r#"
                INSERT INTO event_participants (event_id, user_id, role, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, clock_timestamp(), clock_timestamp())
                "#,
            )
            .bind(created.id)
            .bind(participant.user_id)
            .bind(ParticipantRoleDb::from(participant.role))
            .bind(ParticipantStatusDb::from(participant.status))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {} FROM events e WHERE e.id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Events `user_id` may see starting at or after `since`, earliest first.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_visible_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            SELECT {}
            FROM events e
            WHERE {} AND e.start_time >= $2
            ORDER BY e.start_time ASC, e.id ASC
            LIMIT $3
            "#,
            EVENT_COLUMNS, VISIBLE_TO_CALLER
        ))
        .bind(user_id)
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The earliest visible event starting at or after `now`.
    pub async fn next_visible(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("next_visible_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            SELECT {}
            FROM events e
            WHERE {} AND e.start_time >= $2
            ORDER BY e.start_time ASC, e.id ASC
            LIMIT 1
            "#,
            EVENT_COLUMNS, VISIBLE_TO_CALLER
        ))
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Co-hosts for a batch of events.
    pub async fn cohosts_for(
        &self,
        event_ids: &[Uuid],
    ) -> Result<Vec<CohostWithUserEntity>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("event_cohosts_for");
        let result = sqlx::query_as::<_, CohostWithUserEntity>(
            r#"
            SELECT c.event_id, c.user_id, u.name AS user_name, u.avatar_url AS user_avatar_url
            FROM event_cohosts c
            JOIN users u ON u.id = c.user_id
            WHERE c.event_id = ANY($1)
            ORDER BY u.name ASC
            "#,
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Participants for a batch of events, in creation order.
    pub async fn participants_for(
        &self,
        event_ids: &[Uuid],
    ) -> Result<Vec<ParticipantWithUserEntity>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("event_participants_for");
        let result = sqlx::query_as::<_, ParticipantWithUserEntity>(
            r#"
            SELECT p.id, p.event_id, p.user_id, p.role, p.status, p.created_at,
                   u.name AS user_name, u.avatar_url AS user_avatar_url
            FROM event_participants p
            JOIN users u ON u.id = p.user_id
            WHERE p.event_id = ANY($1)
            ORDER BY p.created_at ASC, p.id ASC
            "#,
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Shouts on an event, oldest first.
    pub async fn shouts_for(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<ShoutWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("event_shouts_for");
        let result = sqlx::query_as::<_, ShoutWithUserEntity>(
            r#"
            SELECT s.id, s.event_id, s.user_id, s.message, s.created_at,
                   u.name AS user_name, u.avatar_url AS user_avatar_url
            FROM shout_messages s
            JOIN users u ON u.id = s.user_id
            WHERE s.event_id = $1
            ORDER BY s.created_at ASC, s.id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_participant(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<EventParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_participant");
        let result = sqlx::query_as::<_, EventParticipantEntity>(
            r#"
            SELECT id, event_id, user_id, role, status, created_at, updated_at
            FROM event_participants
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set a participant's status. The role column is never written here.
    pub async fn update_participant_status(
        &self,
        participant_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<EventParticipantEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_participant_status");
        let result = sqlx::query_as::<_, EventParticipantEntity>(
            r#"
            UPDATE event_participants
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, event_id, user_id, role, status, created_at, updated_at
            "#,
        )
        .bind(participant_id)
        .bind(ParticipantStatusDb::from(status))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Append a shout and return it with the author's details.
    pub async fn create_shout(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        message: &str,
    ) -> Result<ShoutWithUserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_shout");
        let result = sqlx::query_as::<_, ShoutWithUserEntity>(
            r#"
            WITH inserted AS (
                INSERT INTO shout_messages (event_id, user_id, message)
                VALUES ($1, $2, $3)
                RETURNING id, event_id, user_id, message, created_at
            )
            SELECT i.id, i.event_id, i.user_id, i.message, i.created_at,
                   u.name AS user_name, u.avatar_url AS user_avatar_url
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
