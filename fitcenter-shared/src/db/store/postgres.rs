/// PostgreSQL-backed store
///
/// Each operation is one SQL statement, so a failed write never leaves a
/// half-applied change and the pooled connection stays usable afterwards.

use super::{Store, StoreError, StoreResult};
use crate::models::{Member, NewMember, NewWorkoutSession, WorkoutSession};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// [`Store`] implementation over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn create_member(&self, input: NewMember) -> StoreResult<Member> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO member (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, phone
            "#,
        )
        .bind(input.name)
        .bind(input.email)
        .bind(input.phone)
        .fetch_one(&self.pool)
        .await?;

        debug!(member_id = member.id, "Inserted member");
        Ok(member)
    }

    async fn list_members(&self) -> StoreResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email, phone
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn find_member(&self, id: i64) -> StoreResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email, phone
            FROM member
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn update_member(&self, id: i64, input: NewMember) -> StoreResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE member
            SET name = $2, email = $3, phone = $4
            WHERE id = $1
            RETURNING id, name, email, phone
            "#,
        )
        .bind(id)
        .bind(input.name)
        .bind(input.email)
        .bind(input.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn delete_member(&self, id: i64) -> StoreResult<bool> {
        // workout_session rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_workout(&self, input: NewWorkoutSession) -> StoreResult<WorkoutSession> {
        let session = sqlx::query_as::<_, WorkoutSession>(
            r#"
            INSERT INTO workout_session (member_id, date, duration_minutes, activity_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, member_id, date, duration_minutes, activity_type
            "#,
        )
        .bind(input.member_id)
        .bind(input.date)
        .bind(input.duration_minutes)
        .bind(input.activity_type)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            session_id = session.id,
            member_id = session.member_id,
            "Inserted workout session"
        );
        Ok(session)
    }

    async fn list_workouts(&self) -> StoreResult<Vec<WorkoutSession>> {
        let sessions = sqlx::query_as::<_, WorkoutSession>(
            r#"
            SELECT id, member_id, date, duration_minutes, activity_type
            FROM workout_session
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn list_workouts_for_member(&self, member_id: i64) -> StoreResult<Vec<WorkoutSession>> {
        let sessions = sqlx::query_as::<_, WorkoutSession>(
            r#"
            SELECT id, member_id, date, duration_minutes, activity_type
            FROM workout_session
            WHERE member_id = $1
            ORDER BY id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
