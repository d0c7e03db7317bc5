// ============================================================================
// Relawan Infrastructure - PostgreSQL Volunteer Repository
// File: crates/relawan-infrastructure/src/database/postgres/volunteer_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;

use relawan_core::domain::{Volunteer, VolunteerStatus};
use relawan_core::error::DomainError;
use relawan_core::repositories::VolunteerRepository;

use super::{db_error, is_unique_violation};

pub struct PgVolunteerRepository {
    pool: PgPool,
}

impl PgVolunteerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VolunteerRow {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VolunteerRow> for Volunteer {
    fn from(row: VolunteerRow) -> Self {
        Volunteer {
            id: row.id,
            event_id: row.event_id,
            user_id: row.user_id,
            status: VolunteerStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl VolunteerRepository for PgVolunteerRepository {
    async fn find(&self, event_id: i32, user_id: i32) -> Result<Option<Volunteer>, DomainError> {
        let row: Option<VolunteerRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, user_id, status, created_at, updated_at
            FROM volunteers
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding volunteer", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn enroll(&self, event_id: i32, user_id: i32) -> Result<Volunteer, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting enrolment transaction", e))?;

        // Lock the event row so concurrent enrolments see each other's inserts.
        let capacity: Option<i32> =
            sqlx::query_scalar("SELECT max_volunteers FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("locking event", e))?;
        let capacity = capacity.ok_or(DomainError::EventNotFound(event_id))?;

        let enrolled: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM volunteers WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("counting volunteers", e))?;
        if enrolled >= i64::from(capacity) {
            warn!("Event {} is full ({}/{})", event_id, enrolled, capacity);
            return Err(DomainError::EventFull(event_id));
        }

        let row: VolunteerRow = sqlx::query_as(
            r#"
            INSERT INTO volunteers (event_id, user_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, event_id, user_id, status, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(VolunteerStatus::Mendatang.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::AlreadyVolunteered { event_id, user_id }
            } else {
                db_error("creating volunteer", e)
            }
        })?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing enrolment", e))?;

        Ok(row.into())
    }

    async fn update_status(
        &self,
        event_id: i32,
        user_id: i32,
        status: VolunteerStatus,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE volunteers
            SET status = $3, updated_at = NOW()
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating volunteer status", e))?;

        Ok(result.rows_affected())
    }
}
