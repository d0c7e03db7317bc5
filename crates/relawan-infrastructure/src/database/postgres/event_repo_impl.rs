// ============================================================================
// Relawan Infrastructure - PostgreSQL Event Repository
// File: crates/relawan-infrastructure/src/database/postgres/event_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use relawan_core::domain::{Event, EventSummary, JoinedEvent, NewEvent, VolunteerStatus};
use relawan_core::error::DomainError;
use relawan_core::repositories::EventRepository;

use super::db_error;

pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct EventRow {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub requirements: String,
    pub organizer: String,
    pub point_reward: i32,
    pub max_volunteers: i32,
    pub image_url: String,
    pub organizer_logo: String,
    pub created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            location: row.location,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
            requirements: row.requirements,
            organizer: row.organizer,
            point_reward: row.point_reward,
            max_volunteers: row.max_volunteers,
            image_url: row.image_url,
            organizer_logo: row.organizer_logo,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    #[sqlx(flatten)]
    pub event: EventRow,
    pub skills: Vec<String>,
    pub volunteer_count: i64,
}

impl From<SummaryRow> for EventSummary {
    fn from(row: SummaryRow) -> Self {
        EventSummary {
            event: row.event.into(),
            skills: row.skills,
            volunteer_count: row.volunteer_count,
        }
    }
}

#[derive(Debug, FromRow)]
struct JoinedRow {
    #[sqlx(flatten)]
    pub event: EventRow,
    pub status: String,
    pub report_id: Option<i32>,
}

impl From<JoinedRow> for JoinedEvent {
    fn from(row: JoinedRow) -> Self {
        JoinedEvent {
            event: row.event.into(),
            status: VolunteerStatus::from_str(&row.status).unwrap_or_default(),
            report_id: row.report_id,
        }
    }
}

const EVENT_COLUMNS: &str = r#"
    e.id, e.title, e.location, e.start_date, e.end_date, e.description,
    e.requirements, e.organizer, e.point_reward, e.max_volunteers,
    e.image_url, e.organizer_logo, e.created_at
"#;

const SUMMARY_COLUMNS: &str = r#"
    COALESCE(
        (SELECT array_agg(s.name::text ORDER BY s.id)
         FROM event_skills es
         JOIN skills s ON s.id = es.skill_id
         WHERE es.event_id = e.id),
        '{}'::text[]
    ) AS skills,
    (SELECT COUNT(*) FROM volunteers v WHERE v.event_id = e.id) AS volunteer_count
"#;

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, event: &NewEvent, skill_ids: &[i32]) -> Result<Event, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting event transaction", e))?;

        let row: EventRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO events AS e (
                title, location, start_date, end_date, description, requirements,
                organizer, point_reward, max_volunteers, image_url, organizer_logo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(&event.title)
        .bind(&event.location)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.description)
        .bind(&event.requirements)
        .bind(&event.organizer)
        .bind(event.point_reward)
        .bind(event.max_volunteers)
        .bind(&event.image_url)
        .bind(&event.organizer_logo)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("creating event", e))?;

        sqlx::query(
            r#"
            INSERT INTO event_skills (event_id, skill_id)
            SELECT $1, UNNEST($2::int[])
            "#,
        )
        .bind(row.id)
        .bind(skill_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("linking event skills", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing event transaction", e))?;

        info!("Event created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn find_summary(&self, id: i32) -> Result<Option<EventSummary>, DomainError> {
        let row: Option<SummaryRow> = sqlx::query_as(&format!(
            "SELECT {}, {} FROM events e WHERE e.id = $1",
            EVENT_COLUMNS, SUMMARY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding event", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_open(
        &self,
        user_id: i32,
        today: NaiveDate,
        skill_ids: Option<Vec<i32>>,
    ) -> Result<Vec<EventSummary>, DomainError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, {}
            FROM events e
            WHERE e.start_date >= $2
              AND NOT EXISTS (
                  SELECT 1 FROM volunteers v WHERE v.event_id = e.id AND v.user_id = $1
              )
              AND (
                  $3::int[] IS NULL OR EXISTS (
                      SELECT 1 FROM event_skills es
                      WHERE es.event_id = e.id AND es.skill_id = ANY($3::int[])
                  )
              )
            ORDER BY e.start_date, e.id
            "#,
            EVENT_COLUMNS, SUMMARY_COLUMNS
        ))
        .bind(user_id)
        .bind(today)
        .bind(skill_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing open events", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_joined(&self, user_id: i32) -> Result<Vec<JoinedEvent>, DomainError> {
        let rows: Vec<JoinedRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, v.status, r.id AS report_id
            FROM volunteers v
            JOIN events e ON e.id = v.event_id
            LEFT JOIN reports r ON r.volunteer_id = v.id
            WHERE v.user_id = $1
            ORDER BY e.start_date, e.id
            "#,
            EVENT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing joined events", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
