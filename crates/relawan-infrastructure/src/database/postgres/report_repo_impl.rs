// ============================================================================
// Relawan Infrastructure - PostgreSQL Report Repository
// File: crates/relawan-infrastructure/src/database/postgres/report_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use relawan_core::domain::{NewReport, Report};
use relawan_core::error::DomainError;
use relawan_core::repositories::ReportRepository;

use super::{db_error, is_unique_violation};

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReportRow {
    pub id: i32,
    pub volunteer_id: i32,
    pub description: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Report {
            id: row.id,
            volunteer_id: row.volunteer_id,
            description: row.description,
            photo_url: row.photo_url,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn find_by_volunteer(&self, volunteer_id: i32) -> Result<Option<Report>, DomainError> {
        let row: Option<ReportRow> = sqlx::query_as(
            r#"
            SELECT id, volunteer_id, description, photo_url, created_at
            FROM reports
            WHERE volunteer_id = $1
            "#,
        )
        .bind(volunteer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding report", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, volunteer_id: i32, report: &NewReport) -> Result<Report, DomainError> {
        let row: ReportRow = sqlx::query_as(
            r#"
            INSERT INTO reports (volunteer_id, description, photo_url)
            VALUES ($1, $2, $3)
            RETURNING id, volunteer_id, description, photo_url, created_at
            "#,
        )
        .bind(volunteer_id)
        .bind(&report.description)
        .bind(&report.photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::ReportAlreadyExists(volunteer_id)
            } else {
                db_error("creating report", e)
            }
        })?;

        Ok(row.into())
    }
}
