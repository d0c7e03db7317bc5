//! Report repository trait (port)

use async_trait::async_trait;
use crate::domain::{NewReport, Report};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_volunteer(&self, volunteer_id: i32) -> Result<Option<Report>, DomainError>;

    /// Maps a unique violation on `volunteer_id` to `ReportAlreadyExists`.
    async fn create(&self, volunteer_id: i32, report: &NewReport) -> Result<Report, DomainError>;
}
