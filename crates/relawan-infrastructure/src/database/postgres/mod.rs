//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod skill_repo_impl;
pub mod event_repo_impl;
pub mod volunteer_repo_impl;
pub mod report_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use skill_repo_impl::PgSkillRepository;
pub use event_repo_impl::PgEventRepository;
pub use volunteer_repo_impl::PgVolunteerRepository;
pub use report_repo_impl::PgReportRepository;

use relawan_core::error::DomainError;
use tracing::error;

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}
