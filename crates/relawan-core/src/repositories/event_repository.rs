//! Event repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::domain::{Event, EventSummary, JoinedEvent, NewEvent};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts the event and its skill links in one transaction.
    async fn create(&self, event: &NewEvent, skill_ids: &[i32]) -> Result<Event, DomainError>;

    async fn find_summary(&self, id: i32) -> Result<Option<EventSummary>, DomainError>;

    /// Events starting on or after `today` that `user_id` has not joined.
    /// When `skill_ids` is given, only events sharing one of those skills.
    async fn list_open(
        &self,
        user_id: i32,
        today: NaiveDate,
        skill_ids: Option<Vec<i32>>,
    ) -> Result<Vec<EventSummary>, DomainError>;

    /// Every event `user_id` volunteers for, with status and report id.
    async fn list_joined(&self, user_id: i32) -> Result<Vec<JoinedEvent>, DomainError>;
}
