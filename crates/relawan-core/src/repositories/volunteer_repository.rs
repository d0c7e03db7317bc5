//! Volunteer repository trait (port)

use async_trait::async_trait;
use crate::domain::{Volunteer, VolunteerStatus};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    async fn find(&self, event_id: i32, user_id: i32) -> Result<Option<Volunteer>, DomainError>;

    /// Enrols the user with status `Mendatang`. Implementations must make the
    /// capacity check and the insert atomic, and report `EventFull`,
    /// `EventNotFound` or `AlreadyVolunteered` accordingly.
    async fn enroll(&self, event_id: i32, user_id: i32) -> Result<Volunteer, DomainError>;

    /// Returns the number of rows updated.
    async fn update_status(
        &self,
        event_id: i32,
        user_id: i32,
        status: VolunteerStatus,
    ) -> Result<u64, DomainError>;
}
