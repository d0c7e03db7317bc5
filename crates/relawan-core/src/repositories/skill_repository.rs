//! Skill repository trait (port)

use async_trait::async_trait;
use crate::domain::Skill;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Skill>, DomainError>;

    /// Returns the subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, DomainError>;
}
