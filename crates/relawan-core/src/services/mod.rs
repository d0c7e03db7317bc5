//! Domain services (business logic)

pub mod auth_service;
pub mod event_service;
pub mod skill_service;

pub use auth_service::{AuthService, LoginResult};
pub use event_service::EventService;
pub use skill_service::SkillService;

use crate::error::DomainError;
use crate::repositories::SkillRepository;

/// Fails with `UnknownSkills` listing every id that does not exist.
pub(crate) async fn ensure_skills_exist(
    skills: &dyn SkillRepository,
    ids: &[i32],
) -> Result<(), DomainError> {
    let existing = skills.existing_ids(ids).await?;
    let missing: Vec<i32> = ids.iter().copied().filter(|id| !existing.contains(id)).collect();
    if !missing.is_empty() {
        return Err(DomainError::UnknownSkills(missing));
    }
    Ok(())
}
