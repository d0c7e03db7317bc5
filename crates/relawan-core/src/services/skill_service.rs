//! Skill catalogue service

use std::sync::Arc;

use crate::domain::Skill;
use crate::error::DomainError;
use crate::repositories::SkillRepository;

pub struct SkillService {
    skills: Arc<dyn SkillRepository>,
}

impl SkillService {
    pub fn new(skills: Arc<dyn SkillRepository>) -> Self {
        Self { skills }
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, DomainError> {
        self.skills.list().await
    }
}
