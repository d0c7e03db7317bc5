// ============================================================================
// Relawan Infrastructure - PostgreSQL Skill Repository
// File: crates/relawan-infrastructure/src/database/postgres/skill_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use relawan_core::domain::Skill;
use relawan_core::error::DomainError;
use relawan_core::repositories::SkillRepository;

use super::db_error;

pub struct PgSkillRepository {
    pool: PgPool,
}

impl PgSkillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SkillRow {
    pub id: i32,
    pub name: String,
}

#[async_trait]
impl SkillRepository for PgSkillRepository {
    async fn list(&self) -> Result<Vec<Skill>, DomainError> {
        let rows: Vec<SkillRow> = sqlx::query_as("SELECT id, name FROM skills ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing skills", e))?;

        Ok(rows
            .into_iter()
            .map(|r| Skill { id: r.id, name: r.name })
            .collect())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM skills WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("checking skill ids", e))
    }
}
