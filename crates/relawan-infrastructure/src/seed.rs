// ============================================================================
// Relawan Infrastructure - Default Data Seeder
// File: crates/relawan-infrastructure/src/seed.rs
// ============================================================================
//! Inserts the default admin account and skill catalogue. Safe to run twice.

use sqlx::PgPool;
use tracing::info;

use relawan_core::domain::UserRole;
use relawan_core::error::DomainError;
use relawan_security::PasswordService;
use relawan_shared::constants::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_SKILLS};

use crate::database::postgres::db_error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub skills_inserted: u64,
    pub admin_created: bool,
}

pub async fn seed_defaults(pool: &PgPool) -> Result<SeedSummary, DomainError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| db_error("starting seed transaction", e))?;

    let skills = sqlx::query(
        r#"
        INSERT INTO skills (name)
        SELECT UNNEST($1::text[])
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(DEFAULT_SKILLS.to_vec())
    .execute(&mut *tx)
    .await
    .map_err(|e| db_error("seeding skills", e))?;

    let password_hash = PasswordService::hash(DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

    let admin = sqlx::query(
        r#"
        INSERT INTO users (nama, email, password, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT ((LOWER(email))) DO NOTHING
        "#,
    )
    .bind("Admin")
    .bind(DEFAULT_ADMIN_EMAIL)
    .bind(password_hash)
    .bind(UserRole::Admin.as_str())
    .execute(&mut *tx)
    .await
    .map_err(|e| db_error("seeding admin", e))?;

    tx.commit()
        .await
        .map_err(|e| db_error("committing seed transaction", e))?;

    let summary = SeedSummary {
        skills_inserted: skills.rows_affected(),
        admin_created: admin.rows_affected() > 0,
    };
    info!(
        "Seed finished: {} skills inserted, admin created: {}",
        summary.skills_inserted, summary.admin_created
    );
    Ok(summary)
}
