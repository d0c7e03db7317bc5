//! # Relawan Infrastructure
//! 
//! PostgreSQL adapters for the core repository traits, migrations and seeding.

pub mod database;
pub mod seed;

pub use database::{
    create_pool, run_migrations, PgEventRepository, PgReportRepository, PgSkillRepository,
    PgUserRepository, PgVolunteerRepository,
};
pub use seed::{seed_defaults, SeedSummary};
