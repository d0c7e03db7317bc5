// ============================================================================
// Relawan Infrastructure - PostgreSQL User Repository
// File: crates/relawan-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use relawan_core::domain::{NewUser, User, UserProfile, UserRole};
use relawan_core::error::DomainError;
use relawan_core::repositories::UserRepository;

use super::{db_error, is_unique_violation};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: i32,
    pub nama: String,
    pub email: String,
    pub password: String,
    pub foto: Option<String>,
    pub alamat: Option<String>,
    pub role: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            nama: row.nama,
            email: row.email,
            password: row.password,
            foto: row.foto,
            alamat: row.alamat,
            role: UserRole::from_str(&row.role).unwrap_or_default(),
            access_token: row.access_token,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    pub id: i32,
    pub email: String,
    pub nama: String,
    pub foto: Option<String>,
    pub alamat: Option<String>,
    pub skills: Vec<String>,
    pub volunteer_count: i64,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile {
            id: row.id,
            email: row.email,
            nama: row.nama,
            foto: row.foto,
            alamat: row.alamat,
            skills: row.skills,
            volunteer_count: row.volunteer_count,
        }
    }
}

const USER_COLUMNS: &str = r#"
    id, nama, email, password, foto, alamat, role,
    access_token, refresh_token, created_at, updated_at
"#;

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding user by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding user by email", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &NewUser, skill_ids: &[i32]) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting user transaction", e))?;

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (nama, email, password, foto, alamat, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.nama)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.foto)
        .bind(&user.alamat)
        .bind(UserRole::User.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                db_error("creating user", e)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_skills (user_id, skill_id)
            SELECT $1, UNNEST($2::int[])
            "#,
        )
        .bind(row.id)
        .bind(skill_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("linking user skills", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing user transaction", e))?;

        info!("User created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update_tokens(
        &self,
        id: i32,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET access_token = $2, refresh_token = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating user tokens", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }

    async fn rotate_tokens(
        &self,
        id: i32,
        expected_refresh: &str,
        access_token: String,
        refresh_token: String,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET access_token = $3, refresh_token = $4, updated_at = NOW()
            WHERE id = $1 AND refresh_token = $2
            "#,
        )
        .bind(id)
        .bind(expected_refresh)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("rotating user tokens", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn skill_ids(&self, id: i32) -> Result<Vec<i32>, DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT skill_id FROM user_skills WHERE user_id = $1 ORDER BY skill_id")
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("loading user skill ids", e))
    }

    async fn skill_names(&self, id: i32) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT s.name::text
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            WHERE us.user_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading user skill names", e))
    }

    async fn find_profile(&self, id: i32) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT
                u.id, u.email, u.nama, u.foto, u.alamat,
                COALESCE(
                    (SELECT array_agg(s.name::text ORDER BY s.id)
                     FROM user_skills us
                     JOIN skills s ON s.id = us.skill_id
                     WHERE us.user_id = u.id),
                    '{}'::text[]
                ) AS skills,
                (SELECT COUNT(*) FROM volunteers v WHERE v.user_id = u.id) AS volunteer_count
            FROM users u
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("loading user profile", e))?;

        Ok(row.map(|r| r.into()))
    }
}
