// ============================================================================
// Relawan Core - User Entity
// File: crates/relawan-core/src/domain/user.rs
// ============================================================================

use chrono::{DateTime, Utc};
use relawan_security::TokenSubject;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::User => "User",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(UserRole::Admin),
            "User" => Some(UserRole::User),
            _ => None,
        }
    }
}

/// User entity. The currently valid token pair is kept on the row, so
/// issuing a new pair or clearing it revokes the previous tokens.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub nama: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub foto: Option<String>,
    pub alamat: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id,
            email: self.email.clone(),
            nama: self.nama.clone(),
            role: self.role.as_str().to_string(),
        }
    }

    pub fn holds_access_token(&self, token: &str) -> bool {
        self.access_token.as_deref() == Some(token)
    }

    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

/// Registration payload, before hashing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 100, message = "Nama is required"))]
    pub nama: String,

    #[validate(email(message = "Email format is invalid"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,

    pub alamat: Option<String>,
    pub foto: Option<String>,
}

impl NewUser {
    /// Trims text fields and lowercases the email.
    pub fn normalized(mut self) -> Self {
        self.nama = self.nama.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.alamat = self
            .alamat
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        self
    }
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub nama: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nama: user.nama.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub nama: String,
    pub foto: Option<String>,
    pub alamat: Option<String>,
    pub skills: Vec<String>,
    pub volunteer_count: i64,
}
