//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::{NewUser, User, UserProfile};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Inserts the user (with an already hashed password) and links the given
    /// skills in one transaction.
    async fn create(&self, user: &NewUser, skill_ids: &[i32]) -> Result<User, DomainError>;

    /// Replaces the stored token pair; `None` clears it.
    async fn update_tokens(
        &self,
        id: i32,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<(), DomainError>;

    /// Stores a new pair only while `expected_refresh` is still the stored
    /// refresh token. Returns `false` when another rotation got there first.
    async fn rotate_tokens(
        &self,
        id: i32,
        expected_refresh: &str,
        access_token: String,
        refresh_token: String,
    ) -> Result<bool, DomainError>;

    async fn skill_ids(&self, id: i32) -> Result<Vec<i32>, DomainError>;
    async fn skill_names(&self, id: i32) -> Result<Vec<String>, DomainError>;
    async fn find_profile(&self, id: i32) -> Result<Option<UserProfile>, DomainError>;
}
