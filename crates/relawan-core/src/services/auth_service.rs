// ============================================================================
// Relawan Core - Authentication Service
// File: crates/relawan-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with login, register, and token lifecycle

use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use relawan_security::{JwtService, PasswordService, TokenPair};
use relawan_shared::utils::mask_email;

use crate::domain::{parse_skill_ids, AuthUser, NewUser, User, UserProfile};
use crate::error::DomainError;
use crate::repositories::{SkillRepository, UserRepository};
use super::ensure_skills_exist;

/// Authentication service for login/register flows and token rotation
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    skills: Arc<dyn SkillRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        skills: Arc<dyn SkillRepository>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self { users, skills, jwt }
    }

    /// Login with email and password
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginResult, DomainError> {
        let email = identifier.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError(
                "Identifier and password are required".to_string(),
            ));
        }
        info!("Login attempt for email: {}", mask_email(&email));

        // 1. Find user by email
        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", mask_email(&email));
            DomainError::UserNotFound
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password)
            .map_err(|_e| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Issue and store a fresh token pair
        let tokens = self.issue_and_store(&user).await?;

        info!("Login successful for user {}", user.id);
        Ok(LoginResult {
            user_id: user.id,
            email: user.email,
            tokens,
        })
    }

    /// Register a new user and sign them in
    pub async fn register(&self, new_user: NewUser, skills: &str) -> Result<TokenPair, DomainError> {
        let new_user = new_user.normalized();
        new_user.validate()?;
        info!("Registration attempt for email: {}", mask_email(&new_user.email));

        // 1. Check if email already exists
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&new_user.email));
            return Err(DomainError::EmailAlreadyExists(new_user.email));
        }

        // 2. Skills must be well-formed and known
        let skill_ids = parse_skill_ids(skills)?;
        ensure_skills_exist(self.skills.as_ref(), &skill_ids).await?;

        // 3. Hash password
        let password_hash = PasswordService::hash(&new_user.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 4. Persist user and skill links
        let user = self
            .users
            .create(&NewUser { password: password_hash, ..new_user }, &skill_ids)
            .await?;

        let tokens = self.issue_and_store(&user).await?;
        info!("Registration successful for user {}", user.id);
        Ok(tokens)
    }

    /// Exchanges a valid refresh token for a new pair. The presented refresh
    /// token stops being accepted once the new pair is stored.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        if refresh_token.trim().is_empty() {
            return Err(DomainError::ValidationError("Refresh token is required".to_string()));
        }

        let claims = self.jwt.validate_refresh_token(refresh_token).map_err(|e| {
            warn!("Refresh rejected: {}", e);
            DomainError::InvalidToken
        })?;

        let user = self
            .users
            .find_by_id(claims.id)
            .await?
            .ok_or(DomainError::InvalidToken)?;

        if !user.holds_refresh_token(refresh_token) {
            warn!("Refresh rejected: stale refresh token for user {}", user.id);
            return Err(DomainError::InvalidToken);
        }

        let tokens = self
            .jwt
            .issue_pair(&user.token_subject())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        let rotated = self
            .users
            .rotate_tokens(
                user.id,
                refresh_token,
                tokens.access_token.clone(),
                tokens.refresh_token.clone(),
            )
            .await?;
        if !rotated {
            warn!("Refresh rejected: token already rotated for user {}", user.id);
            return Err(DomainError::InvalidToken);
        }

        info!("Token pair rotated for user {}", user.id);
        Ok(tokens)
    }

    pub async fn logout(&self, user_id: i32) -> Result<(), DomainError> {
        self.users.update_tokens(user_id, None, None).await?;
        info!("User {} logged out", user_id);
        Ok(())
    }

    /// Resolves a bearer access token to the user it belongs to. The token
    /// must still be the one stored for the user.
    pub async fn authenticate(&self, access_token: &str) -> Result<AuthUser, DomainError> {
        let claims = self.jwt.validate_access_token(access_token).map_err(|e| {
            debug!("Access token rejected: {}", e);
            DomainError::InvalidToken
        })?;

        let user = self
            .users
            .find_by_id(claims.id)
            .await?
            .ok_or(DomainError::InvalidToken)?;

        if !user.holds_access_token(access_token) {
            return Err(DomainError::InvalidToken);
        }

        Ok(AuthUser::from(&user))
    }

    pub async fn current_user_skills(&self, user_id: i32) -> Result<Vec<String>, DomainError> {
        self.users.skill_names(user_id).await
    }

    pub async fn profile(&self, user_id: i32) -> Result<UserProfile, DomainError> {
        self.users
            .find_profile(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    async fn issue_and_store(&self, user: &User) -> Result<TokenPair, DomainError> {
        let tokens = self
            .jwt
            .issue_pair(&user.token_subject())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        self.users
            .update_tokens(
                user.id,
                Some(tokens.access_token.clone()),
                Some(tokens.refresh_token.clone()),
            )
            .await?;

        Ok(tokens)
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: i32,
    pub email: String,
    pub tokens: TokenPair,
}
