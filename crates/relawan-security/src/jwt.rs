//! JWT token handling
//!
//! Access and refresh tokens are signed with different secrets, so a refresh
//! token can never be replayed as an access token (and vice versa).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use relawan_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected token type: {0}")]
    WrongTokenType(String),
}

/// Identity embedded in both tokens of a pair.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: i32,
    pub email: String,
    pub nama: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub nama: String,
    pub role: String,
    pub token_type: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_expiry: i64,
        refresh_expiry: i64,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn generate_access_token(&self, subject: &TokenSubject) -> Result<String, JwtError> {
        self.generate_token(subject, TOKEN_TYPE_ACCESS, self.access_token_expiry, &self.access_encoding)
    }

    pub fn generate_refresh_token(&self, subject: &TokenSubject) -> Result<String, JwtError> {
        self.generate_token(subject, TOKEN_TYPE_REFRESH, self.refresh_token_expiry, &self.refresh_encoding)
    }

    pub fn issue_pair(&self, subject: &TokenSubject) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(subject)?,
            refresh_token: self.generate_refresh_token(subject)?,
        })
    }

    fn generate_token(
        &self,
        subject: &TokenSubject,
        token_type: &str,
        expiry: i64,
        key: &EncodingKey,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            id: subject.id,
            email: subject.email.clone(),
            nama: subject.nama.clone(),
            role: subject.role.clone(),
            token_type: token_type.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
        };
        encode(&Header::default(), &claims, key).map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        Self::validate(token, TOKEN_TYPE_ACCESS, &self.access_decoding)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        Self::validate(token, TOKEN_TYPE_REFRESH, &self.refresh_decoding)
    }

    fn validate(token: &str, expected_type: &str, key: &DecodingKey) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })?;

        if claims.token_type != expected_type {
            return Err(JwtError::WrongTokenType(claims.token_type));
        }
        Ok(claims)
    }
}
