//! # Relawan Security
//! 
//! Security utilities: JWT token pairs and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService, TokenPair, TokenSubject};
pub use password::{PasswordError, PasswordService};
