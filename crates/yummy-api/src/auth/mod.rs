//! Authentication and session module
//!
//! Components:
//! - Token issuance and verification (HS256 JWT)
//! - Password and secret-word hashing with Argon2
//! - Middleware guard for protected routes
//! - Service layer for user credentials and the token blacklist

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;

pub use jwt::{decode_token, generate_token, Claims, TokenError};
pub use middleware::{auth_middleware, AuthenticatedUser};
pub use password::{hash_secret, verify_secret, PasswordError};
pub use service::{AuthService, UserRecord};
