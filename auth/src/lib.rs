//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the shop service:
//! - Password hashing (Argon2id)
//! - Signed, time-limited access tokens carrying subject and role claims
//! - Authentication coordination (verify credentials, then issue a token)
//!
//! The service defines its own ports and adapts these implementations,
//! so the library stays free of persistence and HTTP concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Role, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15)).unwrap();
//! let access = tokens.issue("user123", Role::Admin).unwrap();
//! let verified = tokens.verify(&access.token).unwrap();
//! assert_eq!(verified.subject, "user123");
//! assert_eq!(verified.role, Role::Admin);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15)).unwrap();
//! let auth = Authenticator::new(tokens);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let access = auth.authenticate("password123", &hash, "user123", Role::User).unwrap();
//!
//! // Validate token
//! let verified = auth.validate_token(&access.token).unwrap();
//! assert_eq!(verified.subject, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleError;
pub use token::AccessToken;
pub use token::TokenService;
pub use token::VerifiedClaims;
