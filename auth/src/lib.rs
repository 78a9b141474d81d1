//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the user service:
//! - Hybrid password hashing (legacy BCrypt verification, Argon2id encoding)
//! - Hash format classification driving the lazy BCrypt -> Argon2id migration
//! - JWT token generation and validation
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashFormat, HybridPasswordHasher};
//!
//! let hasher = HybridPasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert_eq!(HashFormat::classify(&hash), HashFormat::Argon2id);
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.needs_upgrade(&hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user("alice", "admin", 24);
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.role, "admin");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password (always Argon2id)
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_user("alice", "user", 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashFormat;
pub use password::HybridPasswordHasher;
pub use password::PasswordError;
