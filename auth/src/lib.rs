//! Authentication utilities library
//!
//! Provides the authentication building blocks used by the HTTP service:
//! - Password hashing (Argon2id)
//! - Access token issuance and verification (HS256 JWT)
//! - Opaque refresh token generation
//! - `Authorization` header parsing (`Bearer` and `ApiKey` schemes)
//! - Static API key comparison
//!
//! Everything here is synchronous and free of I/O; persistence of refresh
//! tokens belongs to the service.
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
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Header Parsing
//! ```
//! use auth::header;
//!
//! let token = header::extract(Some("Bearer   abc  "), header::BEARER).unwrap();
//! assert_eq!(token, "abc");
//! ```

pub mod api_key;
pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use api_key::ApiKey;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::HeaderError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
