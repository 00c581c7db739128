//! Authentication utilities library
//!
//! Provides the authentication building blocks used by the Chirpy service:
//! - Password hashing (bcrypt)
//! - Session token (HS256 JWT) issuance and validation
//! - Opaque refresh token generation
//! - `Authorization` header parsing (`Bearer` and `ApiKey` schemes)
//!
//! Nothing here depends on a web framework beyond `http::HeaderMap`; callers
//! translate the typed errors into responses.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"s3cret");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.validate(&token).unwrap(), user_id);
//! assert!(JwtHandler::new(b"wrong").validate(&token).is_err());
//! ```
//!
//! ## Authorization Header
//! ```
//! use auth::extract_bearer_token;
//! use http::header::AUTHORIZATION;
//! use http::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, "Bearer abc123".parse().unwrap());
//! assert_eq!(extract_bearer_token(&headers).unwrap(), "abc123");
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::constant_time_eq;
pub use header::extract_api_key;
pub use header::extract_bearer_token;
pub use header::HeaderError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
