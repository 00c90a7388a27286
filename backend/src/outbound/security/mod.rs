//! Credential hashing and bearer token adapters.
//!
//! - **bcrypt_hasher**: `CredentialHasher` over `bcrypt`, run on the blocking pool.
//! - **jwt_token_service**: HS256 `TokenService` over `jsonwebtoken`.
//! - **signing_secret**: loads the token signing key from a mounted file.

mod bcrypt_hasher;
mod jwt_token_service;
pub mod signing_secret;

pub use bcrypt_hasher::BcryptCredentialHasher;
pub use jwt_token_service::JwtTokenService;
pub use signing_secret::{BuildMode, SecretConfigError, SigningSecret, signing_secret_from_env};
