//! Driven port for issuing and validating bearer tokens.
use crate::domain::{AccessToken, TokenClaims, TokenTtl};

use super::define_port_error;

define_port_error! {
    /// Token service failures.
    pub enum TokenError {
        /// Signature, structure, or expiry check failed. The cause is
        /// deliberately not distinguished.
        Invalid => "token is invalid or expired",
        /// Claims could not be encoded and signed.
        Encoding { message: String } => "token encoding failed: {message}",
    }
}

pub trait TokenService: Send + Sync {
    /// Encode and sign `claims`.
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, TokenError>;

    /// Verify a presented token and return its claims.
    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Lifetime applied to freshly issued tokens.
    fn default_ttl(&self) -> TokenTtl;
}
