//! HS256 JWT `TokenService`.
//!
//! Tokens carry `sub` (username) and `exp` (epoch seconds) only. Expiry is
//! checked against the injected clock rather than the system time so tests
//! can move time forward.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::signing_secret::SigningSecret;
use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, TokenClaims, TokenTtl};

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    exp: i64,
}

/// Signs and verifies bearer tokens with a symmetric secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TokenTtl,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &SigningSecret, ttl: TokenTtl, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, TokenError> {
        let wire = WireClaims {
            sub: claims.subject().to_owned(),
            exp: claims.expires_at().timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::encoding(err.to_string()))
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            debug!(kind = ?err.kind(), "token failed verification");
            TokenError::Invalid
        })?;
        let expires_at = DateTime::<Utc>::from_timestamp(data.claims.exp, 0).ok_or_else(|| {
            debug!(exp = data.claims.exp, "token expiry out of range");
            TokenError::Invalid
        })?;
        let claims = TokenClaims::new(data.claims.sub, expires_at);
        if claims.is_expired_at(self.clock.utc()) {
            debug!(%expires_at, "token expired");
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }

    fn default_ttl(&self) -> TokenTtl {
        self.ttl
    }
}
