//! Bearer token values.
//!
//! Tokens are never persisted. A token proves the holder authenticated as
//! `subject` and stays valid until `expires_at`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Default bearer token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: u32 = 30;

/// Validation error for [`TokenTtl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token lifetime must be at least one minute")]
pub struct ZeroTokenTtl;

/// Token lifetime in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl(u32);

impl TokenTtl {
    /// Build a lifetime from a non-zero number of minutes.
    pub fn from_minutes(minutes: u32) -> Result<Self, ZeroTokenTtl> {
        if minutes == 0 {
            return Err(ZeroTokenTtl);
        }
        Ok(Self(minutes))
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self(DEFAULT_TOKEN_TTL_MINUTES)
    }
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    subject: String,
    expires_at: DateTime<Utc>,
}

impl TokenClaims {
    pub fn new(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            expires_at,
        }
    }

    /// Claims for `subject` that expire `ttl` after `now`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{TokenClaims, TokenTtl};
    /// use chrono::{Duration, Utc};
    ///
    /// let now = Utc::now();
    /// let claims = TokenClaims::expiring_in("alice", TokenTtl::default(), now);
    /// assert_eq!(claims.expires_at() - now, Duration::minutes(30));
    /// ```
    pub fn expiring_in(subject: impl Into<String>, ttl: TokenTtl, now: DateTime<Utc>) -> Self {
        Self::new(subject, now + ttl.as_duration())
    }

    /// Username the token was issued to.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the claims are expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Encoded bearer token returned to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
