//! bcrypt-backed `CredentialHasher`.

use async_trait::async_trait;
use tokio::task;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Salted bcrypt hashing at a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptCredentialHasher {
    cost: u32,
}

impl BcryptCredentialHasher {
    /// Build a hasher, rejecting work factors bcrypt would refuse.
    pub fn new(cost: u32) -> Result<Self, CredentialHashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CredentialHashError::hash(format!(
                "bcrypt cost {cost} outside {MIN_COST}..={MAX_COST}"
            )));
        }
        Ok(Self { cost })
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptCredentialHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[async_trait]
impl CredentialHasher for BcryptCredentialHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let cost = self.cost;
        let digest = task::spawn_blocking(move || bcrypt::hash(plaintext.as_bytes(), cost))
            .await
            .map_err(|err| CredentialHashError::worker(err.to_string()))?
            .map_err(|err| CredentialHashError::hash(err.to_string()))?;
        Ok(PasswordHash::new(digest))
    }

    async fn verify(
        &self,
        plaintext: &str,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHashError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let digest = digest.as_str().to_owned();
        let outcome = task::spawn_blocking(move || bcrypt::verify(plaintext.as_bytes(), &digest))
            .await
            .map_err(|err| CredentialHashError::worker(err.to_string()))?;
        match outcome {
            Ok(matches) => Ok(matches),
            Err(err) => {
                warn!(error = %err, "stored credential digest is malformed");
                Ok(false)
            }
        }
    }
}
