//! Driven port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures of the hashing primitive itself.
    pub enum CredentialHashError {
        /// The algorithm rejected its input or parameters.
        Hash { message: String } => "credential hashing failed: {message}",
        /// The worker running the computation did not complete.
        Worker { message: String } => "credential hashing worker failed: {message}",
    }
}

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted digest of `plaintext`. Each call uses a fresh salt.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Check `plaintext` against a stored digest.
    ///
    /// A malformed digest verifies as `false` rather than erroring.
    async fn verify(
        &self,
        plaintext: &str,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHashError>;
}
