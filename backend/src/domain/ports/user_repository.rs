//! Driven port for user account storage.
use async_trait::async_trait;

use crate::domain::{User, UserId, UserRecord, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its generated id.
    async fn create(&self, record: &UserRecord) -> Result<User, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite every field of an account. `None` when the id is unknown.
    async fn update(
        &self,
        id: UserId,
        record: &UserRecord,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove an account and, through the store, its notes. `false` when the
    /// id is unknown.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
