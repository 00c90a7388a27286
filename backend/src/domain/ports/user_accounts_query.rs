//! Driving port for account lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait UserAccountsQuery: Send + Sync {
    /// Fetch one account or fail with `NotFound`.
    async fn get(&self, id: UserId) -> Result<User, Error>;
}
