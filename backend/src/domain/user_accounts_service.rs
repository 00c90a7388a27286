//! Account registration and maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::error_mapping::{map_hash_error, map_user_persistence_error};
use crate::domain::ports::{
    CredentialHasher, UserAccountsCommand, UserAccountsQuery, UserRepository,
};
use crate::domain::{Error, Registration, User, UserId, UserRecord};

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Service implementing the account command and query ports.
#[derive(Clone)]
pub struct UserAccountsService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserAccountsService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> UserAccountsService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn record_for(&self, registration: &Registration) -> Result<UserRecord, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        Ok(UserRecord {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
        })
    }
}

#[async_trait]
impl<R, H> UserAccountsCommand for UserAccountsService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let record = self.record_for(registration).await?;
        let user = self
            .users
            .create(&record)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    async fn update(&self, id: UserId, registration: &Registration) -> Result<User, Error> {
        // The password is re-hashed on every update, changed or not.
        let record = self.record_for(registration).await?;
        self.users
            .update(id, &record)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(id)
            .await
            .map_err(map_user_persistence_error)?;
        if !removed {
            return Err(Error::not_found(USER_NOT_FOUND_MESSAGE));
        }
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

#[async_trait]
impl<R, H> UserAccountsQuery for UserAccountsService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}
