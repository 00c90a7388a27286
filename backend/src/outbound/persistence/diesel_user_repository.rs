//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, User, UserId, UserRecord, Username};

use super::diesel_basic_error_mapping::{is_unique_violation, map_basic_transaction_error};
use super::models::{UserRow, UserWrite};
use super::pool::{DbPool, TransactionError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: TransactionError, record: Option<&UserRecord>) -> UserPersistenceError {
    if let Some(record) = record.filter(|_| is_unique_violation(&error)) {
        debug!("username already taken");
        return UserPersistenceError::duplicate_username(record.username.as_str());
    }
    map_basic_transaction_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        UserPersistenceError::query(format!("stored username for user {} invalid: {err}", row.id))
    })?;
    let email = EmailAddress::new(&row.email).map_err(|err| {
        UserPersistenceError::query(format!("stored email for user {} invalid: {err}", row.id))
    })?;
    Ok(User::new(
        UserId::new(row.id),
        username,
        email,
        PasswordHash::new(row.hashed_password),
    ))
}

fn write_for(record: &UserRecord) -> UserWrite<'_> {
    UserWrite {
        username: record.username.as_str(),
        email: record.email.as_str(),
        hashed_password: record.password_hash.as_str(),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, record: &UserRecord) -> Result<User, UserPersistenceError> {
        let write = write_for(record);
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let row = diesel::insert_into(users::table)
                        .values(&write)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_error(err, Some(record)))?;
        row_to_user(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let row = users::table
                        .filter(users::id.eq(id.get()))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_error(err, None))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let name = username.as_str();
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let row = users::table
                        .filter(users::username.eq(name))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_error(err, None))?;
        row.map(row_to_user).transpose()
    }

    async fn update(
        &self,
        id: UserId,
        record: &UserRecord,
    ) -> Result<Option<User>, UserPersistenceError> {
        let write = write_for(record);
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let row = diesel::update(users::table.filter(users::id.eq(id.get())))
                        .set(&write)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_error(err, Some(record)))?;
        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let removed = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let removed = diesel::delete(users::table.filter(users::id.eq(id.get())))
                        .execute(conn)
                        .await?;
                    Ok(removed)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_error(err, None))?;
        Ok(removed > 0)
    }
}
