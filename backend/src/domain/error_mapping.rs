//! Mapping from driven-port failures to domain errors.

use serde_json::json;
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{
    CredentialHashError, NotePersistenceError, TokenError, UserPersistenceError,
};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("Username already registered").with_details(json!({
                "field": "username",
                "code": "duplicate_username",
            }))
        }
    }
}

pub(crate) fn map_note_persistence_error(error: NotePersistenceError) -> Error {
    match error {
        NotePersistenceError::Connection { message } => Error::service_unavailable(message),
        NotePersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_hash_error(err: CredentialHashError) -> Error {
    error!(error = %err, "credential hashing failed");
    Error::internal(err.to_string())
}

pub(crate) fn map_token_issue_error(err: TokenError) -> Error {
    error!(error = %err, "token issuance failed");
    Error::internal(err.to_string())
}
