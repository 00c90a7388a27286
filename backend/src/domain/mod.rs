//! Domain primitives, ports, and services.
//!
//! Purpose: define the account and note model, the error payload shared by
//! every adapter, and the services implementing the driving ports. Nothing
//! in this module knows about HTTP, SQL, bcrypt, or JWT.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - User, Note and their value types.
//! - LoginCredentials, Registration: validated inbound payloads.
//! - TokenClaims, TokenTtl, AccessToken: bearer token values.
//! - AuthService, UserAccountsService, NotesService: use-case services.

pub mod auth;
pub mod auth_service;
pub mod error;
mod error_mapping;
pub mod note;
pub mod notes_service;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;
pub mod user_accounts_service;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, Registration,
    RegistrationValidationError,
};
pub use self::auth_service::{
    AuthService, INCORRECT_CREDENTIALS_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::note::{Note, NoteDraft, NoteFilter, NoteId, NoteValidationError};
pub use self::notes_service::{
    NO_NOTES_FOR_USER_MESSAGE, NO_NOTES_MESSAGE, NOTE_NOT_FOUND_MESSAGE, NotesService,
};
pub use self::token::{AccessToken, DEFAULT_TOKEN_TTL_MINUTES, TokenClaims, TokenTtl, ZeroTokenTtl};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHash, TEXT_FIELD_MAX, User, UserId, UserRecord, UserValidationError,
    Username,
};
pub use self::user_accounts_service::{USER_NOT_FOUND_MESSAGE, UserAccountsService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Note not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
