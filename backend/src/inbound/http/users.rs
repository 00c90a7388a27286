//! Users API handlers.
//!
//! ```text
//! POST /users/ {"username":"alice","email":"alice@x.com","password":"password1"}
//! GET /users/1
//! PUT /users/1 {"username":"alice","email":"alice@y.com","password":"password2"}
//! DELETE /users/1
//! GET /users/1/notes
//! ```
//!
//! Account routes are unauthenticated.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Error, Registration, RegistrationValidationError, UserId, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{MessageResponse, NoteResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

pub const USER_CREATED_MESSAGE: &str = "User created successfully.";
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully.";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully.";

/// Account body for `POST /users/` and `PUT /users/{id}`.
///
/// Example JSON:
/// `{"username":"alice","email":"alice@x.com","password":"password1"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    /// At least eight characters.
    #[schema(min_length = 8)]
    pub password: String,
}

impl TryFrom<UserRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    let code = match &err {
        RegistrationValidationError::User(UserValidationError::EmptyUsername) => "empty_username",
        RegistrationValidationError::User(UserValidationError::UsernameTooLong { .. }) => {
            "username_too_long"
        }
        RegistrationValidationError::User(UserValidationError::EmptyEmail) => "empty_email",
        RegistrationValidationError::User(UserValidationError::EmailTooLong { .. }) => {
            "email_too_long"
        }
        RegistrationValidationError::User(UserValidationError::InvalidEmail) => "invalid_email",
        RegistrationValidationError::PasswordTooShort { .. } => "password_too_short",
    };
    field_error(err.field(), code, err.to_string())
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already registered", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_error)?;
    state.accounts.register(&registration).await?;
    Ok(web::Json(MessageResponse::new(USER_CREATED_MESSAGE)))
}

/// Fetch an account's public fields.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::get_user;
///
/// let app = App::new().service(get_user);
/// ```
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .accounts_query
        .get(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Overwrite an account's username, email, and password.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 409, description = "Username already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security([])
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_error)?;
    state
        .accounts
        .update(UserId::new(path.into_inner()), &registration)
        .await?;
    Ok(web::Json(MessageResponse::new(USER_UPDATED_MESSAGE)))
}

/// Delete an account together with its notes.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security([])
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.accounts.delete(UserId::new(path.into_inner())).await?;
    Ok(web::Json(MessageResponse::new(USER_DELETED_MESSAGE)))
}

/// List the notes owned by a user.
#[utoipa::path(
    get,
    path = "/users/{id}/notes",
    params(("id" = i64, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Notes owned by the user", body = [NoteResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No notes found for this user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "listUserNotes",
    security([])
)]
#[get("/users/{id}/notes")]
pub async fn list_user_notes(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let notes = state
        .notes_query
        .list_by_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(notes.into_iter().map(NoteResponse::from).collect()))
}
