//! Notes API handlers.
//!
//! ```text
//! POST /notes/ {"title":"Groceries","content":"Milk"}   (bearer)
//! GET /notes/1
//! PUT /notes/1 {"title":"Groceries","content":"Eggs"}   (bearer, owner)
//! DELETE /notes/1                                        (bearer, owner)
//! GET /notes?title=groc&created_at=2024-05-01T12:00:00Z
//! ```
//!
//! Mutations are scoped to the caller: a note owned by someone else is
//! reported exactly like a missing one.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NoteDraft, NoteFilter, NoteId, NoteValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::{MessageResponse, NoteResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, field_error, parse_timestamp};

pub const NOTE_UPDATED_MESSAGE: &str = "Note updated successfully.";
pub const NOTE_DELETED_MESSAGE: &str = "Note deleted successfully.";

const CREATED_AT_FIELD: FieldName = FieldName::new("created_at");

/// Note body for `POST /notes/` and `PUT /notes/{id}`.
///
/// The owner always comes from the bearer token; a `user_id` in the body is
/// ignored.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct NoteRequest {
    #[schema(max_length = 256)]
    pub title: String,
    pub content: String,
}

impl TryFrom<NoteRequest> for NoteDraft {
    type Error = NoteValidationError;

    fn try_from(value: NoteRequest) -> Result<Self, Self::Error> {
        Self::new(value.title, value.content)
    }
}

fn map_note_validation_error(err: NoteValidationError) -> Error {
    match err {
        NoteValidationError::TitleTooLong { .. } => {
            field_error("title", "title_too_long", err.to_string())
        }
    }
}

/// Body returned by `POST /notes/`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NoteCreatedResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Listing filters for `GET /notes`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NoteListQuery {
    /// Case-sensitive substring of the title. Empty means no filter.
    pub title: Option<String>,
    /// Exact creation instant, RFC 3339.
    pub created_at: Option<String>,
}

impl NoteListQuery {
    fn into_filter(self) -> Result<NoteFilter, Error> {
        let created_at = self
            .created_at
            .as_deref()
            .map(|raw| parse_timestamp(raw, CREATED_AT_FIELD))
            .transpose()?;
        Ok(NoteFilter {
            title_contains: self.title.filter(|title| !title.is_empty()),
            created_at,
        })
    }
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/notes/",
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note created", body = NoteCreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "createNote",
    security(("BearerAuth" = []))
)]
#[post("/notes/")]
pub async fn create_note(
    state: web::Data<HttpState>,
    caller: CurrentUser,
    payload: web::Json<NoteRequest>,
) -> ApiResult<web::Json<NoteCreatedResponse>> {
    let draft = NoteDraft::try_from(payload.into_inner()).map_err(map_note_validation_error)?;
    let note = state.notes.create(caller.0.id(), &draft).await?;
    Ok(web::Json(NoteCreatedResponse {
        id: note.id.get(),
        title: note.title,
        content: note.content,
    }))
}

/// Fetch a note. Reads are not owner-scoped.
#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note", body = NoteResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Note not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "getNote",
    security([])
)]
#[get("/notes/{id}")]
pub async fn get_note(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NoteResponse>> {
    let note = state.notes_query.get(NoteId::new(path.into_inner())).await?;
    Ok(web::Json(NoteResponse::from(note)))
}

/// Replace the title and content of one of the caller's notes.
#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Note not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "updateNote",
    security(("BearerAuth" = []))
)]
#[put("/notes/{id}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    caller: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<NoteRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let draft = NoteDraft::try_from(payload.into_inner()).map_err(map_note_validation_error)?;
    state
        .notes
        .update(caller.0.id(), NoteId::new(path.into_inner()), &draft)
        .await?;
    Ok(web::Json(MessageResponse::new(NOTE_UPDATED_MESSAGE)))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Note not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote",
    security(("BearerAuth" = []))
)]
#[delete("/notes/{id}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    caller: CurrentUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .notes
        .delete(caller.0.id(), NoteId::new(path.into_inner()))
        .await?;
    Ok(web::Json(MessageResponse::new(NOTE_DELETED_MESSAGE)))
}

/// List notes, optionally filtered by title substring and creation instant.
#[utoipa::path(
    get,
    path = "/notes",
    params(NoteListQuery),
    responses(
        (status = 200, description = "Matching notes", body = [NoteResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No notes found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "listNotes",
    security([])
)]
#[get("/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    query: web::Query<NoteListQuery>,
) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let filter = query.into_inner().into_filter()?;
    let notes = state.notes_query.list(&filter).await?;
    Ok(web::Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
