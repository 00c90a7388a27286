//! Response bodies shared across handlers.
//!
//! Domain types stay free of OpenAPI derives where they carry more than the
//! wire shows (users hold a password digest), so the wire shapes live here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Note, User};

/// Confirmation body for mutations that return no resource.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User created successfully.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of an account. The password digest is never exposed.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}

/// Note as returned by read endpoints.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NoteResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Groceries")]
    pub title: String,
    #[schema(example = "Milk, eggs")]
    pub content: String,
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.get(),
            title: note.title,
            content: note.content,
            user_id: note.user_id.get(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
