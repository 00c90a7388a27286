//! Driving port for note mutations.
//!
//! Every operation takes the authenticated caller; the owner of a new note
//! is always the caller and never comes from the request body.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteDraft, NoteId, UserId};

#[async_trait]
pub trait NotesCommand: Send + Sync {
    async fn create(&self, caller: UserId, draft: &NoteDraft) -> Result<Note, Error>;

    /// Edit a note the caller owns. Foreign and missing notes are both
    /// `NotFound`.
    async fn update(&self, caller: UserId, id: NoteId, draft: &NoteDraft) -> Result<Note, Error>;

    /// Delete a note the caller owns. Foreign and missing notes are both
    /// `NotFound`.
    async fn delete(&self, caller: UserId, id: NoteId) -> Result<(), Error>;
}
