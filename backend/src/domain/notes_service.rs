//! Note use-cases.
//!
//! Mutations are owner-filtered in the repository so "not yours" and "does
//! not exist" are the same `NotFound`. Reads are public.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::error_mapping::map_note_persistence_error;
use crate::domain::ports::{NoteRepository, NotesCommand, NotesQuery};
use crate::domain::{Error, Note, NoteDraft, NoteFilter, NoteId, UserId};

pub const NOTE_NOT_FOUND_MESSAGE: &str = "Note not found";
pub const NO_NOTES_FOR_USER_MESSAGE: &str = "No notes found for this user";
pub const NO_NOTES_MESSAGE: &str = "No notes found";

/// Service implementing the note command and query ports.
#[derive(Clone)]
pub struct NotesService<R> {
    notes: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> NotesService<R> {
    pub fn new(notes: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { notes, clock }
    }
}

fn non_empty(notes: Vec<Note>, message: &'static str) -> Result<Vec<Note>, Error> {
    if notes.is_empty() {
        return Err(Error::not_found(message));
    }
    Ok(notes)
}

#[async_trait]
impl<R> NotesCommand for NotesService<R>
where
    R: NoteRepository,
{
    async fn create(&self, caller: UserId, draft: &NoteDraft) -> Result<Note, Error> {
        let note = self
            .notes
            .create(caller, draft)
            .await
            .map_err(map_note_persistence_error)?;
        info!(note_id = %note.id, user_id = %caller, "created note");
        Ok(note)
    }

    async fn update(&self, caller: UserId, id: NoteId, draft: &NoteDraft) -> Result<Note, Error> {
        let updated = self
            .notes
            .update_owned(id, caller, draft, self.clock.utc())
            .await
            .map_err(map_note_persistence_error)?;
        updated.ok_or_else(|| {
            debug!(note_id = %id, user_id = %caller, "update matched no owned note");
            Error::not_found(NOTE_NOT_FOUND_MESSAGE)
        })
    }

    async fn delete(&self, caller: UserId, id: NoteId) -> Result<(), Error> {
        let removed = self
            .notes
            .delete_owned(id, caller)
            .await
            .map_err(map_note_persistence_error)?;
        if !removed {
            debug!(note_id = %id, user_id = %caller, "delete matched no owned note");
            return Err(Error::not_found(NOTE_NOT_FOUND_MESSAGE));
        }
        info!(note_id = %id, user_id = %caller, "deleted note");
        Ok(())
    }
}

#[async_trait]
impl<R> NotesQuery for NotesService<R>
where
    R: NoteRepository,
{
    async fn get(&self, id: NoteId) -> Result<Note, Error> {
        self.notes
            .find_by_id(id)
            .await
            .map_err(map_note_persistence_error)?
            .ok_or_else(|| Error::not_found(NOTE_NOT_FOUND_MESSAGE))
    }

    async fn list_by_user(&self, owner: UserId) -> Result<Vec<Note>, Error> {
        let notes = self
            .notes
            .list_by_owner(owner)
            .await
            .map_err(map_note_persistence_error)?;
        non_empty(notes, NO_NOTES_FOR_USER_MESSAGE)
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, Error> {
        let notes = self
            .notes
            .list(filter)
            .await
            .map_err(map_note_persistence_error)?;
        non_empty(notes, NO_NOTES_MESSAGE)
    }
}

#[cfg(test)]
#[path = "notes_service_tests.rs"]
mod tests;
