//! Driving port for public note reads.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteFilter, NoteId, UserId};

#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Fetch any note by id.
    async fn get(&self, id: NoteId) -> Result<Note, Error>;

    /// Notes owned by `owner`; an empty result is `NotFound`.
    async fn list_by_user(&self, owner: UserId) -> Result<Vec<Note>, Error>;

    /// Notes matching `filter`; an empty result is `NotFound`.
    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, Error>;
}
