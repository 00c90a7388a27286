//! Driven port for note storage.
//!
//! Mutations take the caller's id and fold the ownership check into the
//! statement itself, so a note owned by someone else is indistinguishable
//! from a missing one.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Note, NoteDraft, NoteFilter, NoteId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
    }
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note owned by `owner`.
    async fn create(&self, owner: UserId, draft: &NoteDraft) -> Result<Note, NotePersistenceError>;

    /// Fetch a note regardless of owner.
    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NotePersistenceError>;

    /// Overwrite title and content where `id` and `owner` both match.
    async fn update_owned(
        &self,
        id: NoteId,
        owner: UserId,
        draft: &NoteDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, NotePersistenceError>;

    /// Delete where `id` and `owner` both match. `false` when nothing matched.
    async fn delete_owned(&self, id: NoteId, owner: UserId) -> Result<bool, NotePersistenceError>;

    /// Every note owned by `owner`, ordered by id.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError>;

    /// Notes matching `filter`, ordered by id.
    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, NotePersistenceError>;
}
