//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, NotePersistenceError, NoteRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Note, NoteDraft, NoteFilter, NoteId, PasswordHash, User, UserId, UserRecord, Username,
};

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock pinned to 2024-05-01T12:00:00Z.
    pub fn fixed() -> Self {
        let now = match Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single() {
            Some(now) => now,
            None => panic!("fixed clock timestamp is ambiguous"),
        };
        Self::new(now)
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

const FAKE_DIGEST_PREFIX: &str = "fake-digest:";

/// Reversible stand-in for the bcrypt hasher. Never use outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeCredentialHasher;

#[async_trait]
impl CredentialHasher for FakeCredentialHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError> {
        Ok(PasswordHash::new(format!("{FAKE_DIGEST_PREFIX}{plaintext}")))
    }

    async fn verify(
        &self,
        plaintext: &str,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHashError> {
        Ok(digest
            .as_str()
            .strip_prefix(FAKE_DIGEST_PREFIX)
            .is_some_and(|stored| stored == plaintext))
    }
}

#[derive(Default)]
struct StoreState {
    next_user_id: i64,
    next_note_id: i64,
    users: BTreeMap<i64, User>,
    notes: BTreeMap<i64, Note>,
    unavailable: bool,
}

/// In-memory users and notes with the same observable rules as the
/// PostgreSQL adapters: unique usernames, owner-filtered mutations, cascade
/// on user delete, id-ordered listings.
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Stored digest for `username`, for asserting on what was persisted.
    pub fn stored_digest(&self, username: &str) -> Option<PasswordHash> {
        self.lock()
            .users
            .values()
            .find(|user| user.username().as_str() == username)
            .map(|user| user.password_hash().clone())
    }

    pub fn note_count(&self) -> usize {
        self.lock().notes.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("store mutex"),
        }
    }

    fn checked<E>(&self, unavailable: impl FnOnce() -> E) -> Result<MutexGuard<'_, StoreState>, E> {
        let state = self.lock();
        if state.unavailable {
            return Err(unavailable());
        }
        Ok(state)
    }

    fn user_gate(&self) -> Result<MutexGuard<'_, StoreState>, UserPersistenceError> {
        self.checked(|| UserPersistenceError::connection("store unavailable"))
    }

    fn note_gate(&self) -> Result<MutexGuard<'_, StoreState>, NotePersistenceError> {
        self.checked(|| NotePersistenceError::connection("store unavailable"))
    }
}

fn username_taken(state: &StoreState, username: &Username, except: Option<i64>) -> bool {
    state
        .users
        .iter()
        .any(|(id, user)| Some(*id) != except && user.username() == username)
}

fn user_from_record(id: i64, record: &UserRecord) -> User {
    User::new(
        UserId::new(id),
        record.username.clone(),
        record.email.clone(),
        record.password_hash.clone(),
    )
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, record: &UserRecord) -> Result<User, UserPersistenceError> {
        let mut state = self.user_gate()?;
        if username_taken(&state, &record.username, None) {
            return Err(UserPersistenceError::duplicate_username(
                record.username.as_str(),
            ));
        }
        state.next_user_id += 1;
        let id = state.next_user_id;
        let user = user_from_record(id, record);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.user_gate()?.users.get(&id.get()).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.user_gate()?;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn update(
        &self,
        id: UserId,
        record: &UserRecord,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.user_gate()?;
        if !state.users.contains_key(&id.get()) {
            return Ok(None);
        }
        if username_taken(&state, &record.username, Some(id.get())) {
            return Err(UserPersistenceError::duplicate_username(
                record.username.as_str(),
            ));
        }
        let user = user_from_record(id.get(), record);
        state.users.insert(id.get(), user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.user_gate()?;
        if state.users.remove(&id.get()).is_none() {
            return Ok(false);
        }
        state.notes.retain(|_, note| note.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn create(&self, owner: UserId, draft: &NoteDraft) -> Result<Note, NotePersistenceError> {
        let mut state = self.note_gate()?;
        if !state.users.contains_key(&owner.get()) {
            return Err(NotePersistenceError::query("owner does not exist"));
        }
        state.next_note_id += 1;
        let note = Note {
            id: NoteId::new(state.next_note_id),
            title: draft.title().to_owned(),
            content: draft.content().to_owned(),
            user_id: owner,
            created_at: self.clock.utc(),
            updated_at: None,
        };
        state.notes.insert(note.id.get(), note.clone());
        Ok(note)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NotePersistenceError> {
        Ok(self.note_gate()?.notes.get(&id.get()).cloned())
    }

    async fn update_owned(
        &self,
        id: NoteId,
        owner: UserId,
        draft: &NoteDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let mut state = self.note_gate()?;
        let Some(note) = state
            .notes
            .get_mut(&id.get())
            .filter(|note| note.user_id == owner)
        else {
            return Ok(None);
        };
        note.title = draft.title().to_owned();
        note.content = draft.content().to_owned();
        note.updated_at = Some(updated_at);
        Ok(Some(note.clone()))
    }

    async fn delete_owned(&self, id: NoteId, owner: UserId) -> Result<bool, NotePersistenceError> {
        let mut state = self.note_gate()?;
        let owned = state
            .notes
            .get(&id.get())
            .is_some_and(|note| note.user_id == owner);
        if owned {
            state.notes.remove(&id.get());
        }
        Ok(owned)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let state = self.note_gate()?;
        Ok(state
            .notes
            .values()
            .filter(|note| note.user_id == owner)
            .cloned()
            .collect())
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, NotePersistenceError> {
        let state = self.note_gate()?;
        Ok(state
            .notes
            .values()
            .filter(|note| filter.matches(note))
            .cloned()
            .collect())
    }
}
