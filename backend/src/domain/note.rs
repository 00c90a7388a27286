//! Note model.
//!
//! Notes belong to exactly one user. The owner is fixed at creation from the
//! authenticated caller and never changes afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{TEXT_FIELD_MAX, UserId};

/// Store-generated note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier for persistence adapters.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors for note payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteValidationError {
    /// Title exceeded the column width.
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
}

/// Title and content supplied by a client when creating or editing a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    content: String,
}

impl NoteDraft {
    /// Validate a draft. Empty titles and bodies are accepted.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, NoteValidationError> {
        let title = title.into();
        if title.chars().count() > TEXT_FIELD_MAX {
            return Err(NoteValidationError::TitleTooLong {
                max: TEXT_FIELD_MAX,
            });
        }
        Ok(Self {
            title,
            content: content.into(),
        })
    }

    /// Note title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Note body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Persisted note.
///
/// ## Invariants
/// - `user_id` is the creator and never changes.
/// - `created_at` is assigned once by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Optional listing filters. Both filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Substring that must appear in the title.
    pub title_contains: Option<String>,
    /// Exact creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

impl NoteFilter {
    /// True when no filter is set and the listing covers every note.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.title_contains.is_none() && self.created_at.is_none()
    }

    /// Whether `note` satisfies every configured filter.
    ///
    /// Persistence adapters translate the filter into SQL; in-memory adapters
    /// use this predicate directly.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        let title_ok = self
            .title_contains
            .as_deref()
            .is_none_or(|needle| note.title.contains(needle));
        let created_ok = self.created_at.is_none_or(|at| note.created_at == at);
        title_ok && created_ok
    }
}
