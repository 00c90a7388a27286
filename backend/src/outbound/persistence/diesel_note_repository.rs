//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.
//!
//! Owner-scoped mutations put `user_id = caller` in the same `WHERE` clause
//! as the id, so a foreign note simply matches no row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{Note, NoteDraft, NoteFilter, NoteId, UserId};

use super::diesel_basic_error_mapping::map_basic_transaction_error;
use super::models::{NewNoteRow, NoteRow, NoteUpdate};
use super::pool::{DbPool, TransactionError};
use super::schema::notes;

/// Diesel-backed implementation of the `NoteRepository` port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: TransactionError) -> NotePersistenceError {
    map_basic_transaction_error(
        error,
        NotePersistenceError::query,
        NotePersistenceError::connection,
    )
}

fn row_to_note(row: NoteRow) -> Note {
    Note {
        id: NoteId::new(row.id),
        title: row.title,
        content: row.content,
        user_id: UserId::new(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Escape `LIKE` metacharacters so the title filter is a literal substring.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn create(&self, owner: UserId, draft: &NoteDraft) -> Result<Note, NotePersistenceError> {
        let new_row = NewNoteRow {
            title: draft.title(),
            content: draft.content(),
            user_id: owner.get(),
        };
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let row = diesel::insert_into(notes::table)
                        .values(&new_row)
                        .returning(NoteRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        Ok(row_to_note(row))
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NotePersistenceError> {
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let row = notes::table
                        .filter(notes::id.eq(id.get()))
                        .select(NoteRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        Ok(row.map(row_to_note))
    }

    async fn update_owned(
        &self,
        id: NoteId,
        owner: UserId,
        draft: &NoteDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let changes = NoteUpdate {
            title: draft.title(),
            content: draft.content(),
            updated_at,
        };
        let row = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let target = notes::table
                        .filter(notes::id.eq(id.get()))
                        .filter(notes::user_id.eq(owner.get()));
                    let row = diesel::update(target)
                        .set(&changes)
                        .returning(NoteRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        Ok(row.map(row_to_note))
    }

    async fn delete_owned(&self, id: NoteId, owner: UserId) -> Result<bool, NotePersistenceError> {
        let removed = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let target = notes::table
                        .filter(notes::id.eq(id.get()))
                        .filter(notes::user_id.eq(owner.get()));
                    let removed = diesel::delete(target).execute(conn).await?;
                    Ok(removed)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        Ok(removed > 0)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let rows = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let rows: Vec<NoteRow> = notes::table
                        .filter(notes::user_id.eq(owner.get()))
                        .order_by(notes::id.asc())
                        .select(NoteRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(rows)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        Ok(rows.into_iter().map(row_to_note).collect())
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, NotePersistenceError> {
        let title_pattern = filter.title_contains.as_deref().map(like_pattern);
        let created_at = filter.created_at;
        let rows = self
            .pool
            .with_transaction(|conn| {
                async move {
                    let mut query = notes::table
                        .select(NoteRow::as_select())
                        .order_by(notes::id.asc())
                        .into_boxed::<Pg>();
                    if let Some(pattern) = title_pattern {
                        query = query.filter(notes::title.like(pattern));
                    }
                    if let Some(at) = created_at {
                        query = query.filter(notes::created_at.eq(at));
                    }
                    let rows: Vec<NoteRow> = query.load(conn).await?;
                    Ok(rows)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        Ok(rows.into_iter().map(row_to_note).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("groc", "%groc%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("back\\slash", "%back\\\\slash%")]
    #[case("", "%%")]
    fn like_pattern_escapes_metacharacters(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(needle), expected);
    }

    #[rstest]
    fn row_conversion_keeps_timestamps() {
        let created_at = Utc::now();
        let note = row_to_note(NoteRow {
            id: 5,
            title: "t".to_owned(),
            content: "c".to_owned(),
            user_id: 2,
            created_at,
            updated_at: None,
        });
        assert_eq!(note.id, NoteId::new(5));
        assert_eq!(note.user_id, UserId::new(2));
        assert_eq!(note.created_at, created_at);
        assert!(note.updated_at.is_none());
    }
}
