//! Tests for the notes service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::UserRepository;
use crate::domain::{EmailAddress, ErrorCode, PasswordHash, UserRecord, Username};
use crate::test_support::{InMemoryStore, MutableClock};

struct Harness {
    service: NotesService<InMemoryStore>,
    store: Arc<InMemoryStore>,
    clock: Arc<MutableClock>,
    alice: UserId,
    bob: UserId,
}

async fn add_user(store: &InMemoryStore, name: &str) -> UserId {
    let record = UserRecord {
        username: Username::new(name).expect("username"),
        email: EmailAddress::new(format!("{name}@x.com")).expect("email"),
        password_hash: PasswordHash::new("digest"),
    };
    UserRepository::create(store, &record)
        .await
        .expect("seed user")
        .id()
}

#[fixture]
async fn harness() -> Harness {
    let clock = Arc::new(MutableClock::fixed());
    let store = Arc::new(InMemoryStore::new(clock.clone()));
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;
    Harness {
        service: NotesService::new(store.clone(), clock.clone()),
        store,
        clock,
        alice,
        bob,
    }
}

fn draft(title: &str, content: &str) -> NoteDraft {
    NoteDraft::new(title, content).expect("valid draft")
}

#[rstest]
#[tokio::test]
async fn create_binds_owner_to_caller(#[future] harness: Harness) {
    let h = harness.await;
    let note = h
        .service
        .create(h.alice, &draft("t", "c"))
        .await
        .expect("create");
    assert_eq!(note.user_id, h.alice);
    assert_eq!(note.title, "t");
    assert_eq!(note.content, "c");
    assert!(note.updated_at.is_none());
    let fetched = h.service.get(note.id).await.expect("get");
    assert_eq!(fetched, note);
}

#[rstest]
#[tokio::test]
async fn owner_can_update_and_timestamp_is_set(#[future] harness: Harness) {
    let h = harness.await;
    let note = h
        .service
        .create(h.alice, &draft("t", "c"))
        .await
        .expect("create");
    h.clock.advance_seconds(60);
    let updated = h
        .service
        .update(h.alice, note.id, &draft("t2", "c2"))
        .await
        .expect("update");
    assert_eq!(updated.title, "t2");
    assert_eq!(updated.created_at, note.created_at);
    assert_eq!(updated.updated_at, Some(h.clock.utc()));
}

#[rstest]
#[tokio::test]
async fn foreign_and_missing_notes_look_the_same(#[future] harness: Harness) {
    let h = harness.await;
    let note = h
        .service
        .create(h.alice, &draft("t", "c"))
        .await
        .expect("create");

    let foreign_update = h
        .service
        .update(h.bob, note.id, &draft("x", "y"))
        .await
        .expect_err("foreign update");
    let missing_update = h
        .service
        .update(h.bob, NoteId::new(999), &draft("x", "y"))
        .await
        .expect_err("missing update");
    let foreign_delete = h
        .service
        .delete(h.bob, note.id)
        .await
        .expect_err("foreign delete");
    let missing_delete = h
        .service
        .delete(h.bob, NoteId::new(999))
        .await
        .expect_err("missing delete");

    for err in [foreign_update, missing_update, foreign_delete, missing_delete] {
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), NOTE_NOT_FOUND_MESSAGE);
    }
    assert_eq!(h.service.get(note.id).await.expect("untouched").title, "t");
}

#[rstest]
#[tokio::test]
async fn owner_delete_removes_note(#[future] harness: Harness) {
    let h = harness.await;
    let note = h
        .service
        .create(h.alice, &draft("t", "c"))
        .await
        .expect("create");
    h.service.delete(h.alice, note.id).await.expect("delete");
    let err = h.service.get(note.id).await.expect_err("gone");
    assert_eq!(err.message(), NOTE_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn list_by_user_is_ordered_and_owner_scoped(#[future] harness: Harness) {
    let h = harness.await;
    for title in ["a", "b"] {
        h.service
            .create(h.alice, &draft(title, ""))
            .await
            .expect("create");
    }
    h.service
        .create(h.bob, &draft("z", ""))
        .await
        .expect("create");
    let notes = h.service.list_by_user(h.alice).await.expect("list");
    let titles: Vec<_> = notes.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, ["a", "b"]);
    assert!(notes.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[rstest]
#[tokio::test]
async fn empty_listings_are_not_found(#[future] harness: Harness) {
    let h = harness.await;
    let by_user = h
        .service
        .list_by_user(h.bob)
        .await
        .expect_err("no notes");
    assert_eq!(by_user.code(), ErrorCode::NotFound);
    assert_eq!(by_user.message(), NO_NOTES_FOR_USER_MESSAGE);

    let all = h
        .service
        .list(&NoteFilter::default())
        .await
        .expect_err("no notes");
    assert_eq!(all.message(), NO_NOTES_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn list_applies_title_and_date_filters(#[future] harness: Harness) {
    let h = harness.await;
    let first_created = h.clock.utc();
    h.service
        .create(h.alice, &draft("grocery list", ""))
        .await
        .expect("create");
    h.clock.advance_seconds(5);
    h.service
        .create(h.bob, &draft("grocery run", ""))
        .await
        .expect("create");

    let by_title = NoteFilter {
        title_contains: Some("grocery".to_owned()),
        created_at: None,
    };
    assert_eq!(h.service.list(&by_title).await.expect("list").len(), 2);

    let by_both = NoteFilter {
        title_contains: Some("grocery".to_owned()),
        created_at: Some(first_created),
    };
    let notes = h.service.list(&by_both).await.expect("list");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "grocery list");

    let no_match = NoteFilter {
        title_contains: Some("holiday".to_owned()),
        created_at: None,
    };
    let err = h.service.list(&no_match).await.expect_err("empty");
    assert_eq!(err.message(), NO_NOTES_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn deleting_owner_cascades_to_notes(#[future] harness: Harness) {
    let h = harness.await;
    h.service
        .create(h.alice, &draft("t", "c"))
        .await
        .expect("create");
    UserRepository::delete(h.store.as_ref(), h.alice)
        .await
        .expect("delete user");
    assert_eq!(h.store.note_count(), 0);
}
