//! Diesel repositories against a real PostgreSQL database.
//!
//! Each test runs on its own database cloned from a migrated template on a
//! shared embedded cluster. Set `SKIP_TEST_CLUSTER=1` where no cluster can
//! start.

use std::sync::Arc;

use backend::domain::ports::{
    NoteRepository, UserAccountsCommand, UserPersistenceError, UserRepository,
};
use backend::domain::{
    EmailAddress, ErrorCode, NoteDraft, NoteFilter, PasswordHash, Registration, User,
    UserAccountsService, UserRecord, Username,
};
use backend::outbound::persistence::{
    DbPool, DieselNoteRepository, DieselUserRepository, PoolConfig, TransactionError,
};
use backend::outbound::security::BcryptCredentialHasher;
use chrono::Utc;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    users: DieselUserRepository,
    notes: DieselNoteRepository,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn user(&self, username: &str) -> User {
        self.runtime
            .block_on(self.users.create(&record(username)))
            .expect("user inserted")
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;
    let config = PoolConfig::new(database.url().to_string())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        users: DieselUserRepository::new(pool.clone()),
        notes: DieselNoteRepository::new(pool.clone()),
        pool,
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn record(username: &str) -> UserRecord {
    UserRecord {
        username: Username::new(username).expect("valid username"),
        email: EmailAddress::new(format!("{}@x.com", username.trim())).expect("valid email"),
        password_hash: PasswordHash::new("$2b$04$digest"),
    }
}

fn draft(title: &str) -> NoteDraft {
    NoteDraft::new(title, "body").expect("valid draft")
}

#[rstest]
fn duplicate_username_is_reported_and_maps_to_conflict(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_username_is_reported_and_maps_to_conflict skipped");
        return;
    };
    ctx.user("alice");

    let err = ctx
        .runtime
        .block_on(ctx.users.create(&record("alice")))
        .expect_err("second insert violates the unique index");
    let is_duplicate = matches!(
        err,
        UserPersistenceError::DuplicateUsername { ref username } if username == "alice"
    );
    assert!(is_duplicate, "unexpected error: {err:?}");

    let accounts = UserAccountsService::new(
        Arc::new(ctx.users.clone()),
        Arc::new(BcryptCredentialHasher::new(4).expect("minimum bcrypt cost")),
    );
    let registration =
        Registration::try_from_parts("alice", "alice@y.com", "password1").expect("valid fields");
    let err = ctx
        .runtime
        .block_on(accounts.register(&registration))
        .expect_err("duplicate registration");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
fn padded_username_is_a_distinct_row(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: padded_username_is_a_distinct_row skipped");
        return;
    };
    let alice = ctx.user("alice");
    let padded = ctx.user("alice ");
    assert_ne!(alice.id(), padded.id());

    let found = ctx
        .runtime
        .block_on(ctx.users.find_by_username(&Username::new("alice").expect("username")))
        .expect("lookup")
        .expect("alice exists");
    assert_eq!(found.id(), alice.id());

    let missing = ctx
        .runtime
        .block_on(ctx.users.find_by_username(&Username::new(" alice").expect("username")))
        .expect("lookup");
    assert!(missing.is_none());
}

#[rstest]
fn foreign_note_is_neither_updated_nor_deleted(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: foreign_note_is_neither_updated_nor_deleted skipped");
        return;
    };
    let alice = ctx.user("alice");
    let bob = ctx.user("bob");
    let note = ctx
        .runtime
        .block_on(ctx.notes.create(alice.id(), &draft("groceries")))
        .expect("note created");

    let updated = ctx
        .runtime
        .block_on(ctx.notes.update_owned(note.id, bob.id(), &draft("mine now"), Utc::now()))
        .expect("update runs");
    assert!(updated.is_none());

    let removed = ctx
        .runtime
        .block_on(ctx.notes.delete_owned(note.id, bob.id()))
        .expect("delete runs");
    assert!(!removed);

    let stored = ctx
        .runtime
        .block_on(ctx.notes.find_by_id(note.id))
        .expect("lookup")
        .expect("note survives");
    assert_eq!(stored.title, "groceries");
    assert!(stored.updated_at.is_none());

    let edited_at = Utc::now();
    let updated = ctx
        .runtime
        .block_on(ctx.notes.update_owned(note.id, alice.id(), &draft("shopping"), edited_at))
        .expect("update runs")
        .expect("owner may edit");
    assert_eq!(updated.title, "shopping");
    assert_eq!(updated.user_id, alice.id());
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at.is_some());

    let removed = ctx
        .runtime
        .block_on(ctx.notes.delete_owned(note.id, alice.id()))
        .expect("delete runs");
    assert!(removed);
}

#[rstest]
#[case("50%", &["50% off"])]
#[case("a_b", &["a_b"])]
#[case("back\\slash", &["back\\slash"])]
#[case("Case", &["Case"])]
#[case("case", &[])]
fn title_filter_matches_literal_substrings(
    repo_context: Option<TestContext>,
    #[case] needle: &str,
    #[case] expected: &[&str],
) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: title_filter_matches_literal_substrings skipped");
        return;
    };
    let owner = ctx.user("alice");
    for title in ["50% off", "5000 off", "a_b", "axb", "back\\slash", "Case"] {
        ctx.runtime
            .block_on(ctx.notes.create(owner.id(), &draft(title)))
            .expect("note created");
    }

    let filter = NoteFilter {
        title_contains: Some(needle.to_owned()),
        created_at: None,
    };
    let titles: Vec<String> = ctx
        .runtime
        .block_on(ctx.notes.list(&filter))
        .expect("listing")
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, expected);
}

#[rstest]
fn deleting_a_user_cascades_to_their_notes(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_user_cascades_to_their_notes skipped");
        return;
    };
    let alice = ctx.user("alice");
    let bob = ctx.user("bob");
    let doomed = ctx
        .runtime
        .block_on(ctx.notes.create(alice.id(), &draft("doomed")))
        .expect("note created");
    ctx.runtime
        .block_on(ctx.notes.create(bob.id(), &draft("kept")))
        .expect("note created");

    let removed = ctx
        .runtime
        .block_on(ctx.users.delete(alice.id()))
        .expect("delete runs");
    assert!(removed);

    let orphan = ctx
        .runtime
        .block_on(ctx.notes.find_by_id(doomed.id))
        .expect("lookup");
    assert!(orphan.is_none());
    let remaining = ctx
        .runtime
        .block_on(ctx.notes.list(&NoteFilter::default()))
        .expect("listing");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, bob.id());

    let again = ctx
        .runtime
        .block_on(ctx.users.delete(alice.id()))
        .expect("delete runs");
    assert!(!again);
}

#[rstest]
fn transactions_commit_on_ok_and_roll_back_on_err(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: transactions_commit_on_ok_and_roll_back_on_err skipped");
        return;
    };
    let insert = |username: &'static str| {
        format!(
            "INSERT INTO users (username, email, hashed_password) \
             VALUES ('{username}', '{username}@x.com', 'digest')"
        )
    };

    let rolled_back = insert("carol");
    let result: Result<(), TransactionError> =
        ctx.runtime.block_on(ctx.pool.with_transaction(|conn| {
            async move {
                diesel::sql_query(rolled_back).execute(conn).await?;
                Err(diesel::result::Error::RollbackTransaction.into())
            }
            .scope_boxed()
        }));
    assert!(matches!(result, Err(TransactionError::Diesel(_))));

    let committed = insert("dave");
    let inserted = ctx
        .runtime
        .block_on(ctx.pool.with_transaction(|conn| {
            async move {
                let rows = diesel::sql_query(committed).execute(conn).await?;
                Ok(rows)
            }
            .scope_boxed()
        }))
        .expect("transaction commits");
    assert_eq!(inserted, 1);

    let lookup = |name: &str| {
        ctx.runtime
            .block_on(ctx.users.find_by_username(&Username::new(name).expect("username")))
            .expect("lookup")
    };
    assert!(lookup("carol").is_none());
    assert!(lookup("dave").is_some());
}
