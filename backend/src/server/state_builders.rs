//! Builders wiring persistence and security adapters into HTTP state.

use std::sync::Arc;

use mockable::Clock;

use backend::domain::ports::{
    CredentialHashError, CredentialHasher, NoteRepository, TokenService, UserRepository,
};
use backend::domain::{AuthService, NotesService, TokenTtl, UserAccountsService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{DbPool, DieselNoteRepository, DieselUserRepository};
use backend::outbound::security::{BcryptCredentialHasher, JwtTokenService, SigningSecret};

/// Build handler state from any set of repositories and security adapters.
///
/// The same `AuthService` instance backs both the login and guard ports.
pub(super) fn build_http_state<U, N, H, T>(
    users: Arc<U>,
    notes: Arc<N>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    N: NoteRepository + 'static,
    H: CredentialHasher + 'static,
    T: TokenService + 'static,
{
    let auth = Arc::new(AuthService::new(
        users.clone(),
        hasher.clone(),
        tokens,
        clock.clone(),
    ));
    let accounts = Arc::new(UserAccountsService::new(users, hasher));
    let notes = Arc::new(NotesService::new(notes, clock));

    HttpState::new(HttpStatePorts {
        login: auth.clone(),
        guard: auth,
        accounts: accounts.clone(),
        accounts_query: accounts,
        notes: notes.clone(),
        notes_query: notes,
    })
}

/// Security settings resolved at startup.
pub(crate) struct SecuritySettings {
    pub secret: SigningSecret,
    pub token_ttl: TokenTtl,
    pub bcrypt_cost: u32,
}

/// Handler state backed by PostgreSQL, bcrypt, and HS256 tokens.
///
/// # Errors
/// Returns [`CredentialHashError`] when the bcrypt cost is out of range.
pub(crate) fn diesel_http_state(
    pool: &DbPool,
    security: SecuritySettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, CredentialHashError> {
    let hasher = Arc::new(BcryptCredentialHasher::new(security.bcrypt_cost)?);
    let tokens = Arc::new(JwtTokenService::new(
        &security.secret,
        security.token_ttl,
        clock.clone(),
    ));
    Ok(build_http_state(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselNoteRepository::new(pool.clone())),
        hasher,
        tokens,
        clock,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::domain::{LoginCredentials, NoteDraft, Registration};
    use backend::test_support::{FakeCredentialHasher, InMemoryStore, MutableClock};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn login_and_guard_share_one_token_service() {
        let clock = Arc::new(MutableClock::fixed());
        let store = Arc::new(InMemoryStore::new(clock.clone()));
        let tokens = Arc::new(JwtTokenService::new(
            &SigningSecret::ephemeral(),
            TokenTtl::default(),
            clock.clone(),
        ));
        let state = build_http_state(
            store.clone(),
            store,
            Arc::new(FakeCredentialHasher),
            tokens,
            clock,
        );

        let registration =
            Registration::try_from_parts("alice", "alice@x.com", "password1").expect("valid");
        let user = state.accounts.register(&registration).await.expect("register");
        let credentials = LoginCredentials::try_from_parts("alice", "password1").expect("valid");
        let token = state.login.login(&credentials).await.expect("login");
        let resolved = state.guard.resolve(token.as_str()).await.expect("resolve");
        assert_eq!(resolved.id(), user.id());

        let draft = NoteDraft::new("t", "c").expect("draft");
        let note = state.notes.create(user.id(), &draft).await.expect("create");
        assert_eq!(state.notes_query.get(note.id).await.expect("get"), note);
    }
}
