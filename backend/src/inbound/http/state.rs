//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessGuard, LoginService, NotesCommand, NotesQuery, UserAccountsCommand, UserAccountsQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub guard: Arc<dyn AccessGuard>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub accounts_query: Arc<dyn UserAccountsQuery>,
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub guard: Arc<dyn AccessGuard>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub accounts_query: Arc<dyn UserAccountsQuery>,
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{AuthService, NotesService, UserAccountsService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::test_support::{FakeCredentialHasher, InMemoryStore, MutableClock};
    /// use backend::outbound::security::{JwtTokenService, SigningSecret};
    /// use backend::domain::TokenTtl;
    ///
    /// let clock = Arc::new(MutableClock::fixed());
    /// let store = Arc::new(InMemoryStore::new(clock.clone()));
    /// let hasher = Arc::new(FakeCredentialHasher);
    /// let tokens = Arc::new(JwtTokenService::new(
    ///     &SigningSecret::ephemeral(),
    ///     TokenTtl::default(),
    ///     clock.clone(),
    /// ));
    /// let auth = Arc::new(AuthService::new(store.clone(), hasher.clone(), tokens, clock.clone()));
    /// let accounts = Arc::new(UserAccountsService::new(store.clone(), hasher));
    /// let notes = Arc::new(NotesService::new(store, clock));
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: auth.clone(),
    ///     guard: auth,
    ///     accounts: accounts.clone(),
    ///     accounts_query: accounts,
    ///     notes: notes.clone(),
    ///     notes_query: notes,
    /// });
    /// let _guard = state.guard.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            guard,
            accounts,
            accounts_query,
            notes,
            notes_query,
        } = ports;
        Self {
            login,
            guard,
            accounts,
            accounts_query,
            notes,
            notes_query,
        }
    }
}
