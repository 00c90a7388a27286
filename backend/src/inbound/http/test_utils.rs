//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::{AuthService, NotesService, TokenTtl, UserAccountsService};
use crate::outbound::security::{JwtTokenService, SigningSecret};
use crate::test_support::{FakeCredentialHasher, InMemoryStore, MutableClock};

use super::state::{HttpState, HttpStatePorts};
use super::validation::{form_config, json_config, path_config, query_config};

/// In-memory wiring shared by handler tests.
pub struct TestHarness {
    pub clock: Arc<MutableClock>,
    pub store: Arc<InMemoryStore>,
    pub state: web::Data<HttpState>,
}

impl TestHarness {
    /// Build services over one in-memory store, a fake hasher, and a real
    /// JWT issuer with a fresh random secret.
    pub fn new() -> Self {
        let clock = Arc::new(MutableClock::fixed());
        let store = Arc::new(InMemoryStore::new(clock.clone()));
        let hasher = Arc::new(FakeCredentialHasher);
        let tokens = Arc::new(JwtTokenService::new(
            &SigningSecret::ephemeral(),
            TokenTtl::default(),
            clock.clone(),
        ));
        let auth = Arc::new(AuthService::new(
            store.clone(),
            hasher.clone(),
            tokens,
            clock.clone(),
        ));
        let accounts = Arc::new(UserAccountsService::new(store.clone(), hasher));
        let notes = Arc::new(NotesService::new(store.clone(), clock.clone()));

        let state = HttpState::new(HttpStatePorts {
            login: auth.clone(),
            guard: auth,
            accounts: accounts.clone(),
            accounts_query: accounts,
            notes: notes.clone(),
            notes_query: notes,
        });
        Self {
            clock,
            store,
            state: web::Data::new(state),
        }
    }

    /// App with state and extractor configs registered, ready for services.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(json_config())
            .app_data(form_config())
            .app_data(query_config())
            .app_data(path_config())
    }
}

/// `Authorization` header value for a bearer token.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
