//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `AccessGuard`, the account and note
//! command/query pairs) are what inbound adapters call. Driven ports
//! (repositories, hasher, token service) are implemented by outbound
//! adapters and report failures through typed error enums.

mod macros;
pub(crate) use macros::define_port_error;

mod access_guard;
mod credential_hasher;
mod login_service;
mod note_repository;
mod notes_command;
mod notes_query;
mod token_service;
mod user_accounts_command;
mod user_accounts_query;
mod user_repository;

pub use access_guard::AccessGuard;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use login_service::LoginService;
pub use note_repository::{NotePersistenceError, NoteRepository};
pub use notes_command::NotesCommand;
pub use notes_query::NotesQuery;
pub use token_service::{TokenError, TokenService};
pub use user_accounts_command::UserAccountsCommand;
pub use user_accounts_query::UserAccountsQuery;
pub use user_repository::{UserPersistenceError, UserRepository};
