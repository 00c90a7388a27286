//! Server settings loaded via OrthoConfig, plus the assembled server config.

use std::net::{AddrParseError, SocketAddr};

use actix_web::web;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::{DEFAULT_TOKEN_TTL_MINUTES, TokenTtl, ZeroTokenTtl};
use backend::inbound::http::state::HttpState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BCRYPT_COST: u32 = 12;
const DEFAULT_DB_POOL_MAX_SIZE: u32 = 10;

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_owned()
}

/// Process settings, read from CLI flags, `NOTES_*` variables, and config
/// files. Every field except `database_url` has a default, so the struct
/// loads with no sources at all.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTES")]
pub struct ServerSettings {
    /// Listener address.
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// PostgreSQL connection string. Required to serve.
    pub database_url: Option<String>,
    /// Access token lifetime in whole minutes.
    #[ortho_config(default = DEFAULT_TOKEN_TTL_MINUTES)]
    pub token_ttl_minutes: u32,
    /// bcrypt work factor for new digests.
    #[ortho_config(default = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,
    /// Maximum pooled database connections.
    #[ortho_config(default = DEFAULT_DB_POOL_MAX_SIZE)]
    pub db_pool_max_size: u32,
}

impl ServerSettings {
    /// Parsed listener address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.parse()
    }

    pub fn token_ttl(&self) -> Result<TokenTtl, ZeroTokenTtl> {
        TokenTtl::from_minutes(self.token_ttl_minutes)
    }
}

/// Everything `create_server` needs once adapters are wired.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "NOTES_BIND_ADDR",
        "NOTES_DATABASE_URL",
        "NOTES_TOKEN_TTL_MINUTES",
        "NOTES_BCRYPT_COST",
        "NOTES_DB_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("notes-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.token_ttl().expect("ttl").minutes(), 30);
        assert_eq!(settings.bcrypt_cost, 12);
        assert_eq!(settings.db_pool_max_size, 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("NOTES_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "NOTES_DATABASE_URL",
                Some("postgres://notes@localhost/notes".to_owned()),
            ),
            ("NOTES_TOKEN_TTL_MINUTES", Some("5".to_owned())),
            ("NOTES_BCRYPT_COST", Some("4".to_owned())),
            ("NOTES_DB_POOL_MAX_SIZE", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://notes@localhost/notes")
        );
        assert_eq!(settings.token_ttl().expect("ttl").minutes(), 5);
        assert_eq!(settings.bcrypt_cost, 4);
        assert_eq!(settings.db_pool_max_size, 3);
    }

    #[rstest]
    fn zero_ttl_is_rejected() {
        let _guard = lock_env([("NOTES_TOKEN_TTL_MINUTES", Some("0".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(settings.token_ttl(), Err(ZeroTokenTtl));
    }
}
