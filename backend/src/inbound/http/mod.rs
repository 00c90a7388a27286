//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod notes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every notes API route, the extractor error configs, and the
/// health probes on an app or scope.
///
/// Handler state (`web::Data<HttpState>` and `web::Data<HealthState>`) is
/// registered by the caller.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::form_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(auth::issue_token)
        .service(users::create_user)
        .service(users::list_user_notes)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(notes::create_note)
        .service(notes::list_notes)
        .service(notes::get_note)
        .service(notes::update_note)
        .service(notes::delete_note)
        .service(health::ready)
        .service(health::live);
}
