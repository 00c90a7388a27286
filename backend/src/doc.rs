//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (token, users,
//!   notes, health)
//! - **Schemas**: request and response bodies plus the shared error payload
//! - **Security**: the HTTP bearer scheme used by note mutations
//!
//! The generated document is served by Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{TokenRequest, TokenResponse};
use crate::inbound::http::notes::{NoteCreatedResponse, NoteRequest};
use crate::inbound::http::schemas::{MessageResponse, NoteResponse, UserResponse};
use crate::inbound::http::users::UserRequest;

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /token."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes backend API",
        description = "User accounts, bearer tokens, and owner-scoped notes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::issue_token,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_user_notes,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::get_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        TokenRequest,
        TokenResponse,
        UserRequest,
        UserResponse,
        NoteRequest,
        NoteResponse,
        NoteCreatedResponse,
        MessageResponse
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "users", description = "Account registration and maintenance"),
        (name = "notes", description = "Notes owned by users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
