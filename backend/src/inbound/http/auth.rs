//! Bearer authentication for HTTP handlers.
//!
//! ```text
//! POST /token  username=alice&password=password1
//! Authorization: Bearer <access_token>
//! ```
//!
//! `POST /token` exchanges form credentials for a signed access token. The
//! [`CurrentUser`] extractor resolves the `Authorization` header back into a
//! stored user for handlers that need an identity.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, post, web};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Error, INCORRECT_CREDENTIALS_MESSAGE, LoginCredentials, LoginValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message for requests reaching a protected route without a bearer token.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Token request form for `POST /token`.
///
/// Extra OAuth2 password-grant fields (`grant_type`, `scope`) are accepted
/// and ignored.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<TokenRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: TokenRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Issued access token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Blank credentials fail exactly like wrong ones.
fn map_login_validation_error(err: LoginValidationError) -> Error {
    debug!(reason = %err, "blank login field");
    Error::authentication_failed(INCORRECT_CREDENTIALS_MESSAGE)
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Incorrect username or password", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "issueToken",
    security([])
)]
#[post("/token")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    form: web::Form<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        LoginCredentials::try_from(form.into_inner()).map_err(map_login_validation_error)?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(TokenResponse {
        access_token: token.into_inner(),
        token_type: "bearer".to_owned(),
    }))
}

/// Authenticated caller resolved from the `Authorization: Bearer` header.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::inbound::http::auth::CurrentUser;
///
/// async fn whoami(CurrentUser(user): CurrentUser) -> HttpResponse {
///     HttpResponse::Ok().body(user.username().as_str().to_owned())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Token from an `Authorization` header using the `Bearer` scheme.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        debug!(scheme, "unsupported authorization scheme");
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let token = token.ok_or_else(|| Error::unauthorized(NOT_AUTHENTICATED_MESSAGE))?;
            let user = state.guard.resolve(&token).await?;
            Ok(CurrentUser(user))
        })
    }
}
