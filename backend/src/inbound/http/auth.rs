//! Token authentication for HTTP handlers.
//!
//! Callers present `Authorization: Token <key>`; the extractor resolves the
//! key through the [`crate::domain::ports::TokenAuth`] port so the
//! authenticated user identity is always passed explicitly into domain
//! operations, never read from ambient state.

use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

/// Authentication scheme expected in the `Authorization` header.
const TOKEN_SCHEME: &str = "Token ";

/// The authenticated caller, resolved from the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    /// Identity of the authenticated user.
    pub user_id: UserId,
}

fn token_from_headers(headers: &HeaderMap) -> Result<String, Error> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(Error::unauthorized(
            "Authentication credentials were not provided",
        ));
    };
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("Invalid token header"))?;
    let Some(key) = value.strip_prefix(TOKEN_SCHEME) else {
        return Err(Error::unauthorized("Invalid token header"));
    };
    if key.is_empty() || key.contains(' ') {
        return Err(Error::unauthorized("Invalid token header"));
    }
    Ok(key.to_owned())
}

impl FromRequest for AuthedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<HttpState>>()
                .cloned()
                .ok_or_else(|| Error::internal("authentication state is not configured"))?;
            let key = token_from_headers(req.headers())?;
            let user_id = state.token_auth.authenticate(&key).await?;
            Ok(Self { user_id })
        })
    }
}
