//! Bearer token extraction.
//!
//! Handlers that need a signed-in caller take [`Authenticated`] as an
//! argument. The extractor reads `Authorization: Bearer <token>`, resolves it
//! through the configured [`AuthService`](crate::domain::ports::AuthService)
//! and rejects the request with `401` before the handler body runs.

use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::service_errors::map_auth_error;
use crate::domain::{Error, Principal};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Principal resolved from the request's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(pub Principal);

impl Authenticated {
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized("authorization scheme must be Bearer"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req.headers())?;
    state
        .auth
        .verify(token)
        .map(Authenticated)
        .map_err(map_auth_error)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
