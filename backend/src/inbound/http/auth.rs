//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers take an [`AuthenticatedUser`] argument; the extractor reads the
//! `Authorization: Bearer <token>` header and resolves it through the
//! [`TokenVerifier`](crate::domain::ports::TokenVerifier) port held in
//! [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";
const MISSING_TOKEN: &str = "Invalid or missing token";

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn id(&self) -> &UserId {
        self.0.id()
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

/// Extract the raw token from an `Authorization` header value.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            let token = token.ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
            state.tokens.verify(&token).await.map(AuthenticatedUser)
        })
    }
}
