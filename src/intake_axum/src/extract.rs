//! The auth gate.
//!
//! `AuthenticatedUser` guards protected handlers: it resolves the session
//! cookie to an identity before the handler body runs, and rejects with a
//! redirect to the login page otherwise, so a protected operation's side
//! effects can never execute for an anonymous request.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::flash::{self, Flash};
use intake_adapters::SessionManager;
use intake_core::SessionUser;

/// The identity of the caller, proven by a valid session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub SessionUser);

/// Rejection: no session, expired session, or tampered token.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let jar = CookieJar::new().add(flash::cookie(&Flash::error("Please login first")));
        (jar, Redirect::to("/login")).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    SessionManager: FromRef<S>,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionManager::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        match sessions.current_user(&jar) {
            Some(user) => Ok(AuthenticatedUser(user)),
            None => Err(AuthRedirect),
        }
    }
}
