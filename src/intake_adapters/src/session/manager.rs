//! Signed-cookie session management.
//!
//! A session is a signed token bound to `{user_id, username}` with an
//! absolute expiry, carried in an HTTP-only cookie. There is no server-side
//! session table: tampering is caught by the signature and expiry is encoded
//! in the token itself, so a session is exactly as alive as its token.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use intake_core::SessionUser;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
    /// Absolute session lifetime in seconds, counted from creation
    /// regardless of activity.
    pub ttl_seconds: i64,
    pub secure_cookies: bool,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: i64,
    username: String,
    exp: usize,
}

/// Creates, reads, and invalidates the session cookie.
#[derive(Clone)]
pub struct SessionManager {
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Establish a fresh session for an authenticated user.
    ///
    /// Setting the returned cookie replaces whatever session the client held
    /// before; expiry is absolute at `now + ttl`.
    pub fn create(&self, user: &SessionUser) -> Result<Cookie<'static>, SessionTokenError> {
        let delta = chrono::Duration::try_seconds(self.config.ttl_seconds).ok_or_else(|| {
            SessionTokenError::Unexpected("session lifetime out of range".to_string())
        })?;
        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or_else(|| SessionTokenError::Unexpected("expiry out of range".to_string()))?
            .timestamp();
        let exp: usize = exp
            .try_into()
            .map_err(|_| SessionTokenError::Unexpected("expiry before epoch".to_string()))?;

        let claims = SessionClaims {
            sub: user.user_id,
            username: user.username.clone(),
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.expose_secret().as_bytes()),
        )?;

        Ok(self.build_cookie(token))
    }

    /// The identity bound to the request's session cookie, if any.
    ///
    /// Returns `None` when the cookie is absent, the token is expired (zero
    /// leeway), or the signature does not verify.
    pub fn current_user(&self, jar: &CookieJar) -> Option<SessionUser> {
        let token = jar.get(&self.config.cookie_name)?.value();

        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .ok()?;

        Some(SessionUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }

    /// A removal cookie that clears the session unconditionally. Applying it
    /// to a client with no session is not an error.
    pub fn destroy(&self) -> Cookie<'static> {
        let mut cookie = self.build_cookie(String::new());
        cookie.make_removal();
        cookie
    }

    fn build_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), token))
            .path("/") // apply cookie to all URLs on the server
            .http_only(true) // prevent JavaScript from accessing the cookie
            .secure(self.config.secure_cookies)
            .same_site(SameSite::Lax)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(SessionConfig {
            cookie_name: "intake_session".to_string(),
            secret: Secret::from("test-secret".to_string()),
            ttl_seconds: 3600,
            secure_cookies: false,
        })
    }

    fn ahmed() -> SessionUser {
        SessionUser {
            user_id: 1,
            username: "Ahmed".to_string(),
        }
    }

    #[test]
    fn created_session_round_trips() {
        let manager = manager();
        let cookie = manager.create(&ahmed()).expect("session created");
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let jar = CookieJar::new().add(cookie);
        assert_eq!(manager.current_user(&jar), Some(ahmed()));
    }

    #[test]
    fn missing_cookie_is_anonymous() {
        assert_eq!(manager().current_user(&CookieJar::new()), None);
    }

    #[test]
    fn tampered_token_is_anonymous() {
        let manager = manager();
        let cookie = manager.create(&ahmed()).unwrap();
        let mut tampered = cookie.value().to_string();
        tampered.pop();
        tampered.push('x');

        let jar = CookieJar::new().add(Cookie::new("intake_session", tampered));
        assert_eq!(manager.current_user(&jar), None);
    }

    #[test]
    fn expired_token_is_anonymous_regardless_of_activity() {
        let manager = manager();
        // Craft a token whose absolute expiry has already passed.
        let claims = SessionClaims {
            sub: 1,
            username: "Ahmed".to_string(),
            exp: (Utc::now().timestamp() - 10) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let jar = CookieJar::new().add(Cookie::new("intake_session", token));
        assert_eq!(manager.current_user(&jar), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let manager = manager();
        let removal = manager.destroy();
        assert_eq!(removal.value(), "");
        // Applying the removal cookie to an empty jar is fine.
        let jar = CookieJar::new().add(removal.clone());
        assert_eq!(manager.current_user(&jar), None);
        let _ = manager.destroy();
    }
}
