//! Anti-forgery tokens for state-changing form submissions.
//!
//! A fresh signed token is issued with every rendered form, carried twice:
//! in an HTTP-only cookie and in a hidden form field. Verification checks
//! the signature, the expiry, and that both copies match - and runs before
//! any field validation does. A cross-site attacker can set neither the
//! cookie nor mint a token, so a forged POST fails here.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CsrfError {
    #[error("Missing CSRF token")]
    Missing,
    #[error("CSRF token mismatch")]
    Mismatch,
    #[error("Invalid CSRF token")]
    Invalid,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct CsrfClaims {
    nonce: String,
    exp: usize,
}

/// A freshly issued token pair: the cookie to set on the response and the
/// value to embed in the form.
pub struct CsrfPair {
    pub cookie: Cookie<'static>,
    pub form_token: String,
}

#[derive(Clone)]
pub struct CsrfProtect {
    cookie_name: String,
    secret: Secret<String>,
    ttl_seconds: i64,
    secure_cookies: bool,
}

impl CsrfProtect {
    pub fn new(
        cookie_name: String,
        secret: Secret<String>,
        ttl_seconds: i64,
        secure_cookies: bool,
    ) -> Self {
        Self {
            cookie_name,
            secret,
            ttl_seconds,
            secure_cookies,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Issue a fresh token pair for a form about to be rendered.
    pub fn issue(&self) -> Result<CsrfPair, CsrfError> {
        let delta = chrono::Duration::try_seconds(self.ttl_seconds)
            .ok_or_else(|| CsrfError::Unexpected("token lifetime out of range".to_string()))?;
        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or_else(|| CsrfError::Unexpected("expiry out of range".to_string()))?
            .timestamp() as usize;

        let claims = CsrfClaims {
            nonce: Uuid::new_v4().to_string(),
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| CsrfError::Unexpected(e.to_string()))?;

        let cookie = Cookie::build((self.cookie_name.clone(), token.clone()))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .build();

        Ok(CsrfPair {
            cookie,
            form_token: token,
        })
    }

    /// Verify a submitted form token against the request's CSRF cookie.
    pub fn verify(&self, jar: &CookieJar, form_token: &str) -> Result<(), CsrfError> {
        let cookie_token = jar.get(&self.cookie_name).ok_or(CsrfError::Missing)?.value();
        if form_token.is_empty() {
            return Err(CsrfError::Missing);
        }
        if cookie_token != form_token {
            return Err(CsrfError::Mismatch);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<CsrfClaims>(
            form_token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|_| CsrfError::Invalid)?;

        Ok(())
    }
}
