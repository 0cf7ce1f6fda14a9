//! One-shot flash notices.
//!
//! A notice is set as a cookie on a redirect and cleared the first time a
//! page reads it. The payload is JSON, base64-encoded so cookie-unsafe
//! characters in messages never corrupt the header.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "intake_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// A one-shot informational notice surfaced on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// CSS class hook for templates.
    pub fn kind(&self) -> &'static str {
        match self.level {
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

/// Build the cookie carrying a notice to the next page.
pub fn cookie(flash: &Flash) -> Cookie<'static> {
    let payload = serde_json::to_string(flash).unwrap_or_default();
    Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(payload)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Read and clear the notice, if one is pending.
///
/// The returned jar carries the removal and must be included in the
/// response. An unreadable payload is dropped silently.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());

    let jar = if flash.is_some() {
        jar.remove(Cookie::build(FLASH_COOKIE).path("/").build())
    } else {
        jar
    };

    (jar, flash)
}
