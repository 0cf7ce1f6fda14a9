use chrono::{DateTime, Utc};
use secrecy::Secret;

/// A persisted user account.
///
/// Accounts are created at bootstrap/seed time only and are never mutated
/// through the application surface. The password hash is opaque to everything
/// except the credential hasher.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: Secret<String>,
    pub created_at: DateTime<Utc>,
}

/// A user record about to be inserted; the store assigns `id` and
/// `created_at`. Username uniqueness is enforced at write time.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Secret<String>,
}
