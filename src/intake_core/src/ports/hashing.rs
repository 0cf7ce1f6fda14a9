use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialHashError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Port for password hashing and verification.
///
/// Implementations use a salted, slow, adaptive algorithm; the cost is
/// intentional and must not be cached or parallelized away. Plaintext never
/// leaves the secrecy wrapper and is never logged.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into an opaque, self-describing hash string.
    async fn hash(&self, plaintext: Secret<String>) -> Result<Secret<String>, CredentialHashError>;

    /// Verify a plaintext candidate against a stored hash.
    ///
    /// Comparison is constant-time internally. A malformed stored hash fails
    /// closed: the result is `false`, never an error or a panic.
    async fn verify(&self, plaintext: Secret<String>, stored_hash: &Secret<String>) -> bool;
}
