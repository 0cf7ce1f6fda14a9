use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use intake_core::{CredentialHashError, CredentialHasher};
use secrecy::{ExposeSecret, Secret};

/// Argon2id credential hasher.
///
/// Hashing is deliberately CPU-bound and slow; it runs on the blocking pool
/// so request workers are not starved, but the cost itself is the point and
/// is never cached.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, plaintext: Secret<String>) -> Result<Secret<String>, CredentialHashError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(plaintext.expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| e.to_string())
        .map_err(CredentialHashError::Hash)?;

        result.map_err(CredentialHashError::Hash)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(&self, plaintext: Secret<String>, stored_hash: &Secret<String>) -> bool {
        let current_span: tracing::Span = tracing::Span::current();
        let stored_hash = stored_hash.clone();

        // Any failure - malformed stored hash included - verifies as false.
        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let Ok(expected) = PasswordHash::new(stored_hash.expose_secret()) else {
                    return false;
                };
                let Ok(hasher) = argon2() else {
                    return false;
                };
                hasher
                    .verify_password(plaintext.expose_secret().as_bytes(), &expected)
                    .is_ok()
            })
        })
        .await;

        result.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = Argon2Hasher;
        let hash = hasher
            .hash(Secret::from("ahmed123".to_string()))
            .await
            .expect("hashing succeeds");

        assert!(
            hasher
                .verify(Secret::from("ahmed123".to_string()), &hash)
                .await
        );
    }

    #[tokio::test]
    async fn wrong_plaintext_fails_verification() {
        let hasher = Argon2Hasher;
        let hash = hasher
            .hash(Secret::from("ahmed123".to_string()))
            .await
            .unwrap();

        assert!(
            !hasher
                .verify(Secret::from("umer123".to_string()), &hash)
                .await
        );
    }

    #[tokio::test]
    async fn two_hashes_of_the_same_plaintext_differ() {
        // Per-hash salts: equal inputs must not produce equal hashes.
        let hasher = Argon2Hasher;
        let first = hasher
            .hash(Secret::from("ahmed123".to_string()))
            .await
            .unwrap();
        let second = hasher
            .hash(Secret::from("ahmed123".to_string()))
            .await
            .unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[tokio::test]
    async fn malformed_stored_hash_fails_closed() {
        let hasher = Argon2Hasher;
        let garbage = Secret::from("not-a-phc-string".to_string());

        assert!(
            !hasher
                .verify(Secret::from("ahmed123".to_string()), &garbage)
                .await
        );
    }
}
