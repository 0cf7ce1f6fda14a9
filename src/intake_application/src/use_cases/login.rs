use intake_core::{CredentialHasher, SessionUser, UserStore, UserStoreError};
use secrecy::Secret;

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown username and wrong password collapse into this one variant;
    /// callers must not be able to tell which factor failed.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

/// Login use case - verifies credentials and yields the session identity
pub struct LoginUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> LoginUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `username` - Trimmed username that already passed the login policy
    /// * `password` - Plaintext password candidate
    ///
    /// # Returns
    /// The authenticated session identity, or `LoginError::InvalidCredentials`
    /// for both unknown-user and wrong-password outcomes.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: &str,
        password: Secret<String>,
    ) -> Result<SessionUser, LoginError> {
        let user = self
            .user_store
            .find_by_username(username)
            .await
            .map_err(LoginError::Store)?;

        let Some(user) = user else {
            // Spend one hash computation so the unknown-user path costs the
            // same as a failed verification.
            let _ = self.hasher.hash(password).await;
            return Err(LoginError::InvalidCredentials);
        };

        if self.hasher.verify(password, &user.password_hash).await {
            Ok(SessionUser {
                user_id: user.id,
                username: user.username,
            })
        } else {
            Err(LoginError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use intake_core::{CredentialHashError, NewUser, User};
    use secrecy::ExposeSecret;

    // Mock implementations for testing
    struct MockUserStore {
        user: Option<User>,
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
            Ok(self
                .user
                .as_ref()
                .filter(|user| user.username == username)
                .cloned())
        }

        async fn add_user(&self, _user: NewUser) -> Result<User, UserStoreError> {
            unimplemented!()
        }

        async fn delete_user(&self, _user_id: i64) -> Result<(), UserStoreError> {
            unimplemented!()
        }
    }

    /// Hashes are `hashed:<plaintext>`; verification is a plain comparison.
    struct MockHasher;

    #[async_trait::async_trait]
    impl CredentialHasher for MockHasher {
        async fn hash(
            &self,
            plaintext: Secret<String>,
        ) -> Result<Secret<String>, CredentialHashError> {
            Ok(Secret::from(format!(
                "hashed:{}",
                plaintext.expose_secret()
            )))
        }

        async fn verify(&self, plaintext: Secret<String>, stored_hash: &Secret<String>) -> bool {
            stored_hash.expose_secret() == &format!("hashed:{}", plaintext.expose_secret())
        }
    }

    fn ahmed() -> User {
        User {
            id: 1,
            username: "Ahmed".to_string(),
            password_hash: Secret::from("hashed:ahmed123".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn correct_credentials_yield_session_identity() {
        let store = MockUserStore { user: Some(ahmed()) };
        let use_case = LoginUseCase::new(&store, &MockHasher);

        let identity = use_case
            .execute("Ahmed", Secret::from("ahmed123".to_string()))
            .await
            .expect("login succeeds");
        assert_eq!(
            identity,
            SessionUser {
                user_id: 1,
                username: "Ahmed".to_string()
            }
        );
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let store = MockUserStore { user: Some(ahmed()) };
        let use_case = LoginUseCase::new(&store, &MockHasher);

        let err = use_case
            .execute("Ahmed", Secret::from("wrong".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_user_is_indistinguishable_from_wrong_password() {
        let store = MockUserStore { user: Some(ahmed()) };
        let use_case = LoginUseCase::new(&store, &MockHasher);

        let unknown = use_case
            .execute("Nobody", Secret::from("ahmed123".to_string()))
            .await
            .unwrap_err();
        let wrong = use_case
            .execute("Ahmed", Secret::from("wrong".to_string()))
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
