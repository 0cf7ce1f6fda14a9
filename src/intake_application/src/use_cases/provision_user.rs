use intake_core::{CredentialHashError, CredentialHasher, NewUser, User, UserStore, UserStoreError};
use secrecy::Secret;

/// Outcome of provisioning a user at bootstrap.
#[derive(Debug)]
pub enum ProvisionOutcome {
    Created(User),
    /// The account was already there; provisioning is idempotent.
    AlreadyExists,
}

/// Error types specific to the provision-user use case
#[derive(Debug, thiserror::Error)]
pub enum ProvisionUserError {
    #[error("Failed to hash password: {0}")]
    Hash(#[from] CredentialHashError),
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

/// Provision-user use case - creates seed accounts at bootstrap.
///
/// This is the only path that creates users; there is no self-service
/// registration surface.
pub struct ProvisionUserUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> ProvisionUserUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the provision-user use case
    ///
    /// A concurrent registration race is resolved by the store's uniqueness
    /// constraint and reported here as `AlreadyExists`.
    #[tracing::instrument(name = "ProvisionUserUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: &str,
        password: Secret<String>,
    ) -> Result<ProvisionOutcome, ProvisionUserError> {
        let password_hash = self.hasher.hash(password).await?;

        let user = NewUser {
            username: username.to_string(),
            password_hash,
        };

        match self.user_store.add_user(user).await {
            Ok(user) => Ok(ProvisionOutcome::Created(user)),
            Err(UserStoreError::UserAlreadyExists) => Ok(ProvisionOutcome::AlreadyExists),
            Err(err) => Err(ProvisionUserError::Store(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[derive(Clone, Default)]
    struct MockUserStore {
        users: Arc<RwLock<HashMap<String, User>>>,
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
            Ok(self.users.read().await.get(username).cloned())
        }

        async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
            let mut users = self.users.write().await;
            if users.contains_key(&user.username) {
                return Err(UserStoreError::UserAlreadyExists);
            }
            let persisted = User {
                id: users.len() as i64 + 1,
                username: user.username.clone(),
                password_hash: user.password_hash,
                created_at: Utc::now(),
            };
            users.insert(user.username, persisted.clone());
            Ok(persisted)
        }

        async fn delete_user(&self, _user_id: i64) -> Result<(), UserStoreError> {
            unimplemented!()
        }
    }

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

    #[tokio::test]
    async fn provisioning_creates_the_account_with_a_hash() {
        let store = MockUserStore::default();
        let use_case = ProvisionUserUseCase::new(&store, &MockHasher);

        let outcome = use_case
            .execute("Ahmed", Secret::from("ahmed123".to_string()))
            .await
            .expect("provisioning succeeds");
        assert!(matches!(outcome, ProvisionOutcome::Created(_)));

        let stored = store.find_by_username("Ahmed").await.unwrap().unwrap();
        assert_eq!(stored.password_hash.expose_secret(), "hashed:ahmed123");
    }

    #[tokio::test]
    async fn provisioning_twice_is_idempotent() {
        let store = MockUserStore::default();
        let use_case = ProvisionUserUseCase::new(&store, &MockHasher);

        use_case
            .execute("Ahmed", Secret::from("ahmed123".to_string()))
            .await
            .unwrap();
        let second = use_case
            .execute("Ahmed", Secret::from("ahmed123".to_string()))
            .await
            .expect("second run is not an error");
        assert!(matches!(second, ProvisionOutcome::AlreadyExists));
    }
}
