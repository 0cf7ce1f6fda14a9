use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use intake_core::{
    Contact, ContactStore, ContactStoreError, NewContact, NewUser, User, UserStore, UserStoreError,
};

/// In-memory user and contact store for tests and local development.
///
/// Users and contacts live behind one lock so the cascade contract of
/// `UserStore::delete_user` can be honored atomically.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    contacts: Vec<Contact>,
    next_user_id: i64,
    next_contact_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        inner.next_user_id += 1;
        let persisted = User {
            id: inner.next_user_id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(persisted.clone());
        Ok(persisted)
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|user| user.id != user_id);
        if inner.users.len() == before {
            return Err(UserStoreError::UserNotFound);
        }
        // Cascade: the user's contacts go with it.
        inner.contacts.retain(|contact| contact.user_id != user_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactStore for MemoryStore {
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, ContactStoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.iter().any(|user| user.id == contact.user_id) {
            return Err(ContactStoreError::OwnerMissing);
        }
        inner.next_contact_id += 1;
        let persisted = Contact {
            id: inner.next_contact_id,
            user_id: contact.user_id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            created_at: Utc::now(),
        };
        inner.contacts.push(persisted.clone());
        Ok(persisted)
    }

    async fn contacts_for_user(&self, user_id: i64) -> Result<Vec<Contact>, ContactStoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .contacts
            .iter()
            .filter(|contact| contact.user_id == user_id)
            .cloned()
            .collect())
    }
}
