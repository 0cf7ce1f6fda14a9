use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    contact::{Contact, NewContact},
    user::{NewUser, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Persistence port for user accounts.
///
/// Implementations must use parameter-bound queries only; values are never
/// concatenated into query text regardless of upstream validation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// Insert a new user. Username uniqueness is enforced by the store; a
    /// race between concurrent inserts surfaces as `UserAlreadyExists`,
    /// never as a silent duplicate.
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// Delete a user.
    ///
    /// Cascade contract: every contact owned by the user is deleted in the
    /// same operation. Callers may rely on this; implementations must not
    /// leave orphaned contacts behind.
    async fn delete_user(&self, user_id: i64) -> Result<(), UserStoreError>;
}

// ContactStore port trait and errors
#[derive(Debug, Error)]
pub enum ContactStoreError {
    #[error("Owning user does not exist")]
    OwnerMissing,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for ContactStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::OwnerMissing, Self::OwnerMissing) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Persistence port for contact-form entries.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a contact entry scoped to its owning user. A missing owner
    /// surfaces as `OwnerMissing`; transient I/O failures as `Unexpected`.
    /// Nothing is written when an error is returned.
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, ContactStoreError>;

    /// All contacts owned by a user, oldest first.
    async fn contacts_for_user(&self, user_id: i64) -> Result<Vec<Contact>, ContactStoreError>;
}
