pub mod domain;
pub mod ports;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    contact::{Contact, NewContact},
    session_user::SessionUser,
    user::{NewUser, User},
};

pub use ports::{
    hashing::{CredentialHashError, CredentialHasher},
    repositories::{ContactStore, ContactStoreError, UserStore, UserStoreError},
};

pub use validation::{
    policy::{FieldPolicy, FormPolicy, Rule, ValidatedFields},
    rules::{RuleViolation, ViolationKind},
    FieldErrors,
};
