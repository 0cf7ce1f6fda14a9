use chrono::{DateTime, Utc};

/// A contact-form entry owned by a user.
///
/// Entries are created on successful authenticated form submission and are
/// never updated or deleted through the application surface. Every contact
/// has an existing owning user; deleting that user deletes its contacts
/// (see `UserStore::delete_user`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A contact entry about to be inserted. All fields have already passed the
/// contact form policy and are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
