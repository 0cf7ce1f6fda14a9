use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};

use intake_core::{
    Contact, ContactStore, ContactStoreError, NewContact, NewUser, User, UserStore, UserStoreError,
};

/// PostgreSQL-backed user and contact store.
///
/// Every query binds its parameters; values are never interpolated into SQL
/// text. The `contacts.user_id` foreign key is declared `ON DELETE CASCADE`,
/// which is what backs the cascade contract on `UserStore::delete_user`.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: Secret::from(row.password_hash),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    user_id: i64,
    name: String,
    email: String,
    phone: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    #[tracing::instrument(name = "Looking up user in PostgreSQL", skip_all)]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, username, password_hash, created_at
                FROM users
                WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (username, password_hash)
                VALUES ($1, $2)
                RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(user.password_hash.expose_secret())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::Unexpected(e.to_string())
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_user(&self, user_id: i64) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM users
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactStore for PostgresStore {
    #[tracing::instrument(name = "Inserting contact into PostgreSQL", skip_all)]
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, ContactStoreError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
                INSERT INTO contacts (user_id, name, email, phone, message)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, user_id, name, email, phone, message, created_at
            "#,
        )
        .bind(contact.user_id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ContactStoreError::OwnerMissing;
                }
            }
            ContactStoreError::Unexpected(e.to_string())
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Listing contacts from PostgreSQL", skip_all)]
    async fn contacts_for_user(&self, user_id: i64) -> Result<Vec<Contact>, ContactStoreError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
                SELECT id, user_id, name, email, phone, message, created_at
                FROM contacts
                WHERE user_id = $1
                ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactStoreError::Unexpected(e.to_string()))?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }
}
