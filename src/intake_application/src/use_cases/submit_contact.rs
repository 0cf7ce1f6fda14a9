use intake_core::{Contact, ContactStore, ContactStoreError, NewContact};

/// Error types specific to the submit-contact use case
#[derive(Debug, thiserror::Error)]
pub enum SubmitContactError {
    #[error("Contact store error: {0}")]
    Store(#[from] ContactStoreError),
}

/// Submit-contact use case - persists a validated contact entry for an
/// authenticated user
pub struct SubmitContactUseCase<'a, C>
where
    C: ContactStore,
{
    contact_store: &'a C,
}

impl<'a, C> SubmitContactUseCase<'a, C>
where
    C: ContactStore,
{
    pub fn new(contact_store: &'a C) -> Self {
        Self { contact_store }
    }

    /// Execute the submit-contact use case
    ///
    /// # Arguments
    /// * `contact` - Validated, trimmed entry already scoped to the owning
    ///   user id taken from the caller's session
    ///
    /// # Returns
    /// The persisted contact, or an error if nothing was written.
    #[tracing::instrument(
        name = "SubmitContactUseCase::execute",
        skip(self, contact),
        fields(user_id = contact.user_id)
    )]
    pub async fn execute(&self, contact: NewContact) -> Result<Contact, SubmitContactError> {
        Ok(self.contact_store.insert_contact(contact).await?)
    }
}
