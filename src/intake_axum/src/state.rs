use axum::extract::FromRef;

use intake_adapters::{CsrfProtect, SessionManager};
use intake_core::{ContactStore, CredentialHasher, UserStore};

/// Request-scoped application state.
///
/// Handlers receive everything they touch through this value; nothing is
/// read from ambient global storage.
#[derive(Clone)]
pub struct AppState<U, C, H>
where
    U: UserStore + Clone,
    C: ContactStore + Clone,
    H: CredentialHasher + Clone,
{
    pub users: U,
    pub contacts: C,
    pub hasher: H,
    pub sessions: SessionManager,
    pub csrf: CsrfProtect,
}

impl<U, C, H> FromRef<AppState<U, C, H>> for SessionManager
where
    U: UserStore + Clone,
    C: ContactStore + Clone,
    H: CredentialHasher + Clone,
{
    fn from_ref(state: &AppState<U, C, H>) -> Self {
        state.sessions.clone()
    }
}
