use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use intake_core::{ContactStore, CredentialHasher, UserStore};

use crate::{
    flash::{self, Flash},
    state::AppState,
};

/// Clears the session cookie unconditionally. Logging out without being
/// logged in is a no-op that still redirects to the login page.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, C, H>(State(state): State<AppState<U, C, H>>) -> Response
where
    U: UserStore + Clone,
    C: ContactStore + Clone,
    H: CredentialHasher + Clone,
{
    let jar = CookieJar::new()
        .add(state.sessions.destroy())
        .add(flash::cookie(&Flash::success("You have been logged out")));
    (jar, Redirect::to("/login")).into_response()
}
