//! Route handlers and router assembly.

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use intake_core::{ContactStore, CredentialHasher, UserStore};

pub mod contact;
pub mod error;
pub mod login;
pub mod logout;

pub use error::RouteError;

/// Build the application router over any store/hasher combination.
pub fn router<U, C, H>(state: AppState<U, C, H>) -> Router
where
    U: UserStore + Clone + 'static,
    C: ContactStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    Router::new()
        .route("/", get(index))
        .route(
            "/login",
            get(login::show_login_form::<U, C, H>).post(login::login::<U, C, H>),
        )
        .route(
            "/contact",
            get(contact::show_contact_form::<U, C, H>).post(contact::submit_contact::<U, C, H>),
        )
        .route("/logout", get(logout::logout::<U, C, H>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to("/login")
}

pub(crate) fn render_page<T: Template>(template: &T) -> Result<Html<String>, RouteError> {
    Ok(Html(template.render()?))
}
