//! Axum integration for the intake application.
//!
//! Thin HTTP handlers over the framework-agnostic use cases: extract form
//! data, run the CSRF check and form policy, call the use case, convert the
//! result into a redirect-with-flash or a re-rendered form. The
//! [`extract::AuthenticatedUser`] extractor is the auth gate in front of
//! every protected handler.

pub mod extract;
pub mod flash;
pub mod routes;
pub mod state;
pub mod templates;

// Re-export for convenience
pub use extract::AuthenticatedUser;
pub use flash::Flash;
pub use routes::router;
pub use state::AppState;
