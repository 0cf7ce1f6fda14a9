/// The identity bound to an authenticated session.
///
/// This is everything a request handler may learn about the caller; it is
/// produced by the session manager from a valid session token and carried
/// explicitly through handlers rather than read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
}
