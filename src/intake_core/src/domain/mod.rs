pub mod contact;
pub mod session_user;
pub mod user;
