pub mod login;
pub mod provision_user;
pub mod submit_contact;
