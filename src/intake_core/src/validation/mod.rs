pub mod policy;
pub mod rules;

pub use policy::FieldErrors;
