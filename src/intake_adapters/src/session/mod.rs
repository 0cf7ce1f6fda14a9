pub mod csrf;
pub mod manager;
