pub mod config;
pub mod hashing;
pub mod persistence;
pub mod session;

// Re-export commonly used adapters for convenience
pub use config::settings::Settings;
pub use hashing::argon2_hasher::Argon2Hasher;
pub use persistence::{memory_store::MemoryStore, postgres_store::PostgresStore};
pub use session::{
    csrf::{CsrfError, CsrfPair, CsrfProtect},
    manager::{SessionConfig, SessionManager, SessionTokenError},
};
