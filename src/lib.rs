//! # Intake - Credentialed Contact Intake Library
//!
//! This is a facade crate that re-exports the public APIs of the intake
//! components. Use it to get the whole application surface in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! intake = { path = "../intake" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `User`, `Contact`, `SessionUser`, etc.
//! - **Validation**: `FormPolicy`, `Rule`, `FieldErrors`
//! - **Repository traits**: `UserStore`, `ContactStore`, `CredentialHasher`
//! - **Use cases**: `LoginUseCase`, `SubmitContactUseCase`, `ProvisionUserUseCase`
//! - **Adapters**: `PostgresStore`, `MemoryStore`, `Argon2Hasher`, `SessionManager`, `CsrfProtect`
//! - **HTTP**: `router` and `AppState` - the axum surface of the application

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, validation policies, and port traits
pub mod core {
    pub use intake_core::*;
}

// Re-export most commonly used core types at the root level
pub use intake_core::{
    Contact, FieldErrors, FormPolicy, NewContact, NewUser, Rule, SessionUser, User,
    ValidatedFields,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository and hashing trait definitions
pub mod repositories {
    pub use intake_core::{
        ContactStore, ContactStoreError, CredentialHashError, CredentialHasher, UserStore,
        UserStoreError,
    };
}

// Re-export port traits at root level
pub use intake_core::{
    ContactStore, ContactStoreError, CredentialHashError, CredentialHasher, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use intake_application::*;
}

// Re-export use cases at root level
pub use intake_application::{
    LoginError, LoginUseCase, ProvisionOutcome, ProvisionUserUseCase, SubmitContactError,
    SubmitContactUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use intake_adapters::persistence::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use intake_adapters::hashing::*;
    }

    /// Session and CSRF token management
    pub mod session {
        pub use intake_adapters::session::*;
    }

    /// Configuration
    pub mod config {
        pub use intake_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use intake_adapters::{
    Argon2Hasher, CsrfProtect, MemoryStore, PostgresStore, SessionConfig, SessionManager, Settings,
};

// ============================================================================
// HTTP Surface (Main Entry Point)
// ============================================================================

/// Axum router, application state, and the auth-gate extractor
pub use intake_axum::{AppState, AuthenticatedUser, Flash, router};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
