//! # reversevibe-auth
//!
//! Authentication and authorization for ReverseVibe.
//!
//! ## Modules
//!
//! - `jwt` — token issuance and verification under one shared secret
//! - `password` — low work-factor Argon2 hashing
//! - `credentials` — the user lookup and password check the rest of the layer consumes
//! - `session` — bearer token resolution and the registration/login flow
//! - `gate` — role gates applied per route

pub mod credentials;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::{CredentialStore, UserCredentialStore};
pub use gate::{GateDecision, RoleGate};
pub use jwt::{Claims, TokenCodec};
pub use password::PasswordHasher;
pub use session::{AuthOutcome, Session, SessionManager, SessionResolver};

/// Message returned when no usable bearer token is presented or a gate denies.
pub const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// Message returned when a bearer token fails verification.
pub const TOKEN_NOT_VALID: &str = "Token is not valid";

/// Message returned when login fails for any reason.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
