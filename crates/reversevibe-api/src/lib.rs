//! # reversevibe-api
//!
//! HTTP API layer for ReverseVibe built on Axum.
//!
//! Every route is declared once in the access table in [`router`], which
//! decides whether the session resolver and a role gate run before the
//! handler. Handlers read the resolved session through
//! [`extractors::CurrentSession`].

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, prepare_state, serve};
pub use router::{RouteAccess, RouteRule, access_table};
pub use state::AppState;
