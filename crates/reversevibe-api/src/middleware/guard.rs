//! Per-route access enforcement.
//!
//! Each route carries a [`RouteAccess`] value. The guard runs the session
//! resolver and role gate it names, in that order, and stores the resolved
//! [`Session`] in the request extensions for the handler.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use reversevibe_auth::{RoleGate, Session};
use reversevibe_core::error::AppError;

use crate::state::AppState;

/// What must succeed before a route's handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Nothing.
    Public,
    /// The session resolver.
    Authenticated,
    /// The session resolver, then the gate.
    Gated(RoleGate),
    /// The gate alone. No identity is ever attached, so this always denies.
    GateOnly(RoleGate),
}

impl RouteAccess {
    /// Whether the session resolver runs for this route.
    pub fn resolves_session(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Gated(_))
    }

    /// The gate applied after resolution, if any.
    pub fn gate(&self) -> Option<RoleGate> {
        match self {
            Self::Gated(gate) | Self::GateOnly(gate) => Some(*gate),
            Self::Public | Self::Authenticated => None,
        }
    }
}

/// State handed to [`enforce`] for one route.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    /// Shared application state.
    pub state: AppState,
    /// Access rule for the guarded route.
    pub access: RouteAccess,
}

/// Applies the route's access rule, short-circuiting with the first error.
pub async fn enforce(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if guard.access.resolves_session() {
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let session = guard
            .state
            .resolver
            .authenticate(authorization.as_deref())
            .await?;
        request.extensions_mut().insert(session);
    }

    if let Some(gate) = guard.access.gate() {
        let identity = request
            .extensions()
            .get::<Session>()
            .and_then(Session::identity);
        gate.authorize(identity)?;
    }

    Ok(next.run(request).await)
}
