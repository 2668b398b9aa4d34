//! Role gate decisions over the identity attached to a request.
//!
//! A gate never checks whether the session resolver ran. Without an
//! identity it simply denies.

use tracing::debug;

use reversevibe_core::error::AppError;
use reversevibe_entity::{User, UserRole};

use crate::NOT_AUTHORIZED;

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Request may proceed.
    Allow,
    /// Request is refused with 403.
    Deny,
}

/// Which identities a gate lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleGate {
    /// Role must be admin.
    Administrator,
    /// Role must be moderator or admin.
    ModeratorOrAdministrator,
    /// Any role value at all, as long as the field is set.
    RoleFieldPresent,
}

impl RoleGate {
    /// Decides over the attached identity, if any.
    pub fn decide(&self, identity: Option<&User>) -> GateDecision {
        let role = identity.and_then(|user| user.role);
        match (self, role) {
            (Self::Administrator, Some(UserRole::Admin)) => GateDecision::Allow,
            (Self::ModeratorOrAdministrator, Some(UserRole::Moderator | UserRole::Admin)) => {
                GateDecision::Allow
            }
            (Self::RoleFieldPresent, Some(_)) => GateDecision::Allow,
            _ => GateDecision::Deny,
        }
    }

    /// Like [`RoleGate::decide`], mapping denial to a `Forbidden` error.
    pub fn authorize(&self, identity: Option<&User>) -> Result<(), AppError> {
        let decision = self.decide(identity);
        debug!(
            gate = self.as_str(),
            identity_present = identity.is_some(),
            ?decision,
            "Role gate evaluated"
        );
        match decision {
            GateDecision::Allow => Ok(()),
            GateDecision::Deny => Err(AppError::forbidden(NOT_AUTHORIZED)),
        }
    }

    /// Short name used in logs and the access table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::ModeratorOrAdministrator => "moderator-or-administrator",
            Self::RoleFieldPresent => "role-field-present",
        }
    }
}
