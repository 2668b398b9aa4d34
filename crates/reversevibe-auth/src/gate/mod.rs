//! Role gates.

pub mod role_gate;

pub use role_gate::{GateDecision, RoleGate};
