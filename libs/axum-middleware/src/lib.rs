//! Request middleware shared by every campus registry service.
//!
//! - [`correlation_id`]: per-request tracing id, inherited or generated,
//!   echoed on every response
//! - [`role_gate`]: bearer-token verification plus role-based route guards
//! - [`test_support`]: helpers for spinning up in-process discovery
//!   endpoints and stub peers in tests

pub mod correlation_id;
pub mod role_gate;
pub mod test_support;

pub use correlation_id::{correlation_id_middleware, CorrelationId, CORRELATION_ID_HEADER};
pub use role_gate::{require_roles, restrict_to_own_data, AuthPrincipal, GateError};
