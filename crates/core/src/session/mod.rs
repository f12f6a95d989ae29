//! Session handling: credential storage ports, the session context shared by
//! the API client and the gate, and the gate itself.

pub mod context;
pub mod credential;
pub mod gate;
pub mod jwt;
pub mod ports;

pub use context::SessionContext;
pub use credential::Credential;
pub use gate::{DenyReason, GateActivation, GateState, Guarded, SessionGate};
pub use jwt::TokenClaims;
pub use ports::{CredentialProbe, ProbeFailure, SessionStore};
