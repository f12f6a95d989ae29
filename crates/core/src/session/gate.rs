//! Session gate
//!
//! Decides whether protected operations may run. Each activation walks a
//! small state machine exactly once:
//!
//! ```text
//!            no credential
//! Checking ─────────────────────────────► Denied
//!    │
//!    │ credential present → probe backend
//!    ├── 2xx ───────────────────────────► Authorized
//!    └── non-2xx / network error
//!              clear credential ────────► Denied
//! ```
//!
//! Protected work only starts once the activation has reached `Authorized`.
//! Observers can follow the state through [`GateActivation::subscribe`] to
//! render a neutral loading indicator while the probe is in flight.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{watch, OnceCell};
use tracing::{debug, info, warn};

use super::context::SessionContext;
use super::ports::{CredentialProbe, ProbeFailure};

/// Why an activation was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Nothing stored (or the store could not be read)
    MissingCredential,
    /// The backend answered with a non-2xx status
    Rejected { status: u16 },
    /// The probe never got an answer
    Unreachable(String),
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => f.write_str("not signed in"),
            Self::Rejected { status } => write!(f, "session rejected by backend ({status})"),
            Self::Unreachable(reason) => write!(f, "could not verify session: {reason}"),
        }
    }
}

impl From<ProbeFailure> for DenyReason {
    fn from(value: ProbeFailure) -> Self {
        match value {
            ProbeFailure::Rejected { status } => Self::Rejected { status },
            ProbeFailure::Unreachable(reason) => Self::Unreachable(reason),
        }
    }
}

/// Gate state for one activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Authorized,
    Denied(DenyReason),
}

impl GateState {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Checking)
    }
}

/// Outcome of running protected work behind the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The gate authorized the session and the protected work ran
    Rendered(T),
    /// The gate denied the session; the caller must send the user to login
    Redirected(DenyReason),
}

impl<T> Guarded<T> {
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Factory for gate activations
#[derive(Clone)]
pub struct SessionGate {
    session: SessionContext,
    probe: Arc<dyn CredentialProbe>,
}

impl SessionGate {
    pub fn new(session: SessionContext, probe: Arc<dyn CredentialProbe>) -> Self {
        Self { session, probe }
    }

    /// Start a fresh activation (one per navigation into protected content).
    pub fn activate(&self) -> GateActivation {
        let (state_tx, _) = watch::channel(GateState::Checking);
        GateActivation {
            session: self.session.clone(),
            probe: Arc::clone(&self.probe),
            state_tx,
            outcome: OnceCell::new(),
        }
    }

    /// Activate and resolve in one step.
    pub async fn check(&self) -> GateState {
        self.activate().resolve().await.clone()
    }

    /// Run `protected` only if a fresh activation authorizes the session.
    pub async fn guard<F, Fut, T>(&self, protected: F) -> Guarded<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.activate().run(protected).await
    }
}

/// One pass through the gate state machine.
///
/// The check runs at most once per activation no matter how often
/// [`GateActivation::resolve`] is awaited. Dropping the activation (or the
/// future resolving it) before the probe finishes discards the result and
/// leaves the stored credential untouched.
pub struct GateActivation {
    session: SessionContext,
    probe: Arc<dyn CredentialProbe>,
    state_tx: watch::Sender<GateState>,
    outcome: OnceCell<GateState>,
}

impl GateActivation {
    /// Follow state transitions (starts at `Checking`).
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state_tx.subscribe()
    }

    /// Current state without waiting.
    pub fn state(&self) -> GateState {
        self.state_tx.borrow().clone()
    }

    /// Drive the check to a terminal state.
    pub async fn resolve(&self) -> &GateState {
        self.outcome.get_or_init(|| self.evaluate()).await
    }

    /// Resolve, then run `protected` only when authorized.
    pub async fn run<F, Fut, T>(&self, protected: F) -> Guarded<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.resolve().await {
            GateState::Authorized => Guarded::Rendered(protected().await),
            GateState::Denied(reason) => Guarded::Redirected(reason.clone()),
            GateState::Checking => {
                Guarded::Redirected(DenyReason::Unreachable("gate did not resolve".into()))
            }
        }
    }

    async fn evaluate(&self) -> GateState {
        let state = self.decide().await;
        self.state_tx.send_replace(state.clone());
        state
    }

    async fn decide(&self) -> GateState {
        let credential = match self.session.credential().await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!("no stored credential; denying");
                return GateState::Denied(DenyReason::MissingCredential);
            }
            Err(err) => {
                warn!(error = %err, "session store unreadable; denying");
                return GateState::Denied(DenyReason::MissingCredential);
            }
        };

        match self.probe.probe(&credential).await {
            Ok(()) => {
                info!("session verified");
                GateState::Authorized
            }
            Err(failure) => {
                info!(reason = %failure, "session verification failed; clearing credential");
                if let Err(err) = self.session.sign_out().await {
                    warn!(error = %err, "failed to clear rejected credential");
                }
                GateState::Denied(failure.into())
            }
        }
    }
}
