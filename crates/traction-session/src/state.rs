//! Session lifecycle state machine.

use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::error::SessionError;

/// Lifecycle states for a streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No stream is active. Accumulated results from the previous run remain
    /// readable until the next stream starts.
    Idle,
    /// Chunks are being consumed, buffered, and scanned.
    Streaming,
    /// A stop was requested; the source is draining before the final pass.
    Stopping,
}

impl SessionState {
    /// Whether the transition to `target` is allowed.
    ///
    /// The lifecycle is a strict cycle: Idle -> Streaming -> Stopping -> Idle.
    /// Self-transitions are rejected.
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Streaming)
                | (SessionState::Streaming, SessionState::Stopping)
                | (SessionState::Stopping, SessionState::Idle)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Streaming => write!(f, "Streaming"),
            SessionState::Stopping => write!(f, "Stopping"),
        }
    }
}

/// Thread-safe wrapper around the session state.
///
/// Clones share the same underlying state, so one handle can drive the
/// stream loop while another observes or requests transitions.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<SessionState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::Idle)),
        }
    }

    /// Current state.
    pub fn current(&self) -> SessionState {
        *self.state.lock().expect("Session state mutex poisoned")
    }

    /// Attempt a transition, rejecting anything outside the lifecycle cycle.
    pub fn transition(&self, target: SessionState) -> Result<(), SessionError> {
        let mut state = self.state.lock().expect("Session state mutex poisoned");
        if !state.can_transition_to(target) {
            return Err(SessionError::InvalidTransition(*state, target));
        }
        debug!(from = %state, to = %target, "Session state transition");
        *state = target;
        Ok(())
    }

    /// Force the state back to Idle regardless of the current state.
    ///
    /// This is the escape hatch for a source that refuses to drain: any
    /// in-flight work is abandoned rather than completed.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("Session state mutex poisoned");
        if *state != SessionState::Idle {
            warn!(from = %state, "Forcing session state back to Idle");
        }
        *state = SessionState::Idle;
    }
}
