//! Session state and the context object that owns it.
//!
//! ARCHITECTURE
//! ============
//! The backend is the only source of truth for who is logged in. The state
//! here mirrors the latest session-check answer and starts out logged out on
//! every page load; nothing is persisted or derived from local tokens.
//!
//! ORDERING
//! ========
//! Each navigation takes a [`CheckTicket`] before it issues its request.
//! Only the newest ticket may write, so a slow response from an earlier
//! navigation cannot overwrite the answer to a later one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Display name used while no session is confirmed.
pub const NOT_LOGGED_IN: &str = "Not logged in";

// =============================================================================
// STATE
// =============================================================================

/// Current login identity and role as last reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub is_admin: bool,
    pub user_name: String,
}

impl SessionState {
    /// The logged-out defaults.
    #[must_use]
    pub fn logged_out() -> Self {
        Self { is_logged_in: false, is_admin: false, user_name: NOT_LOGGED_IN.to_owned() }
    }

    /// Apply an update in place.
    pub fn apply(&mut self, update: SessionUpdate) {
        match update {
            SessionUpdate::Confirmed { user_name, is_admin } => {
                self.is_logged_in = true;
                self.user_name = user_name;
                if let Some(is_admin) = is_admin {
                    self.is_admin = is_admin;
                }
            }
            SessionUpdate::Reset => *self = Self::logged_out(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::logged_out()
    }
}

/// The two ways a session check can change the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The backend confirmed a session. `is_admin: None` leaves the admin
    /// flag as it was.
    Confirmed { user_name: String, is_admin: Option<bool> },
    /// The check failed; fall back to logged-out defaults.
    Reset,
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Sequence number handed out per session check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CheckTicket(u64);

impl CheckTicket {
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    issued: u64,
}

/// Shared handle to the session state. Clones point at the same state.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    inner: Arc<Mutex<Inner>>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session check, superseding every earlier one.
    #[must_use]
    pub fn begin_check(&self) -> CheckTicket {
        let mut inner = self.lock();
        inner.issued += 1;
        CheckTicket(inner.issued)
    }

    /// Whether `ticket` is still the newest check.
    #[must_use]
    pub fn is_current(&self, ticket: CheckTicket) -> bool {
        self.lock().issued == ticket.0
    }

    /// Write the outcome of a check. Returns `false` (and changes nothing)
    /// when a newer check has been issued since `ticket`.
    pub fn apply(&self, ticket: CheckTicket, update: SessionUpdate) -> bool {
        let mut inner = self.lock();
        if inner.issued != ticket.0 {
            return false;
        }
        inner.state.apply(update);
        true
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }
}
