//! Navigation guard: re-checks the backend session before every route
//! transition and decides whether the transition may proceed.
//!
//! ARCHITECTURE
//! ============
//! One guard instance serves every navigation. For each one it takes a
//! [`CheckTicket`], issues exactly one session check, writes the outcome into
//! the shared [`SessionContext`] and returns a [`Decision`]. The check is
//! never retried and never cached: a failure means "not logged in" for this
//! navigation only.
//!
//! POLICIES
//! ========
//! `AdminAware` records the admin flag, enforces admin-only routes and uses
//! blocking alerts. `Lenient` leaves the admin flag untouched on success,
//! never gates on admin and uses non-blocking notices. Both redirect to
//! `/login` when a session-requiring route fails its check.
//!
//! ORDERING
//! ========
//! If a newer navigation has started by the time a check resolves, the older
//! result is dropped without touching session state and the navigation is
//! reported as [`Decision::Superseded`].

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::str::FromStr;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::net::types::CurrentSession;
use crate::notify::{Feedback, Notifier};
use crate::routes::{LOGIN_PATH, RouteMatch, RouteTable};
use crate::state::session::{SessionContext, SessionUpdate};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in first";
pub const ADMIN_REQUIRED_MESSAGE: &str = "Insufficient permissions, please log in with an administrator account";

// =============================================================================
// SEAMS
// =============================================================================

/// Source of truth for the current session.
#[async_trait(?Send)]
pub trait SessionCheck {
    /// Ask the backend who is logged in.
    ///
    /// # Errors
    ///
    /// Any error means "not logged in"; the guard does not distinguish kinds.
    async fn check_session(&self) -> Result<CurrentSession, ApiError>;
}

/// Which guard behavior is in force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardPolicy {
    #[default]
    AdminAware,
    Lenient,
}

impl GuardPolicy {
    fn feedback(self, message: &str) -> Feedback {
        match self {
            Self::AdminAware => Feedback::Alert(message.to_owned()),
            Self::Lenient => Feedback::Notice(message.to_owned()),
        }
    }
}

impl FromStr for GuardPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "admin_aware" => Ok(Self::AdminAware),
            "lenient" => Ok(Self::Lenient),
            other => Err(other.to_owned()),
        }
    }
}

/// Outcome of guarding one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Proceed to the target.
    Allow,
    /// Abandon the target and navigate here instead.
    Redirect(String),
    /// A newer navigation started first; this one must not act.
    Superseded,
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(to) => Some(to.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// GUARD
// =============================================================================

pub struct NavigationGuard<C, N> {
    checker: C,
    notifier: N,
    session: SessionContext,
    table: RouteTable,
    policy: GuardPolicy,
}

impl<C, N> NavigationGuard<C, N>
where
    C: SessionCheck,
    N: Notifier,
{
    #[must_use]
    pub fn new(checker: C, notifier: N, session: SessionContext, table: RouteTable, policy: GuardPolicy) -> Self {
        Self { checker, notifier, session, table, policy }
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    #[must_use]
    pub fn checker(&self) -> &C {
        &self.checker
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Resolve both paths against the route table and guard the transition.
    pub async fn guard_path(&self, to: &str, from: Option<&str>) -> Decision {
        let to = self.table.resolve(to);
        let from = from.map(|p| self.table.resolve(p));
        self.before_each(&to, from.as_ref()).await
    }

    /// Guard a transition from `from` (none on first load) to `to`.
    pub async fn before_each(&self, to: &RouteMatch, from: Option<&RouteMatch>) -> Decision {
        let ticket = self.session.begin_check();
        let from_path = from.map_or("", |m| m.path.as_str());
        tracing::debug!(to = %to.path, from = from_path, seq = ticket.sequence(), "checking session");

        match self.checker.check_session().await {
            Ok(current) => {
                let is_admin = current.is_admin;
                let update = SessionUpdate::Confirmed {
                    user_name: current.username,
                    is_admin: match self.policy {
                        GuardPolicy::AdminAware => Some(is_admin),
                        GuardPolicy::Lenient => None,
                    },
                };
                if !self.session.apply(ticket, update) {
                    tracing::debug!(to = %to.path, seq = ticket.sequence(), "session check superseded");
                    return Decision::Superseded;
                }

                if self.policy == GuardPolicy::AdminAware && !is_admin && to.requires_admin_auth() {
                    tracing::info!(to = %to.path, "admin route refused");
                    return self.refuse(to, ADMIN_REQUIRED_MESSAGE);
                }
                Decision::Allow
            }
            Err(error) => {
                tracing::warn!(%error, to = %to.path, "session check failed");
                if !self.session.apply(ticket, SessionUpdate::Reset) {
                    tracing::debug!(to = %to.path, seq = ticket.sequence(), "session check superseded");
                    return Decision::Superseded;
                }

                if to.requires_auth() {
                    return self.refuse(to, LOGIN_REQUIRED_MESSAGE);
                }
                Decision::Allow
            }
        }
    }

    fn refuse(&self, to: &RouteMatch, message: &str) -> Decision {
        // Never bounce the login page onto itself.
        if to.is_login() {
            return Decision::Allow;
        }
        self.notifier.notify(self.policy.feedback(message));
        Decision::Redirect(LOGIN_PATH.to_owned())
    }
}
