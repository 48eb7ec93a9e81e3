//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so views depend on small focused models:
//! `session` is written only by the navigation guard, `notices` only by the
//! browser notifier.

pub mod notices;
pub mod session;
