//! Reusable UI components shared across pages.

pub mod notice_bar;
pub mod session_badge;
