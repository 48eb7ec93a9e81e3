//! Client-side route definitions.
//!
//! DESIGN
//! ======
//! `table` holds the static path → metadata mapping the navigation guard
//! reads; `registry` holds the view factories the router resolves once a
//! navigation is allowed. The two are keyed by the same [`RouteName`].

pub mod registry;
pub mod table;

pub use registry::ViewRegistry;
pub use table::{LOGIN_PATH, ProtectionProfile, RouteEntry, RouteMatch, RouteMeta, RouteName, RouteTable};
