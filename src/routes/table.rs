//! Static route table with per-route guard metadata.
//!
//! The table is built once at startup and never mutated afterwards. Lookup
//! is an exact path match after normalization; nested routes are not used,
//! so a match carries at most one record, but callers still treat it as a
//! chain so metadata checks read "any matched record requires ...".

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::fmt;
use std::str::FromStr;

/// Where the guard sends navigations it refuses.
pub const LOGIN_PATH: &str = "/login";

// =============================================================================
// ROUTE NAME
// =============================================================================

/// Identifier of every route the shell knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteName {
    Home,
    Login,
    Register,
    Start,
    Param,
    Train,
    TrainFinish,
    Test,
}

impl RouteName {
    pub const ALL: [RouteName; 8] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::Start,
        Self::Param,
        Self::Train,
        Self::TrainFinish,
        Self::Test,
    ];

    /// Stable lowercase identifier, also accepted by `FromStr`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Start => "start",
            Self::Param => "param",
            Self::Train => "train",
            Self::TrainFinish => "train_finish",
            Self::Test => "test",
        }
    }

    /// Pages that sit behind the login wall under [`ProtectionProfile::Protected`].
    #[must_use]
    pub fn is_protected_page(self) -> bool {
        matches!(self, Self::Start | Self::Param | Self::Train | Self::TrainFinish | Self::Test)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| wanted.to_owned())
    }
}

// =============================================================================
// ENTRIES
// =============================================================================

/// Guard-relevant metadata attached to a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin_auth: bool,
    pub title: &'static str,
}

/// One row of the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: RouteName,
    pub meta: RouteMeta,
}

/// Which of the two deployment variants the table follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProtectionProfile {
    /// No page requires a session.
    Open,
    /// Start/param/train/finish/test pages require a session.
    #[default]
    Protected,
}

impl FromStr for ProtectionProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "protected" => Ok(Self::Protected),
            other => Err(other.to_owned()),
        }
    }
}

const ROUTES: [(&str, RouteName, &str); 8] = [
    ("/", RouteName::Home, "Home"),
    ("/login", RouteName::Login, "Login"),
    ("/register", RouteName::Register, "Register"),
    ("/start", RouteName::Start, "Start"),
    ("/start/param", RouteName::Param, "Parameters"),
    ("/train", RouteName::Train, "Training"),
    ("/train/finish", RouteName::TrainFinish, "Training finished"),
    ("/test", RouteName::Test, "Testing"),
];

// =============================================================================
// TABLE
// =============================================================================

/// Immutable route table consulted by the guard and the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build the application's routes under the given protection profile.
    #[must_use]
    pub fn standard(profile: ProtectionProfile) -> Self {
        let entries = ROUTES
            .iter()
            .map(|&(path, name, title)| RouteEntry {
                path,
                name,
                meta: RouteMeta {
                    requires_auth: profile == ProtectionProfile::Protected && name.is_protected_page(),
                    requires_admin_auth: false,
                    title,
                },
            })
            .collect();
        Self { entries }
    }

    /// Mark the named routes admin-only. Admin-only routes also require a session.
    #[must_use]
    pub fn with_admin_routes(mut self, names: &[RouteName]) -> Self {
        for entry in &mut self.entries {
            if names.contains(&entry.name) {
                entry.meta.requires_admin_auth = true;
                entry.meta.requires_auth = true;
            }
        }
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, name: RouteName) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Match a browser path against the table.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Unknown
    /// paths produce an empty match rather than an error.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let path = normalize_path(path);
        let matched = self.entries.iter().filter(|e| e.path == path).copied().collect();
        RouteMatch { path, matched }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard(ProtectionProfile::default())
    }
}

/// Strip query, fragment and trailing slash; empty paths become `/`.
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = raw[..end].trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

// =============================================================================
// MATCH
// =============================================================================

/// Result of resolving a path: the normalized path plus every matched record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub matched: Vec<RouteEntry>,
}

impl RouteMatch {
    /// The innermost matched route, if any.
    #[must_use]
    pub fn name(&self) -> Option<RouteName> {
        self.matched.last().map(|e| e.name)
    }

    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        self.matched.last().map(|e| e.meta.title)
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|e| e.meta.requires_auth)
    }

    #[must_use]
    pub fn requires_admin_auth(&self) -> bool {
        self.matched.iter().any(|e| e.meta.requires_admin_auth)
    }

    #[must_use]
    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }
}
