//! Route name → view factory registry.
//!
//! Views are produced on demand: registering a factory does not run it, and
//! each `resolve` call produces a fresh view. The registry is generic over
//! the view type so it can hold Leptos `AnyView`s in the app and plain
//! values in tests.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::table::RouteName;

type Factory<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Lazily-resolved views keyed by route name.
pub struct ViewRegistry<V> {
    factories: HashMap<RouteName, Factory<V>>,
}

impl<V> ViewRegistry<V> {
    #[must_use]
    pub fn new() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Register (or replace) the factory for `name`.
    #[must_use]
    pub fn with(mut self, name: RouteName, factory: impl Fn() -> V + Send + Sync + 'static) -> Self {
        self.factories.insert(name, Arc::new(factory));
        self
    }

    #[must_use]
    pub fn contains(&self, name: RouteName) -> bool {
        self.factories.contains_key(&name)
    }

    /// Route names that have no factory yet.
    #[must_use]
    pub fn missing(&self) -> Vec<RouteName> {
        RouteName::ALL.into_iter().filter(|n| !self.contains(*n)).collect()
    }

    /// Produce the view for `name`, or `None` if nothing is registered.
    #[must_use]
    pub fn resolve(&self, name: RouteName) -> Option<V> {
        self.factories.get(&name).map(|factory| factory())
    }
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ViewRegistry<V> {
    fn clone(&self) -> Self {
        Self { factories: self.factories.clone() }
    }
}

impl<V> fmt::Debug for ViewRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort();
        f.debug_struct("ViewRegistry").field("routes", &names).finish()
    }
}
