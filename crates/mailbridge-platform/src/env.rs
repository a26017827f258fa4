//! Environment variable access behind a trait.
//!
//! The registry and config loader resolve XDG directories, locales, and
//! override paths from environment variables. Routing those reads through
//! [`Environment`] keeps tests hermetic: fixtures inject a map instead of
//! mutating process-global state.

use std::collections::HashMap;

/// Read access to environment-style key-value configuration.
pub trait Environment: Send + Sync {
    /// Get the value of a variable, or `None` if it is unset.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// Native implementation backed by [`std::env`].
pub struct NativeEnvironment;

impl Environment for NativeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory environment for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// An environment with no variables set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder-style.
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for MapEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
