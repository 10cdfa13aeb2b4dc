//! Environment abstraction for deterministic testing.
//!
//! Decouples the loader from the process environment. Production reads real
//! variables through [`crate::SystemEnv`]; tests hand the loader a
//! [`MemoryEnv`] so they never touch global process state.

use std::{collections::HashMap, ffi::OsString};

/// Source of indirection variables.
///
/// # Invariants
///
/// - Lookups have no side effects
/// - A variable that is set to an empty string is still set; only an absent
///   variable yields `None`
pub trait Environment: Clone + Send + Sync + 'static {
    /// Value of `key`, or `None` if it is not set.
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// In-memory environment.
///
/// Starts empty. Variables are added with [`MemoryEnv::with_var`].
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: HashMap<String, OsString>,
}

impl MemoryEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Remove `key`.
    #[must_use]
    pub fn without_var(mut self, key: &str) -> Self {
        self.vars.remove(key);
        self
    }
}

impl Environment for MemoryEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_is_none() {
        let env = MemoryEnv::new();
        assert_eq!(env.var_os("MISSING"), None);
    }

    #[test]
    fn empty_value_is_still_set() {
        let env = MemoryEnv::new().with_var("EMPTY", "");
        assert_eq!(env.var_os("EMPTY"), Some(OsString::new()));
    }

    #[test]
    fn later_value_replaces_earlier() {
        let env = MemoryEnv::new().with_var("K", "a").with_var("K", "b");
        assert_eq!(env.var_os("K"), Some(OsString::from("b")));
    }

    #[test]
    fn without_var_removes() {
        let env = MemoryEnv::new().with_var("K", "a").without_var("K");
        assert_eq!(env.var_os("K"), None);
    }
}
