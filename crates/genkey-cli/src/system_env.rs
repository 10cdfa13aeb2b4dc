//! Production Environment implementation using the process environment.
//!
//! `SystemEnv` reads real environment variables. Values are returned as
//! `OsString` so non-UTF-8 paths survive the lookup untouched.

use std::ffi::OsString;

use crate::env::Environment;

/// Production environment backed by `std::env`.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::disallowed_methods)]
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_env_sees_path() {
        // PATH is set in every environment the test suite runs in
        let env = SystemEnv::new();
        assert!(env.var_os("PATH").is_some());
    }

    #[test]
    fn system_env_misses_unset_variable() {
        let env = SystemEnv::new();
        assert_eq!(env.var_os("GENKEY_TEST_VARIABLE_THAT_IS_NEVER_SET"), None);
    }
}
