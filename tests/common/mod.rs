//! Shared testing utilities for commons integration tests.

use std::env;
use std::ffi::OsString;

/// Restores an environment variable to its pre-test value on drop.
#[allow(dead_code)]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

#[allow(dead_code)]
impl EnvVarGuard {
    pub fn set<K: Into<String>, V: AsRef<std::ffi::OsStr>>(key: K, value: V) -> Self {
        let key = key.into();
        let original = env::var_os(&key);
        unsafe {
            env::set_var(&key, value);
        }
        Self { key, original }
    }

    pub fn remove<K: Into<String>>(key: K) -> Self {
        let key = key.into();
        let original = env::var_os(&key);
        unsafe {
            env::remove_var(&key);
        }
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original.as_ref() {
            unsafe {
                env::set_var(&self.key, original);
            }
        } else {
            unsafe {
                env::remove_var(&self.key);
            }
        }
    }
}
