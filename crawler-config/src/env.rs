//! Environment snapshots and env file parsing
//!
//! Configuration is resolved against an [`EnvSnapshot`] rather than the live
//! process environment. Loading a `.env` file never calls `set_var`: the file
//! is parsed into pairs and merged underneath the snapshot, so variables that
//! are already present keep their value.

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Owned, immutable view of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }

    /// Merge pairs underneath this snapshot
    ///
    /// A pair is only inserted when its key is not already present, even if
    /// the present value is empty. Returns the number of keys added.
    pub fn merge_defaults<I>(&mut self, defaults: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut added = 0;
        for (key, value) in defaults {
            if !self.vars.contains_key(&key) {
                self.vars.insert(key, value);
                added += 1;
            }
        }
        added
    }

    /// Raw value of a variable, including empty strings
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value of a variable, treating empty strings as unset
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Value of a variable or `default` when unset or empty
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.non_empty(key).unwrap_or(default).to_string()
    }

    /// Value of a variable, `None` when unset or empty
    pub fn optional(&self, key: &str) -> Option<String> {
        self.non_empty(key).map(str::to_string)
    }

    /// Parse a variable, falling back to `default` only when it is unset
    ///
    /// A value that is present but does not parse is an error, including the
    /// empty string; it is never replaced by the default.
    pub fn parse_or<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::env(key, format!("cannot parse '{}': {}", raw, e))),
            None => Ok(default),
        }
    }

    /// `true` only when the value equals `"true"` ignoring ASCII case
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Number of variables in the snapshot
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Parse a dotenv-style file into ordered key/value pairs
///
/// Returns `Ok(None)` when the file does not exist. The process environment
/// is not modified.
pub fn read_env_file(path: impl AsRef<Path>) -> ConfigResult<Option<Vec<(String, String)>>> {
    let path = path.as_ref();
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            log::debug!("No env file at {}", path.display());
            return Ok(None);
        }
        Err(dotenvy::Error::Io(e)) => return Err(ConfigError::FileReadError(e)),
        Err(e) => return Err(e.into()),
    };

    let pairs = iter.collect::<Result<Vec<_>, _>>()?;
    log::debug!("Read {} entries from {}", pairs.len(), path.display());
    Ok(Some(pairs))
}
