//! Layered configuration assembled from property sources at startup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;
use super::keys::format_key;
use super::source::PropertySource;

/// Base filename for the properties file.
pub const BASE_FILENAME: &str = "app.properties";

/// Property key that selects the environment from inside the base file.
pub const ENVIRONMENT_KEY: &str = "commons.environment";

/// Process environment variable that overrides [`ENVIRONMENT_KEY`].
pub const ENVIRONMENT_VAR: &str = "COMMONS_ENVIRONMENT";

/// One consistent, typed view over property values assembled from multiple
/// sources with a defined precedence.
///
/// Constructed once by the application's startup sequence and handed to
/// consumers by reference; the mapping never changes after [`load`] returns.
///
/// Sources are applied in the given order and later sources override earlier
/// ones for colliding keys, so the standard chain is
/// `&[&EmbeddedSource::new(..), &DirSource::working_dir()]`: a file next to
/// the process wins over the same file bundled into the binary. When an
/// environment is resolved (the [`ENVIRONMENT_VAR`] process variable, or the
/// [`ENVIRONMENT_KEY`] entry of the base file), `{environment}_app.properties`
/// is overlaid over the base entries through the same source chain, so
/// environment-specific values win over base values at any location.
///
/// [`load`]: Configuration::load
#[derive(Debug, Clone)]
pub struct Configuration {
    properties: HashMap<String, String>,
    environment: Option<String>,
}

impl Configuration {
    /// Load and merge all sources. Never fails: missing files are skipped and
    /// unreadable ones are logged, keeping whatever was already accumulated.
    pub fn load(sources: &[&dyn PropertySource]) -> Self {
        let mut properties = HashMap::new();
        overlay(&mut properties, sources, BASE_FILENAME);

        let environment = std::env::var(ENVIRONMENT_VAR)
            .ok()
            .or_else(|| properties.get(ENVIRONMENT_KEY).cloned())
            .filter(|env| !env.is_empty());

        if let Some(env) = &environment {
            overlay(&mut properties, sources, &format!("{}_{}", env, BASE_FILENAME));
        }

        Self { properties, environment }
    }

    /// The resolved environment, if any.
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Get a value parsed as `T`. Fails when the key is absent or the value
    /// does not parse.
    pub fn get<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value =
            self.properties.get(key).ok_or_else(|| ConfigError::Missing(key.to_string()))?;
        parse_value(key, value)
    }

    /// Get a value parsed as `T`, or `default` when the key is absent.
    ///
    /// A present-but-malformed value still fails; the default only covers
    /// absence.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.properties.get(key) {
            Some(value) => parse_value(key, value),
            None => Ok(default),
        }
    }

    /// [`get`](Configuration::get) with positional arguments interpolated
    /// into the key template first (see [`format_key`]).
    pub fn get_at<T>(&self, template: &str, args: &[&dyn fmt::Display]) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get(&format_key(template, args))
    }

    /// [`get_or`](Configuration::get_or) with positional arguments
    /// interpolated into the key template first.
    pub fn get_at_or<T>(
        &self,
        template: &str,
        args: &[&dyn fmt::Display],
        default: T,
    ) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get_or(&format_key(template, args), default)
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.properties.get(key).cloned().ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.properties.get(key).cloned().unwrap_or_else(|| default.to_string())
    }

    pub fn get_integer(&self, key: &str) -> Result<i32, ConfigError> {
        self.get(key)
    }

    pub fn get_integer_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_long(&self, key: &str) -> Result<i64, ConfigError> {
        self.get(key)
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_double(&self, key: &str) -> Result<f64, ConfigError> {
        self.get(key)
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_boolean(&self, key: &str) -> Result<bool, ConfigError> {
        self.get(key)
    }

    pub fn get_boolean_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.get_or(key, default)
    }

    /// Comma-separated list of trimmed strings. A missing key is an empty
    /// list, never a failure.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.properties.get(key) {
            Some(value) => value.split(',').map(|segment| segment.trim().to_string()).collect(),
            None => Vec::new(),
        }
    }

    /// Comma-separated list with each trimmed segment parsed as `T`. A
    /// missing key is an empty list; a malformed segment is a parse failure.
    pub fn get_list<T>(&self, key: &str) -> Result<Vec<T>, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let Some(value) = self.properties.get(key) else {
            return Ok(Vec::new());
        };
        value.split(',').map(str::trim).map(|segment| parse_value(key, segment)).collect()
    }

    pub fn get_integer_list(&self, key: &str) -> Result<Vec<i32>, ConfigError> {
        self.get_list(key)
    }

    pub fn get_double_list(&self, key: &str) -> Result<Vec<f64>, ConfigError> {
        self.get_list(key)
    }

    pub fn get_boolean_list(&self, key: &str) -> Result<Vec<bool>, ConfigError> {
        self.get_list(key)
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: &[(&str, &str)]) -> Self {
        let properties =
            entries.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect();
        Self { properties, environment: None }
    }
}

fn overlay(
    properties: &mut HashMap<String, String>,
    sources: &[&dyn PropertySource],
    filename: &str,
) {
    for source in sources {
        match source.load(filename) {
            Ok(Some(entries)) => {
                for (key, value) in entries {
                    properties.insert(key, value);
                }
            }
            Ok(None) => {
                tracing::debug!("no properties file named {} in {}", filename, source.describe());
            }
            Err(err) => {
                tracing::error!(
                    "error reading properties file {} from {}: {}",
                    filename,
                    source.describe(),
                    err
                );
            }
        }
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::Parse {
        key: key.to_string(),
        value: value.to_string(),
        target: std::any::type_name::<T>(),
        details: err.to_string(),
    })
}
