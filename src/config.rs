//! Environment-backed configuration with bundled defaults.
//!
//! Every variable has a default; a non-empty value in the process
//! environment overrides it. Values are resolved once, when the
//! configuration is loaded.

use std::collections::BTreeMap;

/// Deployment environment name, e.g. `production`.
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";

/// Minimum level token, e.g. `info` or `warning`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Build version of the running application.
pub const VERSION_ENV: &str = "VERSION";

/// Defaults shipped with the crate. Caller-supplied defaults take precedence.
pub const BUNDLED_DEFAULTS: [(&str, &str); 3] = [
    (ENVIRONMENT_ENV, "dev"),
    (LOG_LEVEL_ENV, "debug"),
    (VERSION_ENV, "detached"),
];

/// Source of resolved configuration values.
pub trait ConfigProvider: Send + Sync {
    /// Resolved value for `key`, or an empty string when the key is unknown.
    fn get(&self, key: &str) -> String;
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config {key} = {value:?} is not an integer")]
    NotAnInteger { key: String, value: String },

    #[error("config {key} = {value:?} is not a float")]
    NotAFloat { key: String, value: String },
}

/// Configuration resolved from environment variables and defaults.
///
/// Values can be read back under the variable name (`LOG_LEVEL`) or its
/// camelCase alias (`logLevel`).
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    values: BTreeMap<String, String>,
}

impl EnvConfig {
    /// Bundled variables only.
    pub fn load_bundled() -> Self {
        Self::load(BTreeMap::new())
    }

    /// Caller defaults merged over the bundled ones, resolved against the
    /// process environment.
    pub fn load(defaults: BTreeMap<String, String>) -> Self {
        Self::load_with(defaults, |key| std::env::var(key).ok())
    }

    /// Same as [`EnvConfig::load`] with an explicit environment lookup.
    pub fn load_with<F>(mut defaults: BTreeMap<String, String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, value) in BUNDLED_DEFAULTS {
            defaults
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }

        let values = defaults
            .into_iter()
            .map(|(key, default)| {
                let value = lookup(&key).filter(|v| !v.is_empty()).unwrap_or(default);
                (to_camel_case(&key), value)
            })
            .collect();

        EnvConfig { values }
    }

    fn lookup(&self, key: &str) -> Option<&String> {
        self.values
            .get(key)
            .or_else(|| self.values.get(&to_camel_case(key)))
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        let value = self.get(key);
        value.trim().parse().map_err(|_| ConfigError::NotAnInteger {
            key: key.to_string(),
            value,
        })
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, ConfigError> {
        let value = self.get(key);
        value.trim().parse().map_err(|_| ConfigError::NotAFloat {
            key: key.to_string(),
            value,
        })
    }
}

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(key, "unexpected config key, returning empty string");
                String::new()
            }
        }
    }
}

/// `MY_ENV_VAR` -> `myEnvVar`.
fn to_camel_case(s: &str) -> String {
    let mut camelized = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for ch in s.trim().to_lowercase().chars() {
        match ch {
            'a'..='z' if capitalize_next => {
                camelized.push(ch.to_ascii_uppercase());
                capitalize_next = false;
            }
            'a'..='z' => camelized.push(ch),
            '_' | ' ' | '-' => capitalize_next = true,
            _ => {}
        }
    }

    camelized
}
