use crate::config::{ConfigProvider, ENVIRONMENT_ENV, VERSION_ENV};

/// Field name the deployment environment is logged under.
pub const ENVIRONMENT_KEY: &str = "environment";

/// Field name the application version is logged under. Kept distinct from
/// the GELF schema `version` field.
pub const APP_VERSION_KEY: &str = "app_version";

/// Process-wide metadata stamped onto every record.
///
/// Built once while the logger is constructed and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFields {
    environment: String,
    version: String,
}

impl ContextFields {
    pub fn new(environment: impl Into<String>, version: impl Into<String>) -> Self {
        ContextFields {
            environment: environment.into(),
            version: version.into(),
        }
    }

    /// Read `ENVIRONMENT` and `VERSION` from a configuration provider.
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        Self::new(provider.get(ENVIRONMENT_ENV), provider.get(VERSION_ENV))
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for ContextFields {
    fn default() -> Self {
        Self::new("dev", "detached")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfig;
    use std::collections::BTreeMap;

    #[test]
    fn reads_from_provider() {
        let config = EnvConfig::load_with(BTreeMap::new(), |key| match key {
            "ENVIRONMENT" => Some("production".to_string()),
            "VERSION" => Some("1.4.2".to_string()),
            _ => None,
        });
        let context = ContextFields::from_provider(&config);
        assert_eq!(context.environment(), "production");
        assert_eq!(context.version(), "1.4.2");
    }

    #[test]
    fn defaults_match_bundled_config() {
        let config = EnvConfig::load_with(BTreeMap::new(), |_| None);
        assert_eq!(ContextFields::from_provider(&config), ContextFields::default());
    }
}
