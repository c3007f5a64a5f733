//! Bootstrap configuration is retrieved through a [BootstrapConfigProvider], which allows
//! replacing the source of [BootstrapConfig] in tests or embedding applications.
//!
//! By default, the config is created with opinionated default values, which can then be overwritten
//! by environment variables prefixed with `ORM_INJECT_` or the `orm-inject.json` file, e.g.
//! `ORM_INJECT_DEFAULT_CONNECTION_NAME=main`.

use config::{Config, ConfigError, Environment, File};
#[cfg(test)]
use mockall::automock;
use orm_inject::config::{CustomEntityPolicy, ResolverConfig};
use orm_inject::container::DEFAULT_NAMESPACE;
use orm_inject::provider::ErrorPtr;
use serde::Deserialize;
use std::error::Error;
use std::sync::Arc;

const CONFIG_ENV_PREFIX: &str = "ORM_INJECT";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "orm-inject.json";

fn convert_error<E: Error + Send + Sync + 'static>(error: E) -> ErrorPtr {
    Arc::new(error) as ErrorPtr
}

/// Bootstrap configuration which can be provided by a [BootstrapConfigProvider].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootstrapConfig {
    /// Should a default tracing logger be installed during bootstrap.
    pub install_tracing_logger: bool,
    /// Namespace of the initialized container.
    pub namespace: String,
    pub resolver: ResolverConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
            namespace: DEFAULT_NAMESPACE.to_string(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl From<OptionalBootstrapConfig> for BootstrapConfig {
    fn from(value: OptionalBootstrapConfig) -> Self {
        let default = Self::default();

        let mut resolver = default.resolver;
        if let Some(name) = value.default_connection_name {
            resolver = resolver.with_default_connection_name(name);
        }
        if let Some(policy) = value.custom_entity_policy {
            resolver = resolver.with_custom_entity_policy(policy);
        }

        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            namespace: value.namespace.unwrap_or(default.namespace),
            resolver,
        }
    }
}

impl BootstrapConfig {
    pub fn with_install_tracing_logger(mut self, install_tracing_logger: bool) -> Self {
        self.install_tracing_logger = install_tracing_logger;
        self
    }

    pub fn with_namespace<T: ToString>(mut self, namespace: T) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    fn init_from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalBootstrapConfig>())
            .map(|config| config.into())
    }
}

/// Provider for [BootstrapConfig] used by [Bootstrap](crate::bootstrap::Bootstrap).
#[cfg_attr(test, automock)]
pub trait BootstrapConfigProvider {
    fn config(&self) -> Result<BootstrapConfig, ErrorPtr>;
}

/// Loads the config from [CONFIG_FILE] and the environment once, on creation.
#[derive(Clone, Debug)]
pub struct DefaultBootstrapConfigProvider {
    // cached init result
    config: Result<BootstrapConfig, ErrorPtr>,
}

impl DefaultBootstrapConfigProvider {
    pub fn new() -> Self {
        Self {
            config: BootstrapConfig::init_from_environment().map_err(convert_error),
        }
    }
}

impl Default for DefaultBootstrapConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapConfigProvider for DefaultBootstrapConfigProvider {
    fn config(&self) -> Result<BootstrapConfig, ErrorPtr> {
        self.config.clone()
    }
}

#[derive(Deserialize)]
struct OptionalBootstrapConfig {
    install_tracing_logger: Option<bool>,
    namespace: Option<String>,
    default_connection_name: Option<String>,
    custom_entity_policy: Option<CustomEntityPolicy>,
}
