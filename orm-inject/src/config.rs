//! Configuration of the binding process. [ResolverConfig] is plain data, deserializable from any
//! `serde` source; loading it from files and the environment is left to the application.

use crate::connection_manager::DEFAULT_CONNECTION;
use serde::Deserialize;

/// What to do when an entity type is given for a custom repository, which is bound to its entity
/// on its own.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
pub enum CustomEntityPolicy {
    /// Fail the declaration with
    /// [UnexpectedEntityType](crate::error::BindingError::UnexpectedEntityType).
    #[default]
    Reject,
    /// Drop the entity and register the declaration.
    Ignore,
}

/// Binding configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Connection used by declarations which don't name one.
    pub default_connection_name: String,
    pub custom_entity_policy: CustomEntityPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_connection_name: DEFAULT_CONNECTION.to_string(),
            custom_entity_policy: CustomEntityPolicy::default(),
        }
    }
}

impl ResolverConfig {
    pub fn with_default_connection_name<T: ToString>(mut self, name: T) -> Self {
        self.default_connection_name = name.to_string();
        self
    }

    pub fn with_custom_entity_policy(mut self, policy: CustomEntityPolicy) -> Self {
        self.custom_entity_policy = policy;
        self
    }
}
