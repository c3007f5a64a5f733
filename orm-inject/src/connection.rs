//! Connections are opaque, named handles to a live backing resource, able to produce providers:
//! repositories for entities, an entity manager and custom repositories. The crate never talks to
//! the persistence engine directly - it only consumes the [Connection] trait.
//!
//! [ConnectionAdapter] implements the single dispatch function mapping a [CapabilityToken] to the
//! matching [Connection] method, and is available for every connection.
//!
//! For tests and simple setups, [StaticConnection] contains pre-built providers:
//!
//! ```
//! use orm_inject::capability::CapabilityToken;
//! use orm_inject::connection::{ConnectionAdapter, StaticConnection};
//! use orm_inject::identity::EntityDescriptor;
//!
//! struct User;
//! struct UserRepository;
//!
//! let connection = StaticConnection::builder()
//!     .with_repository::<User, _>(UserRepository)
//!     .build();
//!
//! let repository = connection
//!     .resolve(CapabilityToken::Standard, Some(&EntityDescriptor::of::<User>()))
//!     .unwrap();
//! assert!(repository.downcast::<UserRepository>().is_ok());
//! ```

use crate::capability::{CapabilityToken, ProviderVariant};
use crate::error::ResolutionError;
use crate::identity::{EntityDescriptor, TypeIdentity};
use crate::provider::{provider_ptr, ErrorPtr, ProviderPtr};
use derivative::Derivative;
use fxhash::FxHashMap;
#[cfg(test)]
use mockall::automock;
use std::any::Any;
use std::sync::Arc;

pub type ConnectionPtr = Arc<dyn Connection>;

/// A live connection capable of producing providers. Implementations must tolerate concurrent
/// calls and are free to cache providers. `Ok(None)` means the connection has no such provider,
/// while errors are passed to the caller unchanged.
#[cfg_attr(test, automock)]
pub trait Connection: Send + Sync {
    /// Returns the default repository for given entity.
    fn repository(&self, entity: &EntityDescriptor) -> Result<Option<ProviderPtr>, ErrorPtr>;

    /// Returns a specialized repository variant for given entity.
    fn specialized_repository(
        &self,
        variant: ProviderVariant,
        entity: &EntityDescriptor,
    ) -> Result<Option<ProviderPtr>, ErrorPtr>;

    /// Returns a custom repository registered under its exact type.
    fn custom_repository(
        &self,
        repository_type: &TypeIdentity,
    ) -> Result<Option<ProviderPtr>, ErrorPtr>;

    /// Returns the general-purpose entity manager of this connection.
    fn manager(&self) -> Result<Option<ProviderPtr>, ErrorPtr>;
}

/// Capability resolution on top of a raw [Connection].
pub trait ConnectionAdapter {
    /// Returns the provider matching `token`:
    ///
    /// 1. [Standard](CapabilityToken::Standard) - the default repository for `entity`
    /// 2. [Specialized](CapabilityToken::Specialized) - the given variant for `entity`
    /// 3. [Custom](CapabilityToken::Custom) - the repository registered under that type; `entity`
    /// is ignored
    fn resolve(
        &self,
        token: CapabilityToken,
        entity: Option<&EntityDescriptor>,
    ) -> Result<ProviderPtr, ResolutionError>;

    /// Returns the entity manager, using `connection_name` for error reporting.
    fn entity_manager(&self, connection_name: &str) -> Result<ProviderPtr, ResolutionError>;
}

impl<T: Connection + ?Sized> ConnectionAdapter for T {
    fn resolve(
        &self,
        token: CapabilityToken,
        entity: Option<&EntityDescriptor>,
    ) -> Result<ProviderPtr, ResolutionError> {
        let provider = match (token, entity) {
            (CapabilityToken::Standard, Some(entity)) => self.repository(entity),
            (CapabilityToken::Specialized(variant), Some(entity)) => {
                self.specialized_repository(variant, entity)
            }
            (CapabilityToken::Custom(repository_type), _) => {
                self.custom_repository(&repository_type)
            }
            (token, None) => return Err(ResolutionError::EntityRequired(token)),
        };

        provider
            .map_err(ResolutionError::Connection)?
            .ok_or_else(|| ResolutionError::ProviderNotFound {
                token,
                entity: entity.filter(|_| token.is_well_known()).copied(),
            })
    }

    fn entity_manager(&self, connection_name: &str) -> Result<ProviderPtr, ResolutionError> {
        self.manager()
            .map_err(ResolutionError::Connection)?
            .ok_or_else(|| ResolutionError::ManagerNotFound(connection_name.to_string()))
    }
}

/// Connection serving providers registered up front. Every call returns the same instance.
#[derive(Derivative, Clone, Default)]
#[derivative(Debug)]
pub struct StaticConnection {
    #[derivative(Debug = "ignore")]
    repositories: FxHashMap<EntityDescriptor, ProviderPtr>,
    #[derivative(Debug = "ignore")]
    specialized_repositories: FxHashMap<(ProviderVariant, EntityDescriptor), ProviderPtr>,
    #[derivative(Debug = "ignore")]
    custom_repositories: FxHashMap<TypeIdentity, ProviderPtr>,
    #[derivative(Debug = "ignore")]
    manager: Option<ProviderPtr>,
}

impl StaticConnection {
    #[inline]
    pub fn builder() -> StaticConnectionBuilder {
        StaticConnectionBuilder::default()
    }
}

impl Connection for StaticConnection {
    fn repository(&self, entity: &EntityDescriptor) -> Result<Option<ProviderPtr>, ErrorPtr> {
        Ok(self.repositories.get(entity).cloned())
    }

    fn specialized_repository(
        &self,
        variant: ProviderVariant,
        entity: &EntityDescriptor,
    ) -> Result<Option<ProviderPtr>, ErrorPtr> {
        Ok(self
            .specialized_repositories
            .get(&(variant, *entity))
            .cloned())
    }

    fn custom_repository(
        &self,
        repository_type: &TypeIdentity,
    ) -> Result<Option<ProviderPtr>, ErrorPtr> {
        Ok(self.custom_repositories.get(repository_type).cloned())
    }

    fn manager(&self) -> Result<Option<ProviderPtr>, ErrorPtr> {
        Ok(self.manager.clone())
    }
}

/// Builder for [StaticConnection].
#[derive(Default)]
pub struct StaticConnectionBuilder {
    connection: StaticConnection,
}

impl StaticConnectionBuilder {
    /// Adds the default repository for entity `E`.
    pub fn with_repository<E: ?Sized + 'static, R: Any + Send + Sync>(self, repository: R) -> Self {
        self.with_repository_ptr(EntityDescriptor::of::<E>(), provider_ptr(repository))
    }

    pub fn with_repository_ptr(mut self, entity: EntityDescriptor, repository: ProviderPtr) -> Self {
        self.connection.repositories.insert(entity, repository);
        self
    }

    /// Adds a specialized repository variant for entity `E`.
    pub fn with_specialized_repository<E: ?Sized + 'static, R: Any + Send + Sync>(
        mut self,
        variant: ProviderVariant,
        repository: R,
    ) -> Self {
        self.connection.specialized_repositories.insert(
            (variant, EntityDescriptor::of::<E>()),
            provider_ptr(repository),
        );
        self
    }

    /// Adds a custom repository, available under its own type.
    pub fn with_custom_repository<R: Any + Send + Sync>(mut self, repository: R) -> Self {
        self.connection
            .custom_repositories
            .insert(TypeIdentity::of::<R>(), provider_ptr(repository));
        self
    }

    pub fn with_manager<M: Any + Send + Sync>(mut self, manager: M) -> Self {
        self.connection.manager = Some(provider_ptr(manager));
        self
    }

    pub fn build(self) -> StaticConnection {
        self.connection
    }
}
