//! A [Container] groups everything needed for deferred injection in one namespace: registered
//! connections, declared handlers and the resolver creating them. Containers can be created and
//! passed around explicitly, or kept in process-wide state keyed by namespace, which is convenient
//! for declarations running at startup:
//!
//! ```
//! use orm_inject::binding::InjectOptions;
//! use orm_inject::capability::CapabilityToken;
//! use orm_inject::connection::StaticConnection;
//! use orm_inject::container;
//! use orm_inject::identity::InjectionPoint;
//! use std::sync::Arc;
//!
//! struct User;
//! struct UserRepository;
//! struct UserService;
//!
//! let container = container::get_or_init("container_docs");
//! container
//!     .inject_repository(
//!         InjectionPoint::field::<UserService>("users"),
//!         InjectOptions::new()
//!             .entity::<User>()
//!             .kind(CapabilityToken::Standard),
//!     )
//!     .unwrap();
//!
//! // connections can be registered after declaring injection points
//! container.register_connection(
//!     "default",
//!     Arc::new(StaticConnection::builder().with_repository::<User, _>(UserRepository).build()),
//! );
//!
//! let repository = container
//!     .invoke_typed::<UserRepository>(&InjectionPoint::field::<UserService>("users"));
//! assert!(repository.is_ok());
//!
//! container::reset("container_docs");
//! ```

use crate::binding::{Binding, BindingResolver, InjectOptions};
use crate::config::ResolverConfig;
use crate::connection::ConnectionPtr;
use crate::connection_manager::ConnectionManager;
use crate::error::{BindingError, ResolutionError};
use crate::handler_registry::HandlerRegistry;
use crate::identity::InjectionPoint;
use crate::metadata::{MetadataInspectorPtr, NoMetadataInspector};
use crate::provider::ProviderPtr;
use fxhash::FxHashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::debug;

/// Namespace of the [global] container.
pub const DEFAULT_NAMESPACE: &str = "default";

static CONTAINERS: Lazy<RwLock<FxHashMap<String, Arc<Container>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// Builder for [Container] with sensible defaults: no metadata facility and default
/// [ResolverConfig].
pub struct ContainerBuilder {
    namespace: String,
    metadata: MetadataInspectorPtr,
    config: ResolverConfig,
}

impl ContainerBuilder {
    pub fn new<T: ToString>(namespace: T) -> Self {
        Self {
            namespace: namespace.to_string(),
            metadata: Arc::new(NoMetadataInspector),
            config: Default::default(),
        }
    }

    /// Sets the source of declared member types.
    pub fn with_metadata_inspector(mut self, metadata: MetadataInspectorPtr) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Container {
        let handlers = Arc::new(HandlerRegistry::default());
        Container {
            namespace: self.namespace,
            connections: ConnectionManager::new(),
            resolver: BindingResolver::new(self.metadata, handlers.clone(), self.config),
            handlers,
        }
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Connections, handlers and the resolver of a single namespace.
pub struct Container {
    namespace: String,
    connections: ConnectionManager,
    handlers: Arc<HandlerRegistry>,
    resolver: BindingResolver,
}

impl Container {
    #[inline]
    pub fn builder<T: ToString>(namespace: T) -> ContainerBuilder {
        ContainerBuilder::new(namespace)
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    #[inline]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    #[inline]
    pub fn resolver(&self) -> &BindingResolver {
        &self.resolver
    }

    /// Makes an established connection available for resolution.
    #[inline]
    pub fn register_connection<N: Into<String>>(
        &self,
        name: N,
        connection: ConnectionPtr,
    ) -> Option<ConnectionPtr> {
        self.connections.register(name, connection)
    }

    /// See [BindingResolver::inject_repository].
    #[inline]
    pub fn inject_repository<O: Into<InjectOptions>>(
        &self,
        injection_point: InjectionPoint,
        options: O,
    ) -> Result<Binding, BindingError> {
        self.resolver.inject_repository(injection_point, options)
    }

    /// See [BindingResolver::inject_manager].
    #[inline]
    pub fn inject_manager(
        &self,
        injection_point: InjectionPoint,
        connection_name: Option<&str>,
    ) -> Binding {
        self.resolver.inject_manager(injection_point, connection_name)
    }

    /// See [BindingResolver::inject_connection].
    #[inline]
    pub fn inject_connection(
        &self,
        injection_point: InjectionPoint,
        connection_name: Option<&str>,
    ) -> Binding {
        self.resolver
            .inject_connection(injection_point, connection_name)
    }

    /// Produces the value for given injection point. Meant to be called by the object registry,
    /// once per constructed instance and declared member.
    #[inline]
    pub fn invoke(&self, injection_point: &InjectionPoint) -> Result<ProviderPtr, ResolutionError> {
        self.handlers.invoke(injection_point, &self.connections)
    }

    /// Typesafe version of [Container::invoke].
    pub fn invoke_typed<T: Any + Send + Sync>(
        &self,
        injection_point: &InjectionPoint,
    ) -> Result<Arc<T>, ResolutionError> {
        self.invoke(injection_point)?
            .downcast::<T>()
            .map_err(|_| ResolutionError::IncompatibleProvider {
                owner: injection_point.owner,
                member: injection_point.member.clone(),
                expected: type_name::<T>(),
            })
    }

    /// Removes all connections and handlers.
    pub fn clear(&self) {
        self.connections.clear();
        self.handlers.clear();
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("namespace", &self.namespace)
            .field("connections", &self.connections)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Installs a container built by given builder as the process-wide container for its namespace,
/// replacing any previous one.
pub fn init(builder: ContainerBuilder) -> Arc<Container> {
    let container = Arc::new(builder.build());

    if CONTAINERS
        .write()
        .insert(container.namespace.clone(), container.clone())
        .is_some()
    {
        debug!(namespace = %container.namespace, "Replaced existing container.");
    }

    container
}

/// Returns the process-wide container for given namespace, if initialized.
pub fn get(namespace: &str) -> Option<Arc<Container>> {
    CONTAINERS.read().get(namespace).cloned()
}

/// Returns the process-wide container for given namespace, creating a default one if needed.
pub fn get_or_init(namespace: &str) -> Arc<Container> {
    if let Some(container) = get(namespace) {
        return container;
    }

    CONTAINERS
        .write()
        .entry(namespace.to_string())
        .or_insert_with(|| Arc::new(ContainerBuilder::new(namespace).build()))
        .clone()
}

/// Returns the container for [DEFAULT_NAMESPACE].
#[inline]
pub fn global() -> Arc<Container> {
    get_or_init(DEFAULT_NAMESPACE)
}

/// Clears all connections and handlers of given namespace and forgets its container. Other
/// namespaces are not affected. Returns `false` if there was nothing to reset.
pub fn reset(namespace: &str) -> bool {
    let container = CONTAINERS.write().remove(namespace);

    match container {
        Some(container) => {
            debug!(namespace, "Resetting container.");
            container.clear();
            true
        }
        None => false,
    }
}

/// Returns sorted names of all initialized namespaces.
pub fn namespaces() -> Vec<String> {
    CONTAINERS.read().keys().cloned().sorted().collect()
}
