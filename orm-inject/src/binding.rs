//! Declaring injection points. [BindingResolver] validates a declaration and registers a
//! [Handler] which later resolves the requested value through a named connection.
//!
//! A repository declaration goes through the following steps:
//!
//! 1. the capability token is taken from the explicit kind, or derived from the declared member
//! type reported by the [MetadataInspector](crate::metadata::MetadataInspector) - missing metadata
//! fails with [BindingError::MetadataMissing]
//! 2. well-known tokens require an entity type, otherwise failing with
//! [BindingError::EntityTypeMissing]; custom tokens with an entity are handled according to
//! [CustomEntityPolicy]
//! 3. a handler capturing the connection name, token and entity is registered
//!
//! Nothing is resolved at declaration time, so connections don't need to exist yet. The arguments
//! follow the same conventions as the declaration attributes of typical ORMs - an empty argument
//! list means the default connection, a string is a connection name and an entity descriptor is the
//! entity type:
//!
//! ```
//! use orm_inject::binding::InjectOptions;
//! use orm_inject::identity::EntityDescriptor;
//!
//! struct User;
//!
//! let defaults = InjectOptions::from(());
//! let on_connection = InjectOptions::from("secondary");
//! let for_entity = InjectOptions::from(EntityDescriptor::of::<User>());
//! let both = InjectOptions::from((EntityDescriptor::of::<User>(), "secondary"));
//!
//! assert_eq!(both, InjectOptions::new().entity::<User>().connection("secondary"));
//! ```

use crate::capability::CapabilityToken;
use crate::config::{CustomEntityPolicy, ResolverConfig};
use crate::connection::ConnectionAdapter;
use crate::error::BindingError;
use crate::handler_registry::{Handler, HandlerRegistry};
use crate::identity::{EntityDescriptor, InjectionPoint};
use crate::metadata::MetadataInspectorPtr;
use crate::provider::provider_ptr;
use std::sync::Arc;
use tracing::debug;

/// Arguments of a repository declaration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InjectOptions {
    pub entity: Option<EntityDescriptor>,
    /// Uses [ResolverConfig::default_connection_name] when not present.
    pub connection_name: Option<String>,
    /// Explicit provider kind. Metadata is consulted only when not present.
    pub kind: Option<CapabilityToken>,
}

impl InjectOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity<E: ?Sized + 'static>(self) -> Self {
        self.with_entity(EntityDescriptor::of::<E>())
    }

    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn connection<T: ToString>(mut self, name: T) -> Self {
        self.connection_name = Some(name.to_string());
        self
    }

    pub fn kind(mut self, kind: CapabilityToken) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl From<()> for InjectOptions {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<&str> for InjectOptions {
    fn from(value: &str) -> Self {
        Self::default().connection(value)
    }
}

impl From<String> for InjectOptions {
    fn from(value: String) -> Self {
        Self {
            connection_name: Some(value),
            ..Default::default()
        }
    }
}

impl From<EntityDescriptor> for InjectOptions {
    fn from(value: EntityDescriptor) -> Self {
        Self::default().with_entity(value)
    }
}

impl From<(EntityDescriptor, &str)> for InjectOptions {
    fn from((entity, connection_name): (EntityDescriptor, &str)) -> Self {
        Self::default()
            .with_entity(entity)
            .connection(connection_name)
    }
}

/// What a registered handler produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BindingTarget {
    Repository {
        token: CapabilityToken,
        entity: Option<EntityDescriptor>,
    },
    /// The entity manager of the connection.
    Manager,
    /// The connection handle itself.
    Connection,
}

/// Successfully registered declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    pub injection_point: InjectionPoint,
    pub connection_name: String,
    pub target: BindingTarget,
}

impl Binding {
    fn into_handler(self) -> Handler {
        let Binding {
            injection_point,
            connection_name,
            target,
        } = self;

        match target {
            BindingTarget::Repository { token, entity } => {
                Handler::new(injection_point, move |connections| {
                    connections
                        .get(&connection_name)?
                        .resolve(token, entity.as_ref())
                })
            }
            BindingTarget::Manager => Handler::new(injection_point, move |connections| {
                connections
                    .get(&connection_name)?
                    .entity_manager(&connection_name)
            }),
            BindingTarget::Connection => Handler::new(injection_point, move |connections| {
                connections.get(&connection_name).map(provider_ptr)
            }),
        }
    }
}

/// Entry point for declaring injection points. Registration is synchronous and either fully
/// succeeds or leaves the [HandlerRegistry] untouched.
pub struct BindingResolver {
    metadata: MetadataInspectorPtr,
    handlers: Arc<HandlerRegistry>,
    config: ResolverConfig,
}

impl BindingResolver {
    pub fn new(
        metadata: MetadataInspectorPtr,
        handlers: Arc<HandlerRegistry>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            metadata,
            handlers,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Declares an injection point requiring a repository. See the module documentation for the
    /// meaning of the options.
    pub fn inject_repository<O: Into<InjectOptions>>(
        &self,
        injection_point: InjectionPoint,
        options: O,
    ) -> Result<Binding, BindingError> {
        let options = options.into();

        let token = match options.kind {
            Some(token) => token,
            None => self.declared_token(&injection_point)?,
        };
        let entity = self.validate_entity(&injection_point, token, options.entity)?;

        Ok(self.register(Binding {
            injection_point,
            connection_name: self.connection_name(options.connection_name),
            target: BindingTarget::Repository { token, entity },
        }))
    }

    /// Declares an injection point requiring the entity manager of a connection.
    pub fn inject_manager(
        &self,
        injection_point: InjectionPoint,
        connection_name: Option<&str>,
    ) -> Binding {
        self.register(Binding {
            injection_point,
            connection_name: self.connection_name(connection_name.map(str::to_string)),
            target: BindingTarget::Manager,
        })
    }

    /// Declares an injection point requiring a connection. The produced value is a
    /// [ConnectionPtr](crate::connection::ConnectionPtr).
    pub fn inject_connection(
        &self,
        injection_point: InjectionPoint,
        connection_name: Option<&str>,
    ) -> Binding {
        self.register(Binding {
            injection_point,
            connection_name: self.connection_name(connection_name.map(str::to_string)),
            target: BindingTarget::Connection,
        })
    }

    fn declared_token(
        &self,
        injection_point: &InjectionPoint,
    ) -> Result<CapabilityToken, BindingError> {
        self.metadata
            .member_type(&injection_point.owner, &injection_point.member)
            .map(CapabilityToken::from_declared_type)
            .ok_or_else(|| BindingError::MetadataMissing {
                owner: injection_point.owner,
                member: injection_point.member.clone(),
            })
    }

    fn validate_entity(
        &self,
        injection_point: &InjectionPoint,
        token: CapabilityToken,
        entity: Option<EntityDescriptor>,
    ) -> Result<Option<EntityDescriptor>, BindingError> {
        match (token.is_well_known(), entity) {
            (true, None) => Err(BindingError::EntityTypeMissing {
                owner: injection_point.owner,
                member: injection_point.member.clone(),
            }),
            (false, Some(entity)) => match self.config.custom_entity_policy {
                CustomEntityPolicy::Reject => Err(BindingError::UnexpectedEntityType {
                    owner: injection_point.owner,
                    member: injection_point.member.clone(),
                    entity,
                }),
                CustomEntityPolicy::Ignore => Ok(None),
            },
            (_, entity) => Ok(entity),
        }
    }

    fn connection_name(&self, connection_name: Option<String>) -> String {
        connection_name.unwrap_or_else(|| self.config.default_connection_name.clone())
    }

    fn register(&self, binding: Binding) -> Binding {
        debug!(
            injection_point = %binding.injection_point,
            connection = %binding.connection_name,
            target = ?binding.target,
            "Registering handler."
        );

        self.handlers.register_handler(binding.clone().into_handler());
        binding
    }
}
