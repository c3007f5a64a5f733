use crate::capability::CapabilityToken;
use crate::identity::{EntityDescriptor, MemberLocator, TypeIdentity};
use crate::provider::ErrorPtr;
use thiserror::Error;

fn entity_name(entity: &Option<EntityDescriptor>) -> &'static str {
    entity.as_ref().map(|entity| entity.name()).unwrap_or("<none>")
}

/// Errors raised when declaring injection points. A failed declaration registers nothing and
/// leaves any previous handler for the same injection point untouched.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingError {
    #[error("Cannot get declared type for {member} of {owner}. Make sure the member is known to the metadata inspector or specify the provider kind explicitly.")]
    MetadataMissing {
        owner: TypeIdentity,
        member: MemberLocator,
    },
    #[error("Missing entity type for {member} of {owner}. Standard and specialized repositories are generic over an entity, which can be omitted only for custom repositories.")]
    EntityTypeMissing {
        owner: TypeIdentity,
        member: MemberLocator,
    },
    #[error("Entity type {entity} given for {member} of {owner}, but custom repositories are bound to their entity on their own.")]
    UnexpectedEntityType {
        owner: TypeIdentity,
        member: MemberLocator,
        entity: EntityDescriptor,
    },
}

/// Errors raised when producing values for declared injection points.
#[derive(Error, Clone, Debug)]
pub enum ResolutionError {
    #[error("Cannot get connection \"{0}\" from the connection manager. Make sure such connection has been registered before resolving any injection point.")]
    ConnectionNotFound(String),
    #[error("Connection has no {token} for entity {}.", entity_name(.entity))]
    ProviderNotFound {
        token: CapabilityToken,
        entity: Option<EntityDescriptor>,
    },
    #[error("No handler registered for {member} of {owner}.")]
    HandlerNotFound {
        owner: TypeIdentity,
        member: MemberLocator,
    },
    #[error("Cannot resolve {0} without an entity type.")]
    EntityRequired(CapabilityToken),
    #[error("Entity manager was not found on connection \"{0}\".")]
    ManagerNotFound(String),
    #[error("Value produced for {member} of {owner} is not of type {expected}.")]
    IncompatibleProvider {
        owner: TypeIdentity,
        member: MemberLocator,
        expected: &'static str,
    },
    #[error("Connection error: {0}")]
    Connection(ErrorPtr),
}
