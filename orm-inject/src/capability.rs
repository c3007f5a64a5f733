//! Capability tokens describe *what kind* of provider an injection point needs. There are two
//! families:
//!
//! * well-known kinds - the connection's [standard](CapabilityToken::Standard) repository and its
//! [specialized](CapabilityToken::Specialized) variants, all generic over an entity type, which
//! therefore must be known when declaring the injection point
//! * [custom](CapabilityToken::Custom) providers - user types registered in the connection under
//! their own identity, which already know their entity
//!
//! When the kind is not given explicitly, it's derived from the declared type of the member, as
//! reported by a [MetadataInspector](crate::metadata::MetadataInspector). Declared types are
//! classified with [CapabilityToken::from_declared_type] using the marker types from [kind].

use crate::identity::TypeIdentity;
use std::fmt::{Display, Formatter};

/// Specialized repository variants supported by connections.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ProviderVariant {
    /// Repository over tree-structured entities.
    Tree,
    /// Repository backed by an externally indexed document store.
    Document,
}

impl Display for ProviderVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderVariant::Tree => f.write_str("tree"),
            ProviderVariant::Document => f.write_str("document"),
        }
    }
}

/// Marker types standing for the well-known provider kinds in member type metadata.
pub mod kind {
    /// Declared type of members holding the standard repository of an entity.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct StandardRepository;

    /// Declared type of members holding a [Tree](super::ProviderVariant::Tree) repository.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TreeRepository;

    /// Declared type of members holding a [Document](super::ProviderVariant::Document) repository.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct DocumentRepository;
}

/// Identifies the provider requested by an injection point.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum CapabilityToken {
    Standard,
    Specialized(ProviderVariant),
    /// Custom provider looked up by its exact type.
    Custom(TypeIdentity),
}

impl CapabilityToken {
    /// Token for a custom provider of type `T`.
    #[inline]
    pub fn custom<T: ?Sized + 'static>() -> Self {
        Self::Custom(TypeIdentity::of::<T>())
    }

    /// Classifies the declared type of a member. Marker types from [kind] map to well-known
    /// tokens, everything else is a custom provider.
    pub fn from_declared_type(declared: TypeIdentity) -> Self {
        if declared == TypeIdentity::of::<kind::StandardRepository>() {
            Self::Standard
        } else if declared == TypeIdentity::of::<kind::TreeRepository>() {
            Self::Specialized(ProviderVariant::Tree)
        } else if declared == TypeIdentity::of::<kind::DocumentRepository>() {
            Self::Specialized(ProviderVariant::Document)
        } else {
            Self::Custom(declared)
        }
    }

    /// Well-known tokens are generic over an entity and cannot be resolved without one.
    #[inline]
    pub fn is_well_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl Display for CapabilityToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityToken::Standard => f.write_str("standard repository"),
            CapabilityToken::Specialized(variant) => write!(f, "{variant} repository"),
            CapabilityToken::Custom(identity) => write!(f, "custom repository {identity}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::kind::{DocumentRepository, StandardRepository, TreeRepository};
    use crate::capability::{CapabilityToken, ProviderVariant};
    use crate::identity::TypeIdentity;

    struct UserRepository;

    #[test]
    fn should_classify_well_known_kinds() {
        assert_eq!(
            CapabilityToken::from_declared_type(TypeIdentity::of::<StandardRepository>()),
            CapabilityToken::Standard
        );
        assert_eq!(
            CapabilityToken::from_declared_type(TypeIdentity::of::<TreeRepository>()),
            CapabilityToken::Specialized(ProviderVariant::Tree)
        );
        assert_eq!(
            CapabilityToken::from_declared_type(TypeIdentity::of::<DocumentRepository>()),
            CapabilityToken::Specialized(ProviderVariant::Document)
        );
    }

    #[test]
    fn should_classify_other_types_as_custom() {
        let token = CapabilityToken::from_declared_type(TypeIdentity::of::<UserRepository>());

        assert_eq!(token, CapabilityToken::custom::<UserRepository>());
        assert!(!token.is_well_known());
        assert!(CapabilityToken::Standard.is_well_known());
        assert!(CapabilityToken::Specialized(ProviderVariant::Document).is_well_known());
    }
}
