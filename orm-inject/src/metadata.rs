//! Declared member types, as seen by the binding process. Rust has no runtime reflection over
//! struct members, so the information is provided by a [MetadataInspector] - a code generator, a
//! hand-written table like [StaticMetadataInspector], or nothing at all ([NoMetadataInspector]).
//!
//! Missing metadata is never guessed: declaring an injection point without an explicit provider
//! kind and without metadata fails immediately with
//! [MetadataMissing](crate::error::BindingError::MetadataMissing).

use crate::identity::{MemberLocator, TypeIdentity};
use fxhash::FxHashMap;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

pub type MetadataInspectorPtr = Arc<dyn MetadataInspector>;

/// Source of declared member types.
#[cfg_attr(test, automock)]
pub trait MetadataInspector: Send + Sync {
    /// Returns the declared type of `member` in `owner`, or `None` if not known.
    fn member_type(&self, owner: &TypeIdentity, member: &MemberLocator) -> Option<TypeIdentity>;
}

/// Inspector used when no metadata facility is wired up.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoMetadataInspector;

impl MetadataInspector for NoMetadataInspector {
    #[inline]
    fn member_type(&self, _owner: &TypeIdentity, _member: &MemberLocator) -> Option<TypeIdentity> {
        None
    }
}

/// Inspector backed by a table of explicitly registered member types.
///
/// ```
/// use orm_inject::capability::kind::StandardRepository;
/// use orm_inject::identity::{MemberLocator, TypeIdentity};
/// use orm_inject::metadata::{MetadataInspector, StaticMetadataInspector};
///
/// struct UserService;
/// struct PostRepository;
///
/// let inspector = StaticMetadataInspector::default()
///     .with_field::<UserService, StandardRepository>("users")
///     .with_parameter::<UserService, PostRepository>(0);
///
/// assert_eq!(
///     inspector.member_type(&TypeIdentity::of::<UserService>(), &MemberLocator::Parameter(0)),
///     Some(TypeIdentity::of::<PostRepository>())
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticMetadataInspector {
    member_types: FxHashMap<(TypeIdentity, MemberLocator), TypeIdentity>,
}

impl StaticMetadataInspector {
    /// Records the declared type of given member, replacing any previous entry.
    pub fn register(
        &mut self,
        owner: TypeIdentity,
        member: MemberLocator,
        declared_type: TypeIdentity,
    ) {
        self.member_types.insert((owner, member), declared_type);
    }

    pub fn with_field<Owner: ?Sized + 'static, Declared: ?Sized + 'static>(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.register(
            TypeIdentity::of::<Owner>(),
            MemberLocator::Field(name.into()),
            TypeIdentity::of::<Declared>(),
        );
        self
    }

    pub fn with_parameter<Owner: ?Sized + 'static, Declared: ?Sized + 'static>(
        mut self,
        index: usize,
    ) -> Self {
        self.register(
            TypeIdentity::of::<Owner>(),
            MemberLocator::Parameter(index),
            TypeIdentity::of::<Declared>(),
        );
        self
    }
}

impl MetadataInspector for StaticMetadataInspector {
    fn member_type(&self, owner: &TypeIdentity, member: &MemberLocator) -> Option<TypeIdentity> {
        self.member_types.get(&(*owner, member.clone())).copied()
    }
}
