//! Identities of types and members taking part in injection. Every declaration refers to an owning
//! type and a member of it (a field or a constructor parameter), while providers are scoped to
//! entity types.

use std::any::{type_name, TypeId};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Runtime identity of a type. Two identities are equal when they refer to the same [TypeId]; the
/// name is kept only for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// Returns the identity of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeIdentity {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Identity of the domain type a data-access provider is scoped to, e.g. `User`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct EntityDescriptor(TypeIdentity);

impl EntityDescriptor {
    /// Returns the descriptor for entity type `E`.
    #[inline]
    pub fn of<E: ?Sized + 'static>() -> Self {
        Self(TypeIdentity::of::<E>())
    }

    #[inline]
    pub fn identity(&self) -> TypeIdentity {
        self.0
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl From<TypeIdentity> for EntityDescriptor {
    fn from(value: TypeIdentity) -> Self {
        Self(value)
    }
}

impl Display for EntityDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Location of an injected member within its owning type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberLocator {
    /// Named field, populated after construction.
    Field(String),
    /// Zero-based constructor parameter position.
    Parameter(usize),
}

impl Display for MemberLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberLocator::Field(name) => write!(f, "field \"{name}\""),
            MemberLocator::Parameter(index) => {
                write!(f, "constructor parameter #{}", index.saturating_add(1))
            }
        }
    }
}

/// A single declared injection point: a member of an owning type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InjectionPoint {
    pub owner: TypeIdentity,
    pub member: MemberLocator,
}

impl InjectionPoint {
    #[inline]
    pub fn new(owner: TypeIdentity, member: MemberLocator) -> Self {
        Self { owner, member }
    }

    /// Injection point for field `name` of `Owner`.
    pub fn field<Owner: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new(
            TypeIdentity::of::<Owner>(),
            MemberLocator::Field(name.into()),
        )
    }

    /// Injection point for the constructor parameter at `index` of `Owner`.
    pub fn parameter<Owner: ?Sized + 'static>(index: usize) -> Self {
        Self::new(TypeIdentity::of::<Owner>(), MemberLocator::Parameter(index))
    }
}

impl Display for InjectionPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.member, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use crate::identity::{EntityDescriptor, InjectionPoint, MemberLocator, TypeIdentity};

    struct User;
    struct Post;

    #[test]
    fn should_compare_identities_by_type() {
        assert_eq!(TypeIdentity::of::<User>(), TypeIdentity::of::<User>());
        assert_ne!(TypeIdentity::of::<User>(), TypeIdentity::of::<Post>());
        assert_eq!(
            EntityDescriptor::of::<User>().identity(),
            TypeIdentity::of::<User>()
        );
    }

    #[test]
    fn should_describe_members() {
        assert_eq!(
            MemberLocator::Field("users".to_string()).to_string(),
            "field \"users\""
        );
        assert_eq!(
            MemberLocator::Parameter(0).to_string(),
            "constructor parameter #1"
        );

        let point = InjectionPoint::parameter::<User>(1);
        assert!(point.to_string().starts_with("constructor parameter #2 of "));
        assert!(point.to_string().ends_with("User"));
    }

    #[test]
    fn should_describe_last_parameter_position() {
        assert_eq!(
            MemberLocator::Parameter(usize::MAX).to_string(),
            format!("constructor parameter #{}", usize::MAX)
        );
        assert!(InjectionPoint::parameter::<Post>(usize::MAX)
            .to_string()
            .ends_with("Post"));
    }

    #[test]
    fn should_distinguish_members_of_same_owner() {
        assert_ne!(
            InjectionPoint::field::<User>("a"),
            InjectionPoint::field::<User>("b")
        );
        assert_ne!(
            InjectionPoint::field::<User>("a"),
            InjectionPoint::field::<Post>("a")
        );
        assert_eq!(
            InjectionPoint::parameter::<User>(0),
            InjectionPoint::parameter::<User>(0)
        );
    }
}
