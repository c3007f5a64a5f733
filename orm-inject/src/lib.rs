//! Deferred injection of ORM repositories, entity managers and connections.
//!
//! Types declare, at startup, which of their members (fields or constructor parameters) need a
//! value produced by a named connection - e.g. "the standard repository for `User` on connection
//! `default`". Nothing is resolved at that point: a [handler](handler_registry::Handler) is
//! registered instead and invoked later, when the owning type is actually constructed by an object
//! registry. This way declarations don't depend on connections being already established.
//!
//! The main building blocks are:
//!
//! * [CapabilityToken](capability::CapabilityToken) - what kind of provider is needed
//! * [ConnectionManager](connection_manager::ConnectionManager) - connections by name
//! * [Connection](connection::Connection) and [ConnectionAdapter](connection::ConnectionAdapter) -
//! producing providers for tokens
//! * [MetadataInspector](metadata::MetadataInspector) - declared types of members, used when the
//! provider kind is not given explicitly
//! * [HandlerRegistry](handler_registry::HandlerRegistry) - registered handlers by injection point
//! * [BindingResolver](binding::BindingResolver) - validates declarations and registers handlers
//! * [Container](container::Container) - all the above for a single namespace
//!
//! ```
//! use orm_inject::capability::kind::StandardRepository;
//! use orm_inject::connection::StaticConnection;
//! use orm_inject::container::ContainerBuilder;
//! use orm_inject::identity::{EntityDescriptor, InjectionPoint};
//! use orm_inject::metadata::StaticMetadataInspector;
//! use std::sync::Arc;
//!
//! struct User;
//!
//! #[derive(Debug)]
//! struct UserRepository;
//!
//! struct UserService {
//!     users: Arc<UserRepository>,
//! }
//!
//! let container = ContainerBuilder::new("readme")
//!     .with_metadata_inspector(Arc::new(
//!         StaticMetadataInspector::default().with_field::<UserService, StandardRepository>("users"),
//!     ))
//!     .build();
//!
//! // declaration time
//! container
//!     .inject_repository(
//!         InjectionPoint::field::<UserService>("users"),
//!         EntityDescriptor::of::<User>(),
//!     )
//!     .unwrap();
//!
//! // connection established later
//! container.register_connection(
//!     "default",
//!     Arc::new(StaticConnection::builder().with_repository::<User, _>(UserRepository).build()),
//! );
//!
//! // construction time
//! let service = UserService {
//!     users: container
//!         .invoke_typed(&InjectionPoint::field::<UserService>("users"))
//!         .unwrap(),
//! };
//! ```

pub mod binding;
pub mod capability;
pub mod config;
pub mod connection;
pub mod connection_manager;
pub mod container;
pub mod declaration;
pub mod error;
pub mod handler_registry;
pub mod identity;
pub mod metadata;
pub mod provider;

pub use error::{BindingError, ResolutionError};
