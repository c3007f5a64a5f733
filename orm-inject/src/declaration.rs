//! Declarations group the injection points of a type in a single function, run against a
//! [Container] at startup. Instead of calling them by hand, declarations can be submitted
//! statically with [declare_injections](crate::declare_injections) and later applied all at once
//! with [apply_static_declarations]:
//!
//! ```
//! use orm_inject::container::{Container, ContainerBuilder};
//! use orm_inject::declaration::apply_static_declarations;
//! use orm_inject::declare_injections;
//! use orm_inject::error::BindingError;
//! use orm_inject::identity::InjectionPoint;
//!
//! struct PostService;
//!
//! fn declare_post_service(container: &Container) -> Result<(), BindingError> {
//!     container.inject_manager(InjectionPoint::field::<PostService>("manager"), None);
//!     container.inject_connection(InjectionPoint::parameter::<PostService>(0), Some("audit"));
//!     Ok(())
//! }
//!
//! declare_injections!(declare_post_service);
//!
//! fn main() {
//!     let container = ContainerBuilder::new("declaration_docs").build();
//!     assert!(apply_static_declarations(&container).is_empty());
//!     assert_eq!(container.handlers().len(), 2);
//! }
//! ```

use crate::container::Container;
use crate::error::BindingError;
use derivative::Derivative;
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::{debug, warn};

/// Function declaring injection points in a container.
pub type DeclarationFn = fn(container: &Container) -> Result<(), BindingError>;

/// A named declaration. Declarations with higher priority are applied first.
#[derive(Derivative, Clone, Copy)]
#[derivative(Debug)]
pub struct Declaration {
    pub name: &'static str,
    pub priority: i8,
    #[derivative(Debug = "ignore")]
    pub declare: DeclarationFn,
}

/// Submits a [DeclarationFn] for [apply_static_declarations]. An optional priority (default 0)
/// establishes the order of application; higher is first.
#[macro_export]
macro_rules! declare_injections {
    ($declare:path) => {
        $crate::declare_injections!($declare, priority = 0);
    };
    ($declare:path, priority = $priority:expr) => {
        $crate::declaration::internal::submit! {
            $crate::declaration::Declaration {
                name: stringify!($declare),
                priority: $priority,
                declare: $declare,
            }
        }
    };
}

/// Returns all statically submitted declarations in application order.
pub fn static_declarations() -> Vec<&'static Declaration> {
    inventory::iter::<Declaration>
        .into_iter()
        .sorted_by_key(|declaration| (Reverse(declaration.priority), declaration.name))
        .collect()
}

/// Applies given declarations in order. A failing declaration doesn't prevent others from being
/// applied - all errors are returned.
pub fn apply_declarations<'a, I>(container: &Container, declarations: I) -> Vec<BindingError>
where
    I: IntoIterator<Item = &'a Declaration>,
{
    declarations
        .into_iter()
        .filter_map(|declaration| {
            debug!(
                namespace = container.namespace(),
                declaration = declaration.name,
                "Applying declaration."
            );

            (declaration.declare)(container)
                .map_err(|error| {
                    warn!(declaration = declaration.name, %error, "Declaration failed.");
                    error
                })
                .err()
        })
        .collect()
}

/// Applies all statically submitted declarations. See [apply_declarations].
pub fn apply_static_declarations(container: &Container) -> Vec<BindingError> {
    apply_declarations(container, static_declarations())
}

#[doc(hidden)]
pub mod internal {
    pub use inventory::submit;
}

inventory::collect!(Declaration);

#[cfg(test)]
mod tests {
    use crate::binding::InjectOptions;
    use crate::capability::CapabilityToken;
    use crate::container::{Container, ContainerBuilder};
    use crate::declaration::{apply_declarations, static_declarations, Declaration};
    use crate::error::BindingError;
    use crate::identity::InjectionPoint;
    use itertools::Itertools;

    struct Service;
    struct ServiceRepository;

    fn declare_repository(container: &Container) -> Result<(), BindingError> {
        container
            .inject_repository(
                InjectionPoint::field::<Service>("repository"),
                InjectOptions::new().kind(CapabilityToken::custom::<ServiceRepository>()),
            )
            .map(|_| ())
    }

    fn declare_missing_metadata(container: &Container) -> Result<(), BindingError> {
        container
            .inject_repository(InjectionPoint::field::<Service>("users"), ())
            .map(|_| ())
    }

    fn declare_manager(container: &Container) -> Result<(), BindingError> {
        container.inject_manager(InjectionPoint::field::<Service>("manager"), None);
        Ok(())
    }

    declare_injections!(declare_manager, priority = -10);
    declare_injections!(declare_repository, priority = 10);

    #[test]
    fn should_apply_remaining_declarations_after_failure() {
        let container = ContainerBuilder::new("declarations").build();
        let declarations = [
            Declaration {
                name: "repository",
                priority: 0,
                declare: declare_repository,
            },
            Declaration {
                name: "missing",
                priority: 0,
                declare: declare_missing_metadata,
            },
            Declaration {
                name: "manager",
                priority: 0,
                declare: declare_manager,
            },
        ];

        let errors = apply_declarations(&container, &declarations);

        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], BindingError::MetadataMissing { .. }));
        assert_eq!(container.handlers().len(), 2);
    }

    #[test]
    fn should_order_static_declarations_by_priority() {
        let names = static_declarations()
            .into_iter()
            .map(|declaration| declaration.name)
            .collect_vec();

        assert_eq!(names, vec!["declare_repository", "declare_manager"]);
    }
}
