//! Type-erased pointers for injected values and foreign errors.

use std::any::Any;
use std::error::Error;
use std::sync::Arc;

/// Shared pointer to any injectable value - a repository, an entity manager or a connection.
pub type ProviderPtr = Arc<dyn Any + Send + Sync>;

/// Errors reported by the connection layer, passed through unchanged.
pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Wraps a concrete provider into a [ProviderPtr].
#[inline]
pub fn provider_ptr<T: Any + Send + Sync>(provider: T) -> ProviderPtr {
    Arc::new(provider) as ProviderPtr
}
