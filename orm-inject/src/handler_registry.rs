//! Registered handlers producing values for declared injection points. The object registry
//! constructing owning types calls [HandlerRegistry::invoke] for each declared member, once per
//! constructed instance.

use crate::connection_manager::ConnectionManager;
use crate::error::ResolutionError;
use crate::identity::InjectionPoint;
use crate::provider::ProviderPtr;
use derivative::Derivative;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Function producing the value for an injection point, given the connections of its namespace.
pub type ProduceFn =
    Arc<dyn Fn(&ConnectionManager) -> Result<ProviderPtr, ResolutionError> + Send + Sync>;

/// Lazily invoked producer of a value for a single injection point.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Handler {
    pub injection_point: InjectionPoint,

    /// Producer closure. Captures everything needed for resolution at registration time and may
    /// be called any number of times.
    #[derivative(Debug = "ignore")]
    pub produce: ProduceFn,
}

impl Handler {
    pub fn new<F>(injection_point: InjectionPoint, produce: F) -> Self
    where
        F: Fn(&ConnectionManager) -> Result<ProviderPtr, ResolutionError> + Send + Sync + 'static,
    {
        Self {
            injection_point,
            produce: Arc::new(produce),
        }
    }
}

/// Registry of [Handler]s by injection point. Each point has at most one handler; registering a
/// new one silently replaces the old. Values are never cached - each invocation runs the producer.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: RwLock<FxHashMap<InjectionPoint, Handler>>,
}

impl HandlerRegistry {
    /// Registers a handler, returning the one it replaced.
    pub fn register_handler(&self, handler: Handler) -> Option<Handler> {
        let injection_point = handler.injection_point.clone();
        let previous = self.handlers.write().insert(injection_point, handler);

        if let Some(previous) = &previous {
            debug!(injection_point = %previous.injection_point, "Replaced existing handler.");
        }

        previous
    }

    /// Runs the handler registered for given injection point.
    pub fn invoke(
        &self,
        injection_point: &InjectionPoint,
        connections: &ConnectionManager,
    ) -> Result<ProviderPtr, ResolutionError> {
        let produce = self
            .handlers
            .read()
            .get(injection_point)
            .map(|handler| handler.produce.clone())
            .ok_or_else(|| ResolutionError::HandlerNotFound {
                owner: injection_point.owner,
                member: injection_point.member.clone(),
            })?;

        trace!(%injection_point, "Invoking handler.");
        (produce)(connections)
    }

    #[inline]
    pub fn handler(&self, injection_point: &InjectionPoint) -> Option<Handler> {
        self.handlers.read().get(injection_point).cloned()
    }

    #[inline]
    pub fn is_registered(&self, injection_point: &InjectionPoint) -> bool {
        self.handlers.read().contains_key(injection_point)
    }

    pub fn remove(&self, injection_point: &InjectionPoint) -> Option<Handler> {
        self.handlers.write().remove(injection_point)
    }

    pub fn clear(&self) {
        self.handlers.write().clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}
