//! Registry of live connections by name.

use crate::connection::ConnectionPtr;
use crate::error::ResolutionError;
use arc_swap::ArcSwap;
use fxhash::FxHashMap;
use itertools::Itertools;
use std::fmt::{Debug, Formatter};
use tracing::debug;

/// Name of the connection used when none is given explicitly.
pub const DEFAULT_CONNECTION: &str = "default";

type ConnectionMap = FxHashMap<String, ConnectionPtr>;

/// Maps connection names to live connection handles. The map is immutable and replaced as a whole
/// on each modification, so readers always see a complete snapshot and never block. At most one
/// connection exists for a given name - registering again replaces the previous one.
pub struct ConnectionManager {
    connections: ArcSwap<ConnectionMap>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: ArcSwap::from_pointee(ConnectionMap::default()),
        }
    }

    /// Registers a connection under given name, returning the replaced one, if any.
    pub fn register<N: Into<String>>(
        &self,
        name: N,
        connection: ConnectionPtr,
    ) -> Option<ConnectionPtr> {
        let name = name.into();
        debug!(connection = %name, "Registering connection.");

        let previous = self.connections.rcu(|connections| {
            let mut connections = ConnectionMap::clone(connections);
            connections.insert(name.clone(), connection.clone());
            connections
        });

        previous.get(&name).cloned()
    }

    /// Removes a connection, e.g. after it has been closed.
    pub fn remove(&self, name: &str) -> Option<ConnectionPtr> {
        let previous = self.connections.rcu(|connections| {
            let mut connections = ConnectionMap::clone(connections);
            connections.remove(name);
            connections
        });

        previous.get(name).cloned()
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.connections.load().contains_key(name)
    }

    /// Returns the connection registered under given name.
    pub fn get(&self, name: &str) -> Result<ConnectionPtr, ResolutionError> {
        self.connections
            .load()
            .get(name)
            .cloned()
            .ok_or_else(|| ResolutionError::ConnectionNotFound(name.to_string()))
    }

    /// Returns sorted names of all registered connections.
    pub fn names(&self) -> Vec<String> {
        self.connections.load().keys().cloned().sorted().collect()
    }

    pub fn clear(&self) {
        self.connections.store(Default::default());
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ConnectionManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.names())
            .finish()
    }
}
