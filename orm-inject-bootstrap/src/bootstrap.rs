//! Initializing the process-wide container at application startup.

use crate::config::{BootstrapConfigProvider, DefaultBootstrapConfigProvider};
use derive_more::Constructor;
use orm_inject::connection::ConnectionPtr;
use orm_inject::container::{self, Container, ContainerBuilder};
use orm_inject::declaration::{apply_declarations, apply_static_declarations, Declaration};
use orm_inject::metadata::MetadataInspectorPtr;
use orm_inject::provider::ErrorPtr;
use orm_inject::BindingError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Error, Debug)]
pub enum BootstrapError {
    #[error("Error loading configuration: {0}")]
    Config(ErrorPtr),
    #[error("{} declaration(s) failed", .0.len())]
    Declarations(Vec<BindingError>),
}

/// Main entrypoint for applications. Initializes the container for the configured namespace,
/// registers given connections and applies all declarations: static ones first, then the ones
/// given explicitly.
#[derive(Constructor)]
pub struct Bootstrap<CP: BootstrapConfigProvider> {
    config_provider: CP,
    metadata: MetadataInspectorPtr,
    connections: Vec<(String, ConnectionPtr)>,
    declarations: Vec<Declaration>,
}

impl Bootstrap<DefaultBootstrapConfigProvider> {
    /// Creates a bootstrap using configuration from the environment.
    pub fn from_environment(
        metadata: MetadataInspectorPtr,
        connections: Vec<(String, ConnectionPtr)>,
    ) -> Self {
        Self::new(
            DefaultBootstrapConfigProvider::new(),
            metadata,
            connections,
            vec![],
        )
    }
}

impl<CP: BootstrapConfigProvider> Bootstrap<CP> {
    /// Runs the bootstrap, returning the initialized container. Declarations are all applied, even
    /// if some fail; the failures are then returned together. The container stays initialized
    /// in such case.
    pub fn run(&self) -> Result<Arc<Container>, BootstrapError> {
        let config = self
            .config_provider
            .config()
            .map_err(BootstrapError::Config)?;

        if config.install_tracing_logger {
            install_tracing_logger();
        }

        info!(namespace = %config.namespace, "Initializing container...");

        let container = container::init(
            ContainerBuilder::new(&config.namespace)
                .with_metadata_inspector(self.metadata.clone())
                .with_config(config.resolver),
        );

        for (name, connection) in &self.connections {
            container.register_connection(name.clone(), connection.clone());
        }

        info!("Applying declarations...");

        let mut errors = apply_static_declarations(&container);
        errors.extend(apply_declarations(&container, &self.declarations));

        if errors.is_empty() {
            Ok(container)
        } else {
            Err(BootstrapError::Declarations(errors))
        }
    }
}

fn install_tracing_logger() {
    if tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {
        debug!("Global tracing subscriber already installed.");
    }
}
