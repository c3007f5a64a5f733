mod bootstrap_test {
    use orm_inject::capability::kind::TreeRepository;
    use orm_inject::capability::ProviderVariant;
    use orm_inject::config::{CustomEntityPolicy, ResolverConfig};
    use orm_inject::connection::{ConnectionPtr, StaticConnection};
    use orm_inject::container::Container;
    use orm_inject::declare_injections;
    use orm_inject::identity::{EntityDescriptor, InjectionPoint};
    use orm_inject::metadata::StaticMetadataInspector;
    use orm_inject::provider::ErrorPtr;
    use orm_inject::BindingError;
    use orm_inject_bootstrap::bootstrap::Bootstrap;
    use orm_inject_bootstrap::config::{BootstrapConfig, BootstrapConfigProvider};
    use std::sync::Arc;

    struct Category;
    struct CategoryService;

    #[derive(Debug)]
    struct CategoryTreeRepository;

    #[derive(Debug)]
    struct EntityManager;

    struct TestConfigProvider;

    impl BootstrapConfigProvider for TestConfigProvider {
        fn config(&self) -> Result<BootstrapConfig, ErrorPtr> {
            Ok(BootstrapConfig::default()
                .with_install_tracing_logger(false)
                .with_namespace("bootstrap_integration")
                .with_resolver(
                    ResolverConfig::default()
                        .with_default_connection_name("main")
                        .with_custom_entity_policy(CustomEntityPolicy::Ignore),
                ))
        }
    }

    fn declare_category_service(container: &Container) -> Result<(), BindingError> {
        container.inject_repository(
            InjectionPoint::field::<CategoryService>("categories"),
            EntityDescriptor::of::<Category>(),
        )?;
        container.inject_manager(InjectionPoint::field::<CategoryService>("manager"), None);
        Ok(())
    }

    declare_injections!(declare_category_service);

    #[test]
    fn should_bootstrap_with_static_declarations() {
        let connection: ConnectionPtr = Arc::new(
            StaticConnection::builder()
                .with_specialized_repository::<Category, _>(
                    ProviderVariant::Tree,
                    CategoryTreeRepository,
                )
                .with_manager(EntityManager)
                .build(),
        );

        let bootstrap = Bootstrap::new(
            TestConfigProvider,
            Arc::new(
                StaticMetadataInspector::default()
                    .with_field::<CategoryService, TreeRepository>("categories"),
            ),
            vec![("main".to_string(), connection)],
            vec![],
        );

        let container = bootstrap.run().unwrap();
        assert_eq!(container.namespace(), "bootstrap_integration");
        assert_eq!(container.resolver().config().default_connection_name, "main");

        assert!(container
            .invoke_typed::<CategoryTreeRepository>(&InjectionPoint::field::<CategoryService>(
                "categories"
            ))
            .is_ok());
        assert!(container
            .invoke_typed::<EntityManager>(&InjectionPoint::field::<CategoryService>("manager"))
            .is_ok());
    }
}
