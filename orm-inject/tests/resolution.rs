mod resolution_test {
    use orm_inject::binding::InjectOptions;
    use orm_inject::capability::kind::{DocumentRepository, StandardRepository};
    use orm_inject::capability::{CapabilityToken, ProviderVariant};
    use orm_inject::connection::{ConnectionAdapter, ConnectionPtr, StaticConnection};
    use orm_inject::container::{self, ContainerBuilder};
    use orm_inject::identity::{EntityDescriptor, InjectionPoint};
    use orm_inject::metadata::StaticMetadataInspector;
    use orm_inject::{BindingError, ResolutionError};
    use std::sync::Arc;

    struct User;
    struct Article;

    #[derive(Debug, Eq, PartialEq)]
    struct UserRepository(&'static str);

    #[derive(Debug)]
    struct ArticleDocumentRepository;

    struct UserService;

    fn user_connection(name: &'static str) -> ConnectionPtr {
        Arc::new(
            StaticConnection::builder()
                .with_repository::<User, _>(UserRepository(name))
                .with_specialized_repository::<Article, _>(
                    ProviderVariant::Document,
                    ArticleDocumentRepository,
                )
                .build(),
        )
    }

    #[test]
    fn should_resolve_same_provider_as_connection() {
        let container = ContainerBuilder::new("same_provider").build();
        let injection_point = InjectionPoint::field::<UserService>("users");
        let connection = user_connection("default");

        container
            .inject_repository(
                injection_point.clone(),
                InjectOptions::new()
                    .entity::<User>()
                    .kind(CapabilityToken::Standard),
            )
            .unwrap();
        container.register_connection("default", connection.clone());

        let direct = connection
            .resolve(CapabilityToken::Standard, Some(&EntityDescriptor::of::<User>()))
            .unwrap();
        let injected = container.invoke(&injection_point).unwrap();

        assert!(Arc::ptr_eq(&direct, &injected));
    }

    #[test]
    fn should_fail_for_missing_connection() {
        let container = ContainerBuilder::new("missing_connection").build();
        container.register_connection("default", user_connection("default"));

        assert!(matches!(
            container.connections().get("missing"),
            Err(ResolutionError::ConnectionNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn should_use_last_registered_handler() {
        let container = ContainerBuilder::new("double_registration").build();
        let injection_point = InjectionPoint::field::<UserService>("users");
        let options = InjectOptions::new()
            .entity::<User>()
            .kind(CapabilityToken::Standard);

        container
            .inject_repository(injection_point.clone(), options.clone().connection("first"))
            .unwrap();
        container
            .inject_repository(injection_point.clone(), options.connection("second"))
            .unwrap();
        container.register_connection("first", user_connection("first"));
        container.register_connection("second", user_connection("second"));

        assert_eq!(container.handlers().len(), 1);
        assert_eq!(
            *container
                .invoke_typed::<UserRepository>(&injection_point)
                .unwrap(),
            UserRepository("second")
        );
    }

    #[test]
    fn should_require_entity_regardless_of_metadata() {
        let injection_point = InjectionPoint::field::<UserService>("users");
        let container = ContainerBuilder::new("entity_required")
            .with_metadata_inspector(Arc::new(
                StaticMetadataInspector::default()
                    .with_field::<UserService, StandardRepository>("users"),
            ))
            .build();

        assert!(matches!(
            container
                .inject_repository(injection_point.clone(), ())
                .unwrap_err(),
            BindingError::EntityTypeMissing { .. }
        ));
        assert!(matches!(
            container
                .inject_repository(
                    injection_point,
                    InjectOptions::new().kind(CapabilityToken::Standard)
                )
                .unwrap_err(),
            BindingError::EntityTypeMissing { .. }
        ));
        assert!(container.handlers().is_empty());
    }

    #[test]
    fn should_not_register_handler_without_metadata() {
        let container = ContainerBuilder::new("metadata_missing").build();
        let injection_point = InjectionPoint::parameter::<UserService>(1);
        container.register_connection("default", user_connection("default"));

        assert!(matches!(
            container
                .inject_repository(injection_point.clone(), EntityDescriptor::of::<User>())
                .unwrap_err(),
            BindingError::MetadataMissing { .. }
        ));
        assert!(matches!(
            container.invoke(&injection_point).unwrap_err(),
            ResolutionError::HandlerNotFound { .. }
        ));
    }

    #[test]
    fn should_not_mix_connections() {
        let container = ContainerBuilder::new("separate_connections").build();
        let default_point = InjectionPoint::field::<UserService>("users");
        let secondary_point = InjectionPoint::field::<UserService>("archived_users");
        let options = InjectOptions::new()
            .entity::<User>()
            .kind(CapabilityToken::Standard);

        container
            .inject_repository(default_point.clone(), options.clone())
            .unwrap();
        container
            .inject_repository(secondary_point.clone(), options.connection("secondary"))
            .unwrap();
        container.register_connection("default", user_connection("default"));
        container.register_connection("secondary", user_connection("secondary"));

        assert_eq!(
            *container
                .invoke_typed::<UserRepository>(&default_point)
                .unwrap(),
            UserRepository("default")
        );
        assert_eq!(
            *container
                .invoke_typed::<UserRepository>(&secondary_point)
                .unwrap(),
            UserRepository("secondary")
        );
    }

    #[test]
    fn should_resolve_declared_document_repository() {
        let injection_point = InjectionPoint::parameter::<UserService>(0);
        let container = ContainerBuilder::new("declared_document")
            .with_metadata_inspector(Arc::new(
                StaticMetadataInspector::default()
                    .with_parameter::<UserService, DocumentRepository>(0),
            ))
            .build();

        let binding = container
            .inject_repository(
                injection_point.clone(),
                (EntityDescriptor::of::<Article>(), "documents"),
            )
            .unwrap();
        assert_eq!(binding.connection_name, "documents");

        assert!(matches!(
            container.invoke(&injection_point).unwrap_err(),
            ResolutionError::ConnectionNotFound(_)
        ));

        container.register_connection("documents", user_connection("documents"));
        assert!(container
            .invoke_typed::<ArticleDocumentRepository>(&injection_point)
            .is_ok());
    }

    #[test]
    fn should_isolate_global_namespaces() {
        let injection_point = InjectionPoint::field::<UserService>("manager");
        let first = container::get_or_init("isolated_first");
        let second = container::get_or_init("isolated_second");

        first.inject_manager(injection_point.clone(), None);
        first.register_connection("default", user_connection("default"));

        assert!(matches!(
            second.invoke(&injection_point).unwrap_err(),
            ResolutionError::HandlerNotFound { .. }
        ));
        assert!(matches!(
            first.invoke(&injection_point).unwrap_err(),
            ResolutionError::ManagerNotFound(name) if name == "default"
        ));

        container::reset("isolated_first");
        container::reset("isolated_second");
    }
}
