use pretty_assertions::assert_eq;
use stack_components::{declare_gateway, declare_service_runtime};
use stack_defs::{
    CleanupPolicy, ComponentError, ConfigError, GatewayConfig, Output, OutputState, ResourceSpec,
    ServiceRuntimeConfig,
};
use stack_utils::MapConfigStore;

fn gcp_store() -> MapConfigStore {
    MapConfigStore::new()
        .set("gcp", "project", "my-project")
        .set("gcp", "region", "europe-west1")
        .set("gcp", "credentials", "{\"type\": \"service_account\"}")
}

fn aws_store() -> MapConfigStore {
    MapConfigStore::new()
        .set("aws", "region", "eu-central-1")
        .set("aws", "accessKey", "AKIAEXAMPLE")
        .set("aws", "secretKey", "secret")
}

fn staging_service() -> ServiceRuntimeConfig {
    ServiceRuntimeConfig {
        environment: "staging".to_string(),
        image_name: "api".to_string(),
        max_images: 5,
        app_path: "./app".to_string(),
        memory: "512Mi".to_string(),
        cpu: "1".to_string(),
        container_port: 8080,
        concurrency: 80,
    }
}

fn gateway(environment: &str) -> GatewayConfig {
    GatewayConfig {
        environment: environment.to_string(),
        image_name: "api".to_string(),
        container_url: Output::known("https://svc.example"),
        app_domain: "https://app.example.com".to_string(),
        api_domain: "api.example.com".to_string(),
    }
}

#[test]
fn test_service_runtime_declares_four_chained_resources() {
    let declaration = declare_service_runtime("api", &staging_service(), &gcp_store()).unwrap();
    let stack = &declaration.resources;

    assert_eq!(
        stack.names(),
        vec![
            "container-component-api-repo-staging",
            "container-component-api-image-staging",
            "container-component-api-service-staging",
            "container-component-api-invoker-staging",
        ]
    );
    let names = stack.names();
    assert_eq!(stack.dependencies(names[0]), Some(vec![]));
    for pair in names.windows(2) {
        assert_eq!(stack.dependencies(pair[1]), Some(vec![pair[0]]));
    }
    assert!(stack.check_complete().is_ok());

    assert_eq!(
        declaration.outputs.service_url.state(),
        OutputState::Pending {
            waiting_on: vec!["container-component-api-service-staging".to_string()]
        }
    );
    assert_eq!(declaration.type_token, "custom:container:ContainerComponent");
    assert!(declaration.provider.is_none());
}

#[test]
fn test_repository_keeps_newest_and_purges_old_artifacts() {
    let declaration = declare_service_runtime("api", &staging_service(), &gcp_store()).unwrap();
    let repository = &declaration.resources.resources()[0];
    let ResourceSpec::Repository(spec) = &repository.properties else {
        panic!("first resource should be the repository");
    };
    assert_eq!(spec.repository_id, "api-staging");
    assert_eq!(spec.description, "staging repository for api Docker images");
    assert_eq!(spec.location, "europe-west1");

    let keep = spec.cleanup_policies.iter().find_map(|p| match p {
        CleanupPolicy::Keep {
            id,
            most_recent_versions,
        } => Some((id.as_str(), most_recent_versions.keep_count)),
        _ => None,
    });
    assert_eq!(keep, Some(("max_images", 5)));

    let purge = spec.cleanup_policies.iter().find_map(|p| match p {
        CleanupPolicy::Delete { id, condition } => {
            Some((id.as_str(), condition.older_than.as_secs()))
        }
        _ => None,
    });
    assert_eq!(purge, Some(("all_artifacts", 12 * 60 * 60)));
}

#[test]
fn test_image_builds_for_single_platform_and_pushes_to_repository() {
    let declaration = declare_service_runtime("api", &staging_service(), &gcp_store()).unwrap();
    let image = &declaration.resources.resources()[1];
    let ResourceSpec::Image(spec) = &image.properties else {
        panic!("second resource should be the image");
    };
    assert_eq!(
        spec.image_name.to_string(),
        "europe-west1-docker.pkg.dev/my-project/${container-component-api-repo-staging.repository_id}/api"
    );
    assert_eq!(spec.build.platform, "linux/amd64");
    assert_eq!(
        spec.build.args.get("DOCKER_DEFAULT_PLATFORM").map(String::as_str),
        Some("linux/amd64")
    );
    assert_eq!(spec.build.context, "./app");
    assert_eq!(spec.registry.username, "_json_key");
    assert_eq!(spec.registry.password.expose(), "{\"type\": \"service_account\"}");
}

#[test]
fn test_service_uses_image_digest_with_empty_default() {
    let declaration = declare_service_runtime("api", &staging_service(), &gcp_store()).unwrap();
    let service = &declaration.resources.resources()[2];
    let ResourceSpec::Service(spec) = &service.properties else {
        panic!("third resource should be the service");
    };
    assert_eq!(spec.containers.len(), 1);
    let container = &spec.containers[0];
    assert_eq!(
        container.image,
        Output::attribute("container-component-api-image-staging", "repo_digest").or_default("")
    );
    assert_eq!(container.limits.memory, "512Mi");
    assert_eq!(container.limits.cpu, "1");
    assert_eq!(container.ports.len(), 1);
    assert_eq!(container.ports[0].container_port, 8080);
    assert_eq!(spec.container_concurrency, 80);
}

#[test]
fn test_invoker_grants_public_access() {
    let declaration = declare_service_runtime("api", &staging_service(), &gcp_store()).unwrap();
    let invoker = &declaration.resources.resources()[3];
    let ResourceSpec::ServiceInvoker(spec) = &invoker.properties else {
        panic!("fourth resource should be the invoker");
    };
    assert_eq!(spec.role, "roles/run.invoker");
    assert_eq!(spec.member, "allUsers");
    assert_eq!(
        spec.service,
        Output::attribute("container-component-api-service-staging", "name")
    );
}

#[test]
fn test_service_runtime_fails_fast_on_missing_config() {
    let store = MapConfigStore::new()
        .set("gcp", "project", "my-project")
        .set("gcp", "credentials", "{}");
    let err = declare_service_runtime("api", &staging_service(), &store).unwrap_err();
    assert!(matches!(
        err,
        ComponentError::Config(ConfigError::Missing { ref key, .. }) if key == "region"
    ));
}

#[test]
fn test_production_gateway_maps_default_stage() {
    let declaration = declare_gateway("api", &gateway("prod"), &aws_store()).unwrap();
    let stack = &declaration.resources;

    assert_eq!(
        stack.names(),
        vec!["api-component-api-api-prod", "api-component-api-mapping-prod"]
    );
    assert_eq!(
        declaration.outputs.endpoint.value(),
        Some("https://api.example.com/api")
    );

    let ResourceSpec::ApiMapping(mapping) = &stack.resources()[1].properties else {
        panic!("second resource should be the mapping");
    };
    assert_eq!(mapping.stage, Output::known("$default"));
    assert_eq!(mapping.api_mapping_key, "api");
    assert_eq!(mapping.domain_name, "api.example.com");
    assert_eq!(
        stack.dependencies("api-component-api-mapping-prod"),
        Some(vec!["api-component-api-api-prod"])
    );
}

#[test]
fn test_standard_gateway_creates_auto_deployed_stage() {
    for environment in ["dev", "staging", "production"] {
        let declaration = declare_gateway("api", &gateway(environment), &aws_store()).unwrap();
        let stack = &declaration.resources;
        assert_eq!(stack.len(), 3);
        assert_eq!(
            declaration.outputs.endpoint.value(),
            Some(format!("https://api.example.com/api/{}", environment).as_str())
        );

        let ResourceSpec::Stage(stage) = &stack.resources()[1].properties else {
            panic!("second resource should be the stage");
        };
        assert_eq!(stage.name, environment);
        assert!(stage.auto_deploy);

        let ResourceSpec::ApiMapping(mapping) = &stack.resources()[2].properties else {
            panic!("third resource should be the mapping");
        };
        assert_eq!(mapping.api_mapping_key, format!("api/{}", environment));
        assert_eq!(
            mapping.stage,
            Output::attribute(format!("api-component-api-stage-{}", environment), "name")
        );
    }
}

#[test]
fn test_gateway_api_routes_everything_to_container() {
    let declaration = declare_gateway("api", &gateway("dev"), &aws_store()).unwrap();
    let api = &declaration.resources.resources()[0];
    let ResourceSpec::HttpApi(spec) = &api.properties else {
        panic!("first resource should be the api");
    };
    assert_eq!(spec.name, "api");
    assert_eq!(spec.protocol_type, "HTTP");
    assert!(spec.disable_execute_api_endpoint);
    assert_eq!(spec.target, Output::known("https://svc.example"));
    assert_eq!(spec.route_key, "$default");
    assert_eq!(spec.cors_configuration.allow_origins, vec!["https://app.example.com"]);
    assert_eq!(api.provider.as_deref(), Some("api-component-aws-dev"));

    let provider = declaration.provider.expect("gateway binds an explicit provider");
    assert_eq!(provider.name, "api-component-aws-dev");
    assert_eq!(provider.region, "eu-central-1");
}

#[test]
fn test_gateway_fails_fast_on_missing_or_invalid_region() {
    let missing = MapConfigStore::new()
        .set("aws", "accessKey", "AKIAEXAMPLE")
        .set("aws", "secretKey", "secret");
    let err = declare_gateway("api", &gateway("prod"), &missing).unwrap_err();
    assert!(matches!(
        err,
        ComponentError::Config(ConfigError::Missing { ref key, .. }) if key == "region"
    ));

    let invalid = missing.set("aws", "region", "mars-north-1");
    let err = declare_gateway("api", &gateway("prod"), &invalid).unwrap_err();
    assert!(matches!(err, ComponentError::Config(ConfigError::InvalidRegion(_))));
}

#[test]
fn test_declaration_renders_without_secrets() {
    let declaration = declare_service_runtime("api", &staging_service(), &gcp_store()).unwrap();
    let rendered = serde_json::to_string(&declaration).unwrap();
    assert!(!rendered.contains("service_account"));
    assert!(rendered.contains("[secret]"));
}
