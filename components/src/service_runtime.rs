use std::collections::BTreeMap;
use std::time::Duration;

use log::info;
use stack_defs::{
    CleanupCondition, CleanupPolicy, ComponentError, ComponentKind, ContainerPort, ContainerSpec,
    DockerBuild, GcpProviderConfig, ImageSpec, MostRecentVersions, Output, RegistryAuth,
    RepositorySpec, Resource, ResourceKind, ResourceLimits, ResourceSpec, ServiceInvokerSpec,
    ServiceRuntimeConfig, ServiceRuntimeOutputs, ServiceSpec,
};
use stack_utils::{
    repository_id, resource_name, validate_name_segment, validate_not_empty, validate_positive,
    ConfigStore,
};

use crate::{provider_config::resolve_gcp_config, ComponentDeclaration, Stack};

pub const KEEP_NEWEST_POLICY_ID: &str = "max_images";
pub const PURGE_OLD_POLICY_ID: &str = "all_artifacts";
/// Artifacts older than this are deleted whatever the keep rule says.
pub const ARTIFACT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// The serverless runtime only runs x86_64 images.
pub const TARGET_PLATFORM: &str = "linux/amd64";
pub const REGISTRY_HOST_SUFFIX: &str = "-docker.pkg.dev";
pub const REGISTRY_USERNAME: &str = "_json_key";
pub const INVOKER_ROLE: &str = "roles/run.invoker";
pub const PUBLIC_MEMBER: &str = "allUsers";

pub fn validate_service_runtime_config(config: &ServiceRuntimeConfig) -> Result<(), ComponentError> {
    validate_name_segment("environment", &config.environment)?;
    validate_name_segment("imageName", &config.image_name)?;
    validate_positive("maxImages", config.max_images.into())?;
    validate_not_empty("appPath", &config.app_path)?;
    validate_not_empty("memory", &config.memory)?;
    validate_not_empty("cpu", &config.cpu)?;
    validate_positive("containerPort", config.container_port.into())?;
    validate_positive("concurrency", config.concurrency.into())?;
    Ok(())
}

pub fn cleanup_policies(max_images: u32) -> Vec<CleanupPolicy> {
    vec![
        CleanupPolicy::Keep {
            id: KEEP_NEWEST_POLICY_ID.to_string(),
            most_recent_versions: MostRecentVersions {
                keep_count: max_images,
            },
        },
        CleanupPolicy::Delete {
            id: PURGE_OLD_POLICY_ID.to_string(),
            condition: CleanupCondition {
                older_than: ARTIFACT_MAX_AGE,
            },
        },
    ]
}

/// `{region}-docker.pkg.dev/{project}/{repositoryId}`, known once the
/// repository reports its id.
pub fn repository_url(gcp: &GcpProviderConfig, repository: &Resource) -> Output {
    Output::concat(vec![
        Output::known(format!(
            "{}{}/{}/",
            gcp.region, REGISTRY_HOST_SUFFIX, gcp.project
        )),
        Output::attribute(&repository.name, "repository_id"),
    ])
}

/// Declares the registry repository, image, service and public invoker for
/// one container image, in that order. Provider configuration is resolved
/// before anything is declared.
pub fn declare_service_runtime(
    name: &str,
    config: &ServiceRuntimeConfig,
    store: &dyn ConfigStore,
) -> Result<ComponentDeclaration<ServiceRuntimeOutputs>, ComponentError> {
    let gcp = resolve_gcp_config(store)?;
    validate_service_runtime_config(config)?;

    info!(
        "Declaring service runtime {} for image {} in {} ({})",
        name, config.image_name, config.environment, gcp.region
    );

    let name_of = |kind| {
        resource_name(
            ComponentKind::ServiceRuntime,
            kind,
            &config.image_name,
            &config.environment,
        )
    };

    let repository = Resource::new(
        name_of(ResourceKind::Repository),
        ResourceSpec::Repository(RepositorySpec {
            description: format!(
                "{} repository for {} Docker images",
                config.environment, config.image_name
            ),
            format: "DOCKER".to_string(),
            location: gcp.region.clone(),
            repository_id: repository_id(&config.image_name, &config.environment),
            cleanup_policies: cleanup_policies(config.max_images),
        }),
    );

    let repo_url = repository_url(&gcp, &repository);
    let image = Resource::new(
        name_of(ResourceKind::Image),
        ResourceSpec::Image(ImageSpec {
            image_name: Output::concat(vec![
                repo_url.clone(),
                Output::known(format!("/{}", config.image_name)),
            ]),
            build: DockerBuild {
                context: config.app_path.clone(),
                platform: TARGET_PLATFORM.to_string(),
                args: BTreeMap::from([(
                    "DOCKER_DEFAULT_PLATFORM".to_string(),
                    TARGET_PLATFORM.to_string(),
                )]),
            },
            registry: RegistryAuth {
                server: repo_url,
                username: REGISTRY_USERNAME.to_string(),
                password: gcp.credentials.clone(),
            },
        }),
    )
    .depends_on(&repository);

    // Pin the revision to the pushed content, never to the mutable tag.
    let image_digest = Output::attribute(&image.name, "repo_digest").or_default("");
    let service = Resource::new(
        name_of(ResourceKind::Service),
        ResourceSpec::Service(ServiceSpec {
            location: gcp.region.clone(),
            containers: vec![ContainerSpec {
                image: image_digest,
                limits: ResourceLimits {
                    memory: config.memory.clone(),
                    cpu: config.cpu.clone(),
                },
                ports: vec![ContainerPort {
                    container_port: config.container_port,
                }],
            }],
            container_concurrency: config.concurrency,
        }),
    )
    .depends_on(&image);

    let invoker = Resource::new(
        name_of(ResourceKind::Invoker),
        ResourceSpec::ServiceInvoker(ServiceInvokerSpec {
            location: gcp.region.clone(),
            service: Output::attribute(&service.name, "name"),
            role: INVOKER_ROLE.to_string(),
            member: PUBLIC_MEMBER.to_string(),
        }),
    )
    .depends_on(&service);

    let outputs = ServiceRuntimeOutputs {
        service_url: Output::attribute(&service.name, "url"),
    };

    let mut stack = Stack::new();
    stack.push(repository)?;
    stack.push(image)?;
    stack.push(service)?;
    stack.push(invoker)?;

    Ok(ComponentDeclaration::new(
        name,
        ComponentKind::ServiceRuntime,
        stack,
        outputs,
    ))
}
