mod declaration;
mod dry_run;
mod gateway;
mod provider_config;
mod service_runtime;
mod stack;

pub use declaration::ComponentDeclaration;
pub use dry_run::{dry_run_attributes, DryRunProvisioner};
pub use gateway::{
    api_mapping_key, cors_configuration, declare_gateway, gateway_endpoint,
    validate_gateway_config, CORS_ALLOWED_METHODS, DEFAULT_ROUTE_KEY, DEFAULT_STAGE,
};
pub use provider_config::{resolve_aws_config, resolve_gcp_config, AWS_NAMESPACE, GCP_NAMESPACE};
pub use service_runtime::{
    cleanup_policies, declare_service_runtime, repository_url, validate_service_runtime_config,
    ARTIFACT_MAX_AGE, INVOKER_ROLE, KEEP_NEWEST_POLICY_ID, PUBLIC_MEMBER, PURGE_OLD_POLICY_ID,
    REGISTRY_HOST_SUFFIX, REGISTRY_USERNAME, TARGET_PLATFORM,
};
pub use stack::Stack;
pub use stack_defs::StackState;
