mod component;
pub mod errors;
mod output;
mod provider;
mod region;
mod resource;
mod secret;
mod state;
mod tier;

pub use component::{
    ComponentKind, GatewayConfig, GatewayOutputs, ResourceKind, ServiceRuntimeConfig,
    ServiceRuntimeOutputs,
};
pub use errors::{ComponentError, ConfigError, OutputError, StackError};
pub use output::{Attributes, Output, OutputState};
pub use provider::{AwsProviderConfig, GcpProviderConfig, ProviderBinding, ResourceProvisioner};
pub use region::AwsRegion;
pub use resource::{
    ApiMappingSpec, CleanupCondition, CleanupPolicy, ContainerPort, ContainerSpec,
    CorsConfiguration, DockerBuild, HttpApiSpec, ImageSpec, MostRecentVersions, RegistryAuth,
    RepositorySpec, Resource, ResourceLimits, ResourceSpec, ServiceInvokerSpec, ServiceSpec,
    StageSpec,
};
pub use secret::Secret;
pub use state::StackState;
pub use tier::{Tier, PRODUCTION_ENVIRONMENT};
