use serde::{Deserialize, Serialize};

use crate::Output;

/// The two components this workspace declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    ServiceRuntime,
    Gateway,
}

impl ComponentKind {
    /// Prefix shared by the names of every resource the component declares.
    pub fn prefix(&self) -> &'static str {
        match self {
            ComponentKind::ServiceRuntime => "container-component",
            ComponentKind::Gateway => "api-component",
        }
    }

    pub fn type_token(&self) -> &'static str {
        match self {
            ComponentKind::ServiceRuntime => "custom:container:ContainerComponent",
            ComponentKind::Gateway => "custom:container:ApiComponent",
        }
    }
}

/// Role of a resource inside its component, used as the middle segment of
/// the resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Repository,
    Image,
    Service,
    Invoker,
    Api,
    Stage,
    Mapping,
}

impl ResourceKind {
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceKind::Repository => "repo",
            ResourceKind::Image => "image",
            ResourceKind::Service => "service",
            ResourceKind::Invoker => "invoker",
            ResourceKind::Api => "api",
            ResourceKind::Stage => "stage",
            ResourceKind::Mapping => "mapping",
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRuntimeConfig {
    pub environment: String,
    pub image_name: String,
    /// Number of most recent image versions the registry keeps.
    pub max_images: u32,
    /// Docker build context.
    pub app_path: String,
    /// Memory limit per revision, e.g. "512Mi".
    pub memory: String,
    /// CPU limit per revision, e.g. "1".
    pub cpu: String,
    pub container_port: u16,
    /// Maximum concurrent requests per container instance.
    pub concurrency: u32,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub environment: String,
    pub image_name: String,
    /// Upstream service URL, usually the pending `service_url` of a service
    /// runtime component.
    pub container_url: Output,
    /// Single origin allowed by the CORS policy.
    pub app_domain: String,
    /// Custom domain the API is mapped under.
    pub api_domain: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRuntimeOutputs {
    pub service_url: Output,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GatewayOutputs {
    pub endpoint: Output,
}
