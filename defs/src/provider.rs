use async_trait::async_trait;
use serde::Serialize;

use crate::{Attributes, AwsRegion, Resource, Secret};

/// Provider settings for the registry, image build and serverless runtime.
#[derive(Debug, Clone)]
pub struct GcpProviderConfig {
    pub project: String,
    pub region: String,
    pub credentials: Secret,
}

/// Provider settings for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct AwsProviderConfig {
    pub region: AwsRegion,
    pub access_key: Secret,
    pub secret_key: Secret,
}

/// Explicit provider instance a component's resources are bound to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderBinding {
    pub name: String,
    #[serde(rename = "type")]
    pub type_token: &'static str,
    pub region: String,
    pub access_key: Secret,
    pub secret_key: Secret,
}

impl ProviderBinding {
    pub fn aws(name: impl Into<String>, config: &AwsProviderConfig) -> Self {
        ProviderBinding {
            name: name.into(),
            type_token: "pulumi:providers:aws",
            region: config.region.to_string(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        }
    }
}

/// The collaborator that turns a resource descriptor into a live resource:
/// registry, image build and push backend, serverless runtime or gateway.
///
/// Implementations receive resources whose outputs have all been resolved.
#[async_trait]
pub trait ResourceProvisioner: Send + Sync {
    async fn create(&self, resource: &Resource) -> Result<Attributes, anyhow::Error>;
    async fn delete(&self, resource: &Resource) -> Result<(), anyhow::Error>;
}
