use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use stack_defs::{GatewayConfig, Output, ServiceRuntimeConfig};

pub fn read_manifest<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Gateway section of a stack file. `containerUrl` may be left out when the
/// same file declares the service it should route to.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GatewayManifest {
    pub environment: String,
    pub image_name: String,
    pub container_url: Option<String>,
    pub app_domain: String,
    pub api_domain: String,
}

impl GatewayManifest {
    pub fn into_config(self, upstream: Option<&Output>) -> Result<GatewayConfig> {
        let container_url = match (self.container_url, upstream) {
            (Some(url), _) => Output::known(url),
            (None, Some(service_url)) => service_url.clone(),
            (None, None) => {
                return Err(anyhow!(
                    "gateway.containerUrl is required when the stack has no service section"
                ))
            }
        };
        Ok(GatewayConfig {
            environment: self.environment,
            image_name: self.image_name,
            container_url,
            app_domain: self.app_domain,
            api_domain: self.api_domain,
        })
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct StackManifest {
    pub service: Option<ServiceRuntimeConfig>,
    pub gateway: Option<GatewayManifest>,
}
