use stack_defs::{AwsProviderConfig, ConfigError, GcpProviderConfig};
use stack_utils::ConfigStore;

pub const GCP_NAMESPACE: &str = "gcp";
pub const AWS_NAMESPACE: &str = "aws";

pub fn resolve_gcp_config(store: &dyn ConfigStore) -> Result<GcpProviderConfig, ConfigError> {
    Ok(GcpProviderConfig {
        project: store.require(GCP_NAMESPACE, "project")?,
        region: store.require(GCP_NAMESPACE, "region")?,
        credentials: store.require_secret(GCP_NAMESPACE, "credentials")?,
    })
}

pub fn resolve_aws_config(store: &dyn ConfigStore) -> Result<AwsProviderConfig, ConfigError> {
    Ok(AwsProviderConfig {
        region: store.require(AWS_NAMESPACE, "region")?.parse()?,
        access_key: store.require_secret(AWS_NAMESPACE, "accessKey")?,
        secret_key: store.require_secret(AWS_NAMESPACE, "secretKey")?,
    })
}
