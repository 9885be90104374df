use async_trait::async_trait;
use log::info;
use sha2::{Digest, Sha256};
use stack_defs::{Attributes, Resource, ResourceProvisioner, ResourceSpec};

/// Provisioner that creates nothing and reports the attributes a real
/// backend would, derived deterministically from the resource. Used to
/// preview a stack's resolved outputs.
#[derive(Debug, Clone, Default)]
pub struct DryRunProvisioner;

impl DryRunProvisioner {
    pub fn new() -> Self {
        DryRunProvisioner
    }
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn value_of(output: &stack_defs::Output) -> String {
    output.value().unwrap_or_default().to_string()
}

pub fn dry_run_attributes(resource: &Resource) -> Attributes {
    let mut attributes = Attributes::new();
    let id = sha256_hex(&resource.name)[..10].to_string();
    match &resource.properties {
        ResourceSpec::Repository(spec) => {
            attributes.insert("repository_id".to_string(), spec.repository_id.clone());
            attributes.insert(
                "name".to_string(),
                format!("locations/{}/repositories/{}", spec.location, spec.repository_id),
            );
        }
        ResourceSpec::Image(spec) => {
            let image_name = value_of(&spec.image_name);
            let digest = sha256_hex(&format!("{}:{}", image_name, spec.build.context));
            attributes.insert("image_name".to_string(), image_name.clone());
            attributes.insert(
                "repo_digest".to_string(),
                format!("{}@sha256:{}", image_name, digest),
            );
        }
        ResourceSpec::Service(spec) => {
            attributes.insert("name".to_string(), resource.name.clone());
            attributes.insert(
                "url".to_string(),
                format!("https://{}-{}.{}.run.app", resource.name, &id[..6], spec.location),
            );
        }
        ResourceSpec::ServiceInvoker(spec) => {
            attributes.insert("etag".to_string(), id.clone());
            attributes.insert("service".to_string(), value_of(&spec.service));
        }
        ResourceSpec::HttpApi(_) => {
            attributes.insert(
                "api_endpoint".to_string(),
                format!("https://{}.execute-api.amazonaws.com", id),
            );
        }
        ResourceSpec::Stage(spec) => {
            attributes.insert("name".to_string(), spec.name.clone());
        }
        ResourceSpec::ApiMapping(spec) => {
            attributes.insert("api_mapping_key".to_string(), spec.api_mapping_key.clone());
        }
    }
    attributes.insert("id".to_string(), id);
    attributes
}

#[async_trait]
impl ResourceProvisioner for DryRunProvisioner {
    async fn create(&self, resource: &Resource) -> Result<Attributes, anyhow::Error> {
        info!("[dry-run] create {} ({})", resource.name, resource.type_token);
        Ok(dry_run_attributes(resource))
    }

    async fn delete(&self, resource: &Resource) -> Result<(), anyhow::Error> {
        info!("[dry-run] delete {} ({})", resource.name, resource.type_token);
        Ok(())
    }
}
