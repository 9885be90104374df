use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::{Output, Secret};

/// A resource descriptor handed to the reconciliation engine.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub type_token: &'static str,
    #[serde(rename = "dependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub properties: ResourceSpec,
}

impl Resource {
    pub fn new(name: impl Into<String>, properties: ResourceSpec) -> Self {
        Resource {
            name: name.into(),
            type_token: properties.type_token(),
            depends_on: Vec::new(),
            provider: None,
            properties,
        }
    }

    /// Adds an explicit ordering edge on a resource that is not otherwise
    /// referenced by any of this resource's properties.
    pub fn depends_on(mut self, resource: &Resource) -> Self {
        if !self.depends_on.contains(&resource.name) {
            self.depends_on.push(resource.name.clone());
        }
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Explicit edges followed by resources referenced from pending outputs.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = self.depends_on.iter().map(String::as_str).collect();
        for output in self.properties.outputs() {
            for reference in output.references() {
                if !deps.contains(&reference) {
                    deps.push(reference);
                }
            }
        }
        deps
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResourceSpec {
    Repository(RepositorySpec),
    Image(ImageSpec),
    Service(ServiceSpec),
    ServiceInvoker(ServiceInvokerSpec),
    HttpApi(HttpApiSpec),
    Stage(StageSpec),
    ApiMapping(ApiMappingSpec),
}

impl ResourceSpec {
    pub fn type_token(&self) -> &'static str {
        match self {
            ResourceSpec::Repository(_) => "gcp:artifactregistry:Repository",
            ResourceSpec::Image(_) => "docker:index:Image",
            ResourceSpec::Service(_) => "gcp:cloudrun:Service",
            ResourceSpec::ServiceInvoker(_) => "gcp:cloudrun:IamMember",
            ResourceSpec::HttpApi(_) => "aws:apigatewayv2:Api",
            ResourceSpec::Stage(_) => "aws:apigatewayv2:Stage",
            ResourceSpec::ApiMapping(_) => "aws:apigatewayv2:ApiMapping",
        }
    }

    pub fn outputs(&self) -> Vec<&Output> {
        match self {
            ResourceSpec::Repository(_) => vec![],
            ResourceSpec::Image(spec) => vec![&spec.image_name, &spec.registry.server],
            ResourceSpec::Service(spec) => spec.containers.iter().map(|c| &c.image).collect(),
            ResourceSpec::ServiceInvoker(spec) => vec![&spec.service],
            ResourceSpec::HttpApi(spec) => vec![&spec.target],
            ResourceSpec::Stage(spec) => vec![&spec.api_id],
            ResourceSpec::ApiMapping(spec) => vec![&spec.api_id, &spec.stage],
        }
    }

    pub fn outputs_mut(&mut self) -> Vec<&mut Output> {
        match self {
            ResourceSpec::Repository(_) => vec![],
            ResourceSpec::Image(spec) => vec![&mut spec.image_name, &mut spec.registry.server],
            ResourceSpec::Service(spec) => {
                spec.containers.iter_mut().map(|c| &mut c.image).collect()
            }
            ResourceSpec::ServiceInvoker(spec) => vec![&mut spec.service],
            ResourceSpec::HttpApi(spec) => vec![&mut spec.target],
            ResourceSpec::Stage(spec) => vec![&mut spec.api_id],
            ResourceSpec::ApiMapping(spec) => vec![&mut spec.api_id, &mut spec.stage],
        }
    }
}

// Artifact registry

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    pub description: String,
    pub format: String,
    pub location: String,
    pub repository_id: String,
    pub cleanup_policies: Vec<CleanupPolicy>,
}

/// Registry cleanup rules. Every rule is evaluated on each cleanup pass, so
/// an artifact kept by a `Keep` rule can still be removed by a `Delete` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "UPPERCASE")]
pub enum CleanupPolicy {
    Keep {
        id: String,
        #[serde(rename = "mostRecentVersions")]
        most_recent_versions: MostRecentVersions,
    },
    Delete {
        id: String,
        condition: CleanupCondition,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostRecentVersions {
    pub keep_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupCondition {
    #[serde(serialize_with = "serialize_seconds")]
    pub older_than: Duration,
}

fn serialize_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{}s", duration.as_secs()))
}

// Container image

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub image_name: Output,
    pub build: DockerBuild,
    pub registry: RegistryAuth,
}

#[derive(Debug, Clone, Serialize)]
pub struct DockerBuild {
    pub context: String,
    pub platform: String,
    pub args: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryAuth {
    pub server: Output,
    pub username: String,
    pub password: Secret,
}

// Serverless runtime

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    pub location: String,
    pub containers: Vec<ContainerSpec>,
    pub container_concurrency: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerSpec {
    pub image: Output,
    pub limits: ResourceLimits,
    pub ports: Vec<ContainerPort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLimits {
    pub memory: String,
    pub cpu: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub container_port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInvokerSpec {
    pub location: String,
    pub service: Output,
    pub role: String,
    pub member: String,
}

// HTTP gateway

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiSpec {
    pub name: String,
    pub protocol_type: String,
    pub disable_execute_api_endpoint: bool,
    pub target: Output,
    pub route_key: String,
    pub cors_configuration: CorsConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfiguration {
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_origins: Vec<String>,
    pub allow_credentials: bool,
    pub expose_headers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSpec {
    pub api_id: Output,
    pub auto_deploy: bool,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMappingSpec {
    pub api_id: Output,
    pub domain_name: String,
    pub stage: Output,
    pub api_mapping_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_dependencies_merge_explicit_and_referenced() {
        let api = Resource::new(
            "api",
            ResourceSpec::Stage(StageSpec {
                api_id: Output::known("abc"),
                auto_deploy: true,
                name: "dev".to_string(),
            }),
        );
        let mapping = Resource::new(
            "mapping",
            ResourceSpec::ApiMapping(ApiMappingSpec {
                api_id: Output::attribute("api", "id"),
                domain_name: "api.example.com".to_string(),
                stage: Output::attribute("stage", "name"),
                api_mapping_key: "svc/dev".to_string(),
            }),
        )
        .depends_on(&api);
        assert_eq!(mapping.dependencies(), vec!["api", "stage"]);
        assert_eq!(mapping.type_token, "aws:apigatewayv2:ApiMapping");
    }

    #[test]
    fn test_cleanup_policies_serialize_like_registry_api() {
        let policies = vec![
            CleanupPolicy::Keep {
                id: "max_images".to_string(),
                most_recent_versions: MostRecentVersions { keep_count: 3 },
            },
            CleanupPolicy::Delete {
                id: "all_artifacts".to_string(),
                condition: CleanupCondition {
                    older_than: Duration::from_secs(12 * 60 * 60),
                },
            },
        ];
        assert_eq!(
            serde_json::to_value(&policies).unwrap(),
            json!([
                {"action": "KEEP", "id": "max_images", "mostRecentVersions": {"keepCount": 3}},
                {"action": "DELETE", "id": "all_artifacts", "condition": {"olderThan": "43200s"}}
            ])
        );
    }

    #[test]
    fn test_registry_password_is_redacted_when_serialized() {
        let image = Resource::new(
            "image",
            ResourceSpec::Image(ImageSpec {
                image_name: Output::attribute("repo", "repository_id"),
                build: DockerBuild {
                    context: "./app".to_string(),
                    platform: "linux/amd64".to_string(),
                    args: BTreeMap::new(),
                },
                registry: RegistryAuth {
                    server: Output::known("host"),
                    username: "_json_key".to_string(),
                    password: Secret::new("hunter2"),
                },
            }),
        );
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["properties"]["registry"]["password"], json!("[secret]"));
        assert_eq!(value["properties"]["imageName"], json!("${repo.repository_id}"));
        assert_eq!(value["type"], json!("docker:index:Image"));
        assert!(value.get("dependsOn").is_none());
    }
}
