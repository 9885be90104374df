use log::info;
use stack_defs::{
    ApiMappingSpec, ComponentError, ComponentKind, CorsConfiguration, GatewayConfig,
    GatewayOutputs, HttpApiSpec, Output, ProviderBinding, Resource, ResourceKind, ResourceSpec,
    StageSpec, Tier,
};
use stack_utils::{
    provider_name, resource_name, validate_name_segment, validate_not_empty, ConfigStore,
};

use crate::{provider_config::resolve_aws_config, ComponentDeclaration, Stack};

pub const CORS_ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
pub const DEFAULT_ROUTE_KEY: &str = "$default";
/// Stage the production mapping targets; it is never declared as a resource.
pub const DEFAULT_STAGE: &str = "$default";

pub fn validate_gateway_config(config: &GatewayConfig) -> Result<(), ComponentError> {
    validate_name_segment("environment", &config.environment)?;
    validate_name_segment("imageName", &config.image_name)?;
    validate_not_empty("appDomain", &config.app_domain)?;
    validate_not_empty("apiDomain", &config.api_domain)?;
    if let Some(url) = config.container_url.value() {
        validate_not_empty("containerUrl", url)?;
    }
    Ok(())
}

pub fn cors_configuration(app_domain: &str) -> CorsConfiguration {
    CorsConfiguration {
        allow_methods: CORS_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect(),
        allow_headers: vec!["*".to_string()],
        allow_origins: vec![app_domain.to_string()],
        allow_credentials: true,
        expose_headers: vec!["*".to_string()],
    }
}

/// Path the custom domain routes to this API under.
pub fn api_mapping_key(image_name: &str, tier: &Tier) -> String {
    match tier {
        Tier::Standard(environment) => format!("{}/{}", image_name, environment),
        Tier::Production => image_name.to_string(),
    }
}

pub fn gateway_endpoint(api_domain: &str, image_name: &str, tier: &Tier) -> String {
    format!("https://{}/{}", api_domain, api_mapping_key(image_name, tier))
}

/// Declares the HTTP API in front of `config.container_url` and maps it
/// onto the custom domain. Standard tiers get their own auto-deployed
/// stage; production maps straight onto the default stage.
pub fn declare_gateway(
    name: &str,
    config: &GatewayConfig,
    store: &dyn ConfigStore,
) -> Result<ComponentDeclaration<GatewayOutputs>, ComponentError> {
    let aws = resolve_aws_config(store)?;
    validate_gateway_config(config)?;

    let tier = Tier::from_environment(&config.environment);
    info!(
        "Declaring gateway {} for image {} in {} ({})",
        name, config.image_name, tier, aws.region
    );

    let name_of = |kind| {
        resource_name(
            ComponentKind::Gateway,
            kind,
            &config.image_name,
            &config.environment,
        )
    };
    let provider = ProviderBinding::aws(
        provider_name(ComponentKind::Gateway, "aws", &config.environment),
        &aws,
    );

    let api = Resource::new(
        name_of(ResourceKind::Api),
        ResourceSpec::HttpApi(HttpApiSpec {
            name: config.image_name.clone(),
            protocol_type: "HTTP".to_string(),
            // All traffic goes through the custom domain mapping.
            disable_execute_api_endpoint: true,
            target: config.container_url.clone(),
            route_key: DEFAULT_ROUTE_KEY.to_string(),
            cors_configuration: cors_configuration(&config.app_domain),
        }),
    )
    .with_provider(&provider.name);
    let api_id = Output::attribute(&api.name, "id");

    let mut stack = Stack::new();
    let mapping_stage = match &tier {
        Tier::Standard(environment) => {
            let stage = Resource::new(
                name_of(ResourceKind::Stage),
                ResourceSpec::Stage(StageSpec {
                    api_id: api_id.clone(),
                    auto_deploy: true,
                    name: environment.clone(),
                }),
            )
            .with_provider(&provider.name);
            let stage_name = Output::attribute(&stage.name, "name");
            stack.push(api)?;
            stack.push(stage)?;
            stage_name
        }
        Tier::Production => {
            stack.push(api)?;
            Output::known(DEFAULT_STAGE)
        }
    };

    let mapping = Resource::new(
        name_of(ResourceKind::Mapping),
        ResourceSpec::ApiMapping(ApiMappingSpec {
            api_id,
            domain_name: config.api_domain.clone(),
            stage: mapping_stage,
            api_mapping_key: api_mapping_key(&config.image_name, &tier),
        }),
    )
    .with_provider(&provider.name);
    stack.push(mapping)?;

    let outputs = GatewayOutputs {
        endpoint: Output::known(gateway_endpoint(
            &config.api_domain,
            &config.image_name,
            &tier,
        )),
    };

    Ok(
        ComponentDeclaration::new(name, ComponentKind::Gateway, stack, outputs)
            .with_provider(provider),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint_per_tier() {
        let staging = Tier::from_environment("staging");
        assert_eq!(
            gateway_endpoint("api.example.com", "api", &staging),
            "https://api.example.com/api/staging"
        );
        assert_eq!(
            gateway_endpoint("api.example.com", "api", &Tier::Production),
            "https://api.example.com/api"
        );
    }

    #[test]
    fn test_mapping_key_per_tier() {
        assert_eq!(
            api_mapping_key("orders", &Tier::Standard("dev".to_string())),
            "orders/dev"
        );
        assert_eq!(api_mapping_key("orders", &Tier::Production), "orders");
    }

    #[test]
    fn test_cors_allows_single_origin() {
        let cors = cors_configuration("https://app.example.com");
        assert_eq!(
            cors.allow_methods,
            vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        );
        assert_eq!(cors.allow_origins, vec!["https://app.example.com"]);
        assert_eq!(cors.allow_headers, vec!["*"]);
        assert_eq!(cors.expose_headers, vec!["*"]);
        assert!(cors.allow_credentials);
    }

    #[test]
    fn test_validation_rejects_empty_domain() {
        let config = GatewayConfig {
            environment: "dev".to_string(),
            image_name: "api".to_string(),
            container_url: Output::attribute("svc", "url"),
            app_domain: "https://app.example.com".to_string(),
            api_domain: "".to_string(),
        };
        assert!(matches!(
            validate_gateway_config(&config),
            Err(ComponentError::InvalidArgument { ref field, .. }) if field == "apiDomain"
        ));
    }
}
