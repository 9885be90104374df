use stack_defs::{ComponentKind, ResourceKind};

/// Logical name of a resource declared by a component:
/// `{component-prefix}-{image}-{kind}-{environment}`.
///
/// Every resource of a component shares the `image`/`environment` pair, so
/// two component instances collide only if both values are equal.
pub fn resource_name(
    component: ComponentKind,
    kind: ResourceKind,
    image_name: &str,
    environment: &str,
) -> String {
    format!(
        "{}-{}-{}-{}",
        component.prefix(),
        image_name,
        kind.segment(),
        environment
    )
}

/// Name of the explicit provider instance a component binds its resources to.
pub fn provider_name(component: ComponentKind, cloud: &str, environment: &str) -> String {
    format!("{}-{}-{}", component.prefix(), cloud, environment)
}

/// Registry repository id, unique per image and environment.
pub fn repository_id(image_name: &str, environment: &str) -> String {
    format!("{}-{}", image_name, environment)
}
