use log::{debug, error, info};
use serde::Serialize;
use stack_defs::{Resource, ResourceProvisioner, StackError, StackState};

/// Resources in the order they must be created. Every dependency of a
/// resource, explicit or through a pending output, is declared before it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Stack {
    resources: Vec<Resource>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    /// Appends a resource. Explicit `depends_on` edges must name resources
    /// that are already in the stack. Output references may point outside
    /// the stack until it is merged with the stack that declares them.
    pub fn push(&mut self, resource: Resource) -> Result<(), StackError> {
        if self.get(&resource.name).is_some() {
            return Err(StackError::DuplicateResource(resource.name));
        }
        if let Some(missing) = resource
            .depends_on
            .iter()
            .find(|dep| self.get(dep).is_none())
        {
            return Err(StackError::UnknownDependency {
                resource: resource.name.clone(),
                dependency: missing.clone(),
            });
        }
        debug!(
            "Declared {} ({}) depending on [{}]",
            resource.name,
            resource.type_token,
            resource.dependencies().join(", ")
        );
        self.resources.push(resource);
        Ok(())
    }

    /// Appends every resource of `other` after the resources of `self`.
    pub fn merge(mut self, other: Stack) -> Result<Stack, StackError> {
        for resource in other.resources {
            self.push(resource)?;
        }
        Ok(self)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn dependencies(&self, name: &str) -> Option<Vec<&str>> {
        self.get(name).map(Resource::dependencies)
    }

    /// Fails on the first reference to a resource that is not declared
    /// earlier in the stack.
    pub fn check_complete(&self) -> Result<(), StackError> {
        for (index, resource) in self.resources.iter().enumerate() {
            let earlier = &self.resources[..index];
            for dependency in resource.dependencies() {
                if !earlier.iter().any(|r| r.name == dependency) {
                    return Err(StackError::UnknownDependency {
                        resource: resource.name.clone(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Creates every resource in declaration order, one at a time. Pending
    /// outputs are resolved from the attributes of the resources created so
    /// far. The first failure stops the apply; resources created before it
    /// are left in place and returned in the error's state.
    pub async fn apply(
        &self,
        provisioner: &dyn ResourceProvisioner,
    ) -> Result<StackState, StackError> {
        self.check_complete()?;

        let mut state = StackState::new();
        for resource in &self.resources {
            let resolved = state.resolve_resource(resource)?;
            info!("Creating {} ({})", resource.name, resource.type_token);
            match provisioner.create(&resolved).await {
                Ok(attributes) => {
                    debug!("Created {} with attributes {:?}", resource.name, attributes);
                    state.record(&resource.name, attributes);
                }
                Err(e) => {
                    error!("Failed to create {}: {}", resource.name, e);
                    return Err(StackError::ProvisionFailed {
                        resource: resource.name.clone(),
                        state,
                        source: e,
                    });
                }
            }
        }
        Ok(state)
    }

    /// Deletes the resources recorded in `state` in reverse declaration
    /// order, stopping at the first failure. Each resource is resolved
    /// against `state` before it is handed to the provisioner.
    pub async fn destroy(
        &self,
        provisioner: &dyn ResourceProvisioner,
        state: &StackState,
    ) -> Result<(), StackError> {
        for resource in self
            .resources
            .iter()
            .rev()
            .filter(|r| state.contains(&r.name))
        {
            let resolved = state.resolve_resource(resource)?;
            info!("Deleting {} ({})", resource.name, resource.type_token);
            provisioner
                .delete(&resolved)
                .await
                .map_err(|e| StackError::DestroyFailed {
                    resource: resource.name.clone(),
                    source: e,
                })?;
        }
        Ok(())
    }
}
