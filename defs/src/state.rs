use std::collections::HashMap;

use crate::{Attributes, Output, Resource, StackError};

/// Attributes of the resources created by an apply, in creation order.
#[derive(Debug, Clone, Default)]
pub struct StackState {
    created: Vec<String>,
    attributes: HashMap<String, Attributes>,
}

impl StackState {
    pub fn new() -> Self {
        StackState::default()
    }

    pub fn created(&self) -> &[String] {
        &self.created
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attributes(&self, name: &str) -> Option<&Attributes> {
        self.attributes.get(name)
    }

    /// Records a created resource. Recording the same name again replaces
    /// its attributes without changing the creation order.
    pub fn record(&mut self, name: &str, attributes: Attributes) {
        if !self.attributes.contains_key(name) {
            self.created.push(name.to_string());
        }
        self.attributes.insert(name.to_string(), attributes);
    }

    /// Reads a component output. Fails if it still waits on a resource that
    /// was not created.
    pub fn resolve(&self, output: &Output) -> Result<String, StackError> {
        let resolved = output
            .resolve(&|name: &str| self.attributes.get(name))
            .map_err(|e| StackError::UnresolvedOutput {
                resource: output.references().join(", "),
                source: e,
            })?;
        match resolved {
            Output::Known(value) => Ok(value),
            pending => Err(StackError::PendingOutput {
                waiting_on: pending.references().into_iter().map(String::from).collect(),
            }),
        }
    }

    /// Copy of `resource` with every pending output replaced by its value.
    pub fn resolve_resource(&self, resource: &Resource) -> Result<Resource, StackError> {
        let mut resolved = resource.clone();
        for output in resolved.properties.outputs_mut() {
            let value = output
                .resolve(&|name: &str| self.attributes.get(name))
                .map_err(|e| StackError::UnresolvedOutput {
                    resource: resource.name.clone(),
                    source: e,
                })?;
            if !value.is_resolved() {
                return Err(StackError::PendingOutput {
                    waiting_on: value.references().into_iter().map(String::from).collect(),
                });
            }
            *output = value;
        }
        Ok(resolved)
    }
}
