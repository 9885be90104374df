use serde::Serialize;
use stack_defs::{ComponentKind, ProviderBinding};

use crate::Stack;

/// Everything a component declares: its resources with their dependency
/// edges, the outputs it registers and an optional explicit provider.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDeclaration<O> {
    pub name: String,
    #[serde(rename = "type")]
    pub type_token: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderBinding>,
    pub resources: Stack,
    pub outputs: O,
}

impl<O> ComponentDeclaration<O> {
    pub fn new(name: &str, kind: ComponentKind, resources: Stack, outputs: O) -> Self {
        ComponentDeclaration {
            name: name.to_string(),
            type_token: kind.type_token(),
            provider: None,
            resources,
            outputs,
        }
    }

    pub fn with_provider(mut self, provider: ProviderBinding) -> Self {
        self.provider = Some(provider);
        self
    }
}
