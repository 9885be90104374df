use thiserror::Error;

use crate::StackState;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration value '{namespace}:{key}'")]
    Missing { namespace: String, key: String },

    #[error("'{0}' is not a known AWS region, for example: \"eu-central-1\"")]
    InvalidRegion(String),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read configuration: {0}")]
    Unreadable(String),
}

#[derive(Error, Debug)]
pub enum ComponentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid component argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error(transparent)]
    Stack(#[from] StackError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutputError {
    #[error("Resource '{resource}' does not report attribute '{attribute}'")]
    MissingAttribute { resource: String, attribute: String },
}

#[derive(Error, Debug)]
pub enum StackError {
    #[error("Resource '{0}' is declared more than once")]
    DuplicateResource(String),

    #[error("Resource '{resource}' depends on '{dependency}' which is not declared before it")]
    UnknownDependency { resource: String, dependency: String },

    #[error("Output of '{resource}' could not be resolved: {source}")]
    UnresolvedOutput {
        resource: String,
        #[source]
        source: OutputError,
    },

    #[error("Output is still pending, waiting on: {}", waiting_on.join(", "))]
    PendingOutput { waiting_on: Vec<String> },

    /// `state` holds the resources created before the failure, ready to be
    /// passed to a destroy.
    #[error("Failed to provision '{resource}' (already created: [{}]): {source}", state.created().join(", "))]
    ProvisionFailed {
        resource: String,
        state: StackState,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to destroy '{resource}': {source}")]
    DestroyFailed {
        resource: String,
        #[source]
        source: anyhow::Error,
    },
}
