use std::path::Path;

use anyhow::Result;
use log::info;
use stack_components::declare_service_runtime;
use stack_defs::ServiceRuntimeConfig;
use stack_utils::ConfigStore;

use crate::manifest::read_manifest;
use crate::render::{print_declaration, print_json};

pub fn handle_declare(path: &Path, json: bool, store: &dyn ConfigStore) -> Result<()> {
    let config: ServiceRuntimeConfig = read_manifest(path)?;
    let declaration = declare_service_runtime(&config.image_name, &config, store)?;
    info!(
        "Declared {} resources for service {}",
        declaration.resources.len(),
        config.image_name
    );
    if json {
        print_json(&declaration)
    } else {
        print_declaration(&declaration)
    }
}
