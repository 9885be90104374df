use std::path::Path;

use anyhow::Result;
use log::info;
use stack_components::declare_gateway;
use stack_defs::GatewayConfig;
use stack_utils::ConfigStore;

use crate::manifest::read_manifest;
use crate::render::{print_declaration, print_json};

pub fn handle_declare(path: &Path, json: bool, store: &dyn ConfigStore) -> Result<()> {
    let config: GatewayConfig = read_manifest(path)?;
    let declaration = declare_gateway(&config.image_name, &config, store)?;
    info!(
        "Declared {} resources for gateway {}",
        declaration.resources.len(),
        config.image_name
    );
    if json {
        print_json(&declaration)
    } else {
        print_declaration(&declaration)
    }
}

pub fn handle_endpoint(path: &Path, store: &dyn ConfigStore) -> Result<()> {
    let config: GatewayConfig = read_manifest(path)?;
    let declaration = declare_gateway(&config.image_name, &config, store)?;
    println!("{}", declaration.outputs.endpoint);
    Ok(())
}
