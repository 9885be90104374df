use std::path::Path;

use anyhow::{anyhow, Result};
use colored::Colorize;
use log::info;
use prettytable::{row, Table};
use stack_components::{declare_gateway, declare_service_runtime, DryRunProvisioner, Stack};
use stack_defs::Output;
use stack_utils::ConfigStore;

use crate::manifest::{read_manifest, StackManifest};
use crate::render::print_stack;

/// Declares every component of a stack file, wires the gateway to the
/// service when the file leaves `containerUrl` out, and runs the stack
/// against the dry-run provisioner to show the resolved outputs.
pub async fn handle_preview(path: &Path, store: &dyn ConfigStore) -> Result<()> {
    let manifest: StackManifest = read_manifest(path)?;
    if manifest.service.is_none() && manifest.gateway.is_none() {
        return Err(anyhow!(
            "{} declares neither a service nor a gateway",
            path.display()
        ));
    }

    let mut stack = Stack::new();
    let mut outputs: Vec<(String, Output)> = Vec::new();

    let mut service_url = None;
    if let Some(config) = &manifest.service {
        let service = declare_service_runtime(&config.image_name, config, store)?;
        stack = stack.merge(service.resources)?;
        outputs.push(("serviceUrl".to_string(), service.outputs.service_url.clone()));
        service_url = Some(service.outputs.service_url);
    }

    if let Some(gateway) = manifest.gateway {
        let config = gateway.into_config(service_url.as_ref())?;
        let gateway = declare_gateway(&config.image_name, &config, store)?;
        stack = stack.merge(gateway.resources)?;
        outputs.push(("endpoint".to_string(), gateway.outputs.endpoint));
    }

    print_stack(&stack);

    info!("Previewing {} resources", stack.len());
    let state = stack.apply(&DryRunProvisioner::new()).await?;

    let mut table = Table::new();
    table.add_row(row!["Output".purple().bold(), "Value".blue().bold()]);
    for (name, output) in &outputs {
        table.add_row(row![name, state.resolve(output)?]);
    }
    table.printstd();
    Ok(())
}
