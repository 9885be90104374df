use anyhow::Result;
use colored::Colorize;
use prettytable::{row, Table};
use serde::Serialize;
use stack_components::{ComponentDeclaration, Stack};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_stack(stack: &Stack) {
    let mut table = Table::new();
    table.add_row(row![
        "#".bold(),
        "Resource".purple().bold(),
        "Type".blue().bold(),
        "Depends on".green().bold(),
    ]);
    for (index, resource) in stack.resources().iter().enumerate() {
        table.add_row(row![
            index + 1,
            resource.name,
            resource.type_token,
            resource.dependencies().join("\n"),
        ]);
    }
    table.printstd();
}

pub fn print_declaration<O: Serialize>(declaration: &ComponentDeclaration<O>) -> Result<()> {
    println!(
        "{} {} ({})",
        "Component".bold(),
        declaration.name,
        declaration.type_token
    );
    if let Some(provider) = &declaration.provider {
        println!("Provider: {} ({})", provider.name, provider.region);
    }
    print_stack(&declaration.resources);
    println!("Outputs:");
    println!("{}", serde_json::to_string_pretty(&declaration.outputs)?);
    Ok(())
}
