//! `serpack components` command

use anyhow::Result;

use crate::cli::ComponentsArgs;
use crate::commands::{gather_input, parse_version};
use serpack::core::component::ComponentGraph;
use serpack::resolver::components::publish_components;
use serpack::resolver::options::resolve_options;

pub fn execute(args: ComponentsArgs) -> Result<()> {
    let version = parse_version(&args.version)?;
    let (profile, raw) = gather_input(&args.profile, &args.options)?;

    let (options, _) = resolve_options(&raw, &version, &profile.os);
    let graph = publish_components(&options, &version, &profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print_graph(&graph);
    }

    Ok(())
}

/// Print a component graph, one component per line with its edges.
pub fn print_graph(graph: &ComponentGraph) {
    for component in graph.components() {
        let lib = match &component.lib {
            Some(lib) => format!("  [lib {}]", lib),
            None => String::new(),
        };
        println!("  {} -> {}{}", component.name, component.cmake_target, lib);

        if !component.requires.is_empty() {
            println!("      requires: {}", component.requires.join(", "));
        }
        if !component.system_libs.is_empty() {
            println!("      system libs: {}", component.system_libs.join(", "));
        }
    }
}
