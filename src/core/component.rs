//! Published components and the component graph.
//!
//! Once built, a [`ComponentGraph`] is read-only: it is the contract
//! downstream build systems use to pick which target to include or link.

use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Topo;
use serde::Serialize;

/// A separately consumable unit published by the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Component name (e.g. `bitserializer-core`)
    pub name: String,

    /// The build-system target name consumers link against
    /// (e.g. `BitSerializer::core`)
    pub cmake_target: String,

    /// Names this component requires: sibling components by name,
    /// external dependencies as `pkg::pkg` target references
    pub requires: Vec<String>,

    /// Linkable artifact name, for components that compile an archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,

    /// System libraries the component needs at link time
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_libs: Vec<String>,

    /// Binary output directories. Left empty for components that produce
    /// no binaries, which downstream tooling reads as "nothing to run".
    pub bindirs: Vec<String>,

    /// Library output directories. Left empty for header-only
    /// components, which downstream tooling reads as "nothing to link".
    pub libdirs: Vec<String>,
}

impl Component {
    /// Create a header-only component: no artifact, no output dirs.
    pub fn new(name: impl Into<String>, cmake_target: impl Into<String>) -> Self {
        Component {
            name: name.into(),
            cmake_target: cmake_target.into(),
            requires: Vec::new(),
            lib: None,
            system_libs: Vec::new(),
            bindirs: Vec::new(),
            libdirs: Vec::new(),
        }
    }

    /// Attach a linkable artifact; the component then publishes `lib` as
    /// its library directory.
    pub fn with_lib(mut self, lib: impl Into<String>) -> Self {
        self.lib = Some(lib.into());
        self.libdirs = vec!["lib".to_string()];
        self
    }

    /// Add a required component or external target.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.requires.push(name.into());
        self
    }

    /// Add a system library.
    pub fn with_system_lib(mut self, lib: impl Into<String>) -> Self {
        self.system_libs.push(lib.into());
        self
    }

    /// Names of sibling components this one requires.
    pub fn component_requires(&self) -> impl Iterator<Item = &str> {
        self.requires
            .iter()
            .filter(|r| !r.contains("::"))
            .map(String::as_str)
    }

    /// External `pkg::pkg` target references this component requires.
    pub fn external_requires(&self) -> impl Iterator<Item = &str> {
        self.requires
            .iter()
            .filter(|r| r.contains("::"))
            .map(String::as_str)
    }

    /// Whether this component publishes a linkable artifact.
    pub fn is_linkable(&self) -> bool {
        self.lib.is_some()
    }
}

/// The published graph of installable components.
///
/// Nodes are components; an edge `a -> b` means `a` requires `b`.
/// External requirements are kept on the components themselves and are
/// not nodes.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentGraph {
    /// Name of the build-system config file the whole package publishes
    cmake_file_name: String,

    /// Components in publication order
    components: Vec<Component>,

    #[serde(skip)]
    graph: DiGraph<usize, ()>,

    #[serde(skip)]
    name_to_node: HashMap<String, NodeIndex>,
}

impl ComponentGraph {
    /// Create an empty graph.
    pub fn new(cmake_file_name: impl Into<String>) -> Self {
        ComponentGraph {
            cmake_file_name: cmake_file_name.into(),
            components: Vec::new(),
            graph: DiGraph::new(),
            name_to_node: HashMap::new(),
        }
    }

    /// Add a component, wiring requirement edges to components already
    /// in the graph. Re-adding a name is a no-op.
    pub fn add(&mut self, component: Component) {
        if self.name_to_node.contains_key(&component.name) {
            return;
        }

        let index = self.components.len();
        let node = self.graph.add_node(index);
        self.name_to_node.insert(component.name.clone(), node);

        for dep in component.component_requires() {
            if let Some(&dep_node) = self.name_to_node.get(dep) {
                self.graph.add_edge(node, dep_node, ());
            }
        }

        self.components.push(component);
    }

    /// The build-system config file name for the package.
    pub fn cmake_file_name(&self) -> &str {
        &self.cmake_file_name
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.name_to_node
            .get(name)
            .map(|&node| &self.components[self.graph[node]])
    }

    /// Iterate over components in publication order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the graph has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// The roots of the graph: components that require no sibling.
    ///
    /// A well-formed publication has exactly one root, the mandatory
    /// core component every other component hangs off.
    pub fn roots(&self) -> Vec<&Component> {
        self.graph
            .node_indices()
            .filter(|&n| self.graph.neighbors(n).next().is_none())
            .map(|n| &self.components[self.graph[n]])
            .collect()
    }

    /// Check that the requirement edges form no cycle.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Components in dependency order (required components first).
    pub fn topological_order(&self) -> Vec<&Component> {
        let mut topo = Topo::new(&self.graph);
        let mut order = Vec::new();

        while let Some(node) = topo.next(&self.graph) {
            order.push(&self.components[self.graph[node]]);
        }

        // Topo yields a before b for edges a -> b, but a -> b means
        // "a requires b", so reverse to put requirements first.
        order.reverse();
        order
    }
}
