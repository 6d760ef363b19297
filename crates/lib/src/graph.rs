//! Validation graph over the synthesized declaration set.
//!
//! The remap pass works edge by edge and cannot see a cycle in the upstream
//! graph. This module builds a directed graph over the declarations, checks
//! it is acyclic, and exposes a topological order for reporting.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::synth::SynthError;
use crate::target::OutputDeclaration;

/// A directed graph over output declarations, edges from dependency to
/// dependent.
pub struct DeclGraph {
  graph: DiGraph<String, ()>,
  nodes: HashMap<String, NodeIndex>,
}

impl DeclGraph {
  /// Build the graph from a synthesized declaration set.
  ///
  /// Dependencies are already remapped, so every edge endpoint is a
  /// declaration name; synthesis guarantees no dangling references.
  pub fn from_declarations(declarations: &[OutputDeclaration]) -> Self {
    let mut graph = DiGraph::new();
    let mut nodes = HashMap::new();

    for decl in declarations {
      let idx = graph.add_node(decl.name.clone());
      nodes.insert(decl.name.clone(), idx);
    }

    for decl in declarations {
      let dependent = nodes[&decl.name];
      for dep in &decl.dependencies {
        if let Some(&dep_idx) = nodes.get(dep) {
          graph.add_edge(dep_idx, dependent, ());
        }
      }
    }

    Self { graph, nodes }
  }

  /// Verify the declaration set is acyclic.
  ///
  /// # Errors
  ///
  /// Returns `CycleDetected` naming one module on the cycle.
  pub fn verify_acyclic(&self) -> Result<(), SynthError> {
    toposort(&self.graph, None).map(|_| ()).map_err(|cycle| SynthError::CycleDetected {
      name: self.graph[cycle.node_id()].clone(),
    })
  }

  /// Declaration names in topological order, dependencies first.
  pub fn topological_order(&self) -> Result<Vec<String>, SynthError> {
    let sorted = toposort(&self.graph, None).map_err(|cycle| SynthError::CycleDetected {
      name: self.graph[cycle.node_id()].clone(),
    })?;

    Ok(sorted.into_iter().map(|idx| self.graph[idx].clone()).collect())
  }

  /// Number of direct dependents of a module.
  pub fn dependent_count(&self, name: &str) -> usize {
    let Some(&idx) = self.nodes.get(name) else {
      return 0;
    };
    self.graph.neighbors_directed(idx, petgraph::Direction::Outgoing).count()
  }
}
